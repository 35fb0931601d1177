// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! dropcart CLI
//!
//! Drives a headless cart session: lists the catalog, simulates drops with
//! real timers, and prints the resulting cart.
#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use comfy_table::Table;
use dropcart_config_fs::FsConfigStore;
use dropcart_core::config::ConfigService;
use dropcart_core::runtime::TokioTimer;
use dropcart_core::{
    CartSettings, CartSnapshot, CartStore, Catalog, DragPayload, DropCoordinator, DropOutcome,
    DropTarget, DropZone, Rect, Viewport,
};
use dropcart_effects::ConfettiSink;
use dropcart_port::{ParticleBurst, ParticleEmitter, SharedEffectSink};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Directory holding `settings.json` and `catalog.json` (defaults to the
    /// platform config directory)
    #[clap(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List catalog products
    Catalog,
    /// Drop the given product ids onto the cart, one after another
    Simulate {
        /// Product ids to drop (unknown ids are ignored)
        ids: Vec<String>,
        /// Drop target rectangle as `left,top,width,height`
        #[clap(long, value_parser = parse_rect)]
        rect: Option<Rect>,
        /// Viewport size as `width,height`
        #[clap(long, value_parser = parse_viewport, default_value = "1600,1000")]
        viewport: Viewport,
        /// Milliseconds between drops
        #[clap(long, default_value_t = 50)]
        interval_ms: u64,
    },
    /// Print effective settings as JSON
    Settings {
        /// Write the effective settings back to the config directory
        #[clap(long)]
        write: bool,
    },
}

fn parse_floats<const N: usize>(s: &str) -> Result<[f64; N]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        bail!("expected {N} comma-separated numbers, got {}", parts.len());
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .with_context(|| format!("not a number: {part:?}"))?;
    }
    Ok(out)
}

fn parse_rect(s: &str) -> Result<Rect> {
    let [left, top, width, height] = parse_floats::<4>(s)?;
    Ok(Rect::new(left, top, width, height))
}

fn parse_viewport(s: &str) -> Result<Viewport> {
    let [width, height] = parse_floats::<2>(s)?;
    Ok(Viewport::new(width, height))
}

/// Particle emitter that writes each burst to the log.
struct LogEmitter;

impl ParticleEmitter for LogEmitter {
    fn emit(&self, burst: &ParticleBurst) {
        info!(
            x = burst.origin.x,
            y = burst.origin.y,
            particles = burst.particle_count,
            angle = burst.angle,
            spread = burst.spread,
            duration = ?burst.duration,
            "confetti"
        );
    }
}

/// Explicit `--config-dir`, else the platform config directory.
fn open_store(dir: Option<&Path>) -> Result<FsConfigStore> {
    let store = match dir {
        Some(dir) => FsConfigStore::at(dir)?,
        None => FsConfigStore::new()?,
    };
    Ok(store)
}

fn load_config(svc: &ConfigService<FsConfigStore>) -> Result<(Catalog, CartSettings)> {
    let catalog = Catalog::load_or_builtin(svc)?;
    let settings = CartSettings::load_or_default(svc)?;
    Ok((catalog, settings))
}

fn print_catalog(catalog: &Catalog) {
    let mut table = Table::new();
    table.set_header(vec!["id", "name", "price"]);
    for product in catalog.iter() {
        table.add_row(vec![
            product.id.to_string(),
            product.name.clone(),
            format!("${}", product.price),
        ]);
    }
    println!("{table}");
}

fn print_cart(snapshot: &CartSnapshot) {
    if snapshot.entries.is_empty() {
        println!("Cart is empty");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["product", "unit", "qty", "line"]);
    for entry in &snapshot.entries {
        let product = entry.product();
        table.add_row(vec![
            product.name.clone(),
            format!("${}", product.price),
            entry.quantity().to_string(),
            format!("${}", entry.line_total()),
        ]);
    }
    println!("{table}");
    println!("Items: {}", snapshot.item_count);
    println!("Total: ${}", snapshot.subtotal);
}

async fn simulate(
    catalog: Catalog,
    settings: &CartSettings,
    ids: &[String],
    target: DropTarget,
    interval: Duration,
) -> Result<CartSnapshot> {
    let timer = TokioTimer::current().context("simulate must run inside a tokio runtime")?;
    let store = CartStore::from_settings(Arc::new(timer.clone()), settings);
    let effects: SharedEffectSink = Arc::new(ConfettiSink::new(Arc::new(LogEmitter), timer));
    let coordinator =
        DropCoordinator::new(Arc::new(catalog), store.clone(), effects).with_settings(settings);

    let mut zone = DropZone::default();
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(interval).await;
        }
        let payload = DragPayload::text(id.as_str());
        zone.drag_over(payload.media_type);
        match coordinator.handle_drop_in(&mut zone, &payload.data, target) {
            DropOutcome::Added {
                product, quantity, ..
            } => info!(product = %product.id, quantity, "dropped"),
            DropOutcome::Ignored => {}
        }
    }

    // Let side bursts and the final bounce reset run out.
    let settle = settings.bounce_duration().max(Duration::from_millis(200));
    tokio::time::sleep(settle + Duration::from_millis(50)).await;
    Ok(store.snapshot())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let svc = ConfigService::new(open_store(args.config_dir.as_deref())?);
    let (catalog, settings) = load_config(&svc)?;

    match args.cmd {
        Command::Catalog => print_catalog(&catalog),
        Command::Simulate {
            ids,
            rect,
            viewport,
            interval_ms,
        } => {
            let target = DropTarget { rect, viewport };
            let snapshot = simulate(
                catalog,
                &settings,
                &ids,
                target,
                Duration::from_millis(interval_ms),
            )
            .await?;
            print_cart(&snapshot);
        }
        Command::Settings { write } => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            if write {
                settings.save(&svc)?;
                info!(dir = %svc.store().base().display(), "settings written");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rect_and_viewport() {
        assert!(matches!(parse_rect("1, 2,3,4"), Ok(r) if r == Rect::new(1.0, 2.0, 3.0, 4.0)));
        assert!(parse_rect("1,2,3").is_err());
        assert!(parse_viewport("800,x").is_err());
        assert!(matches!(parse_viewport("800,600"), Ok(v) if v == Viewport::new(800.0, 600.0)));
    }
}
