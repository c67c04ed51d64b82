use anyhow::{Context, Result};
use bcd::api::{Decomposer, GraphDump, MapCfg};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod map_io;
mod provenance;
mod render;

use map_io::WorldFile;
use render::RenderCfg;

#[derive(Parser)]
#[command(name = "bcd-cli")]
#[command(about = "Boustrophedon cellular decomposition of occupancy maps")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Decompose a map image (png/pgm) and optionally dump or render the result
    Decompose {
        #[arg(long)]
        map: PathBuf,
        /// Pixels brighter than this are free
        #[arg(long, default_value_t = 100)]
        threshold: u8,
        /// Write an SVG of the cells and graph here
        #[arg(long)]
        render: Option<PathBuf>,
        /// SVG units per map pixel
        #[arg(long, default_value_t = 4.0)]
        scale: f64,
        /// Label critical points with their IDs in the render
        #[arg(long)]
        labels: bool,
        /// Print every cell and critical point to stdout
        #[arg(long)]
        dump: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Serialize)]
struct DecomposeParams {
    map: String,
    source: String,
    threshold: u8,
    scale: f64,
    world: Option<WorldFile>,
    vertices: usize,
    cells: usize,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Decompose {
            map,
            threshold,
            render,
            scale,
            labels,
            dump,
        } => {
            let cfg = RenderCfg {
                scale,
                labels,
                ..RenderCfg::default()
            };
            decompose(map, MapCfg { threshold }, render, cfg, dump)
        }
        Action::Report => report(),
    }
}

fn decompose(
    map_path: PathBuf,
    map_cfg: MapCfg,
    render_to: Option<PathBuf>,
    render_cfg: RenderCfg,
    dump: bool,
) -> Result<()> {
    let loaded = map_io::load(&map_path, map_cfg)?;
    let map = &loaded.map;
    tracing::info!(
        source = %loaded.source.display(),
        width = map.width(),
        height = map.height(),
        free = map.free_count(),
        "map loaded"
    );

    let mut engine = Decomposer::new();
    engine
        .run(map)
        .with_context(|| format!("decomposing {}", map_path.display()))?;
    let graph = engine.graph();
    tracing::info!(
        vertices = graph.num_vertices(),
        cells = graph.num_edges(),
        "decomposed"
    );

    if dump {
        print!("{}", GraphDump(graph));
    }

    if let Some(out) = render_to {
        let doc = render::render(map, graph, engine.events(), render_cfg);
        render::save(&out, &doc)?;
        let params = DecomposeParams {
            map: map_path.display().to_string(),
            source: loaded.source.display().to_string(),
            threshold: map_cfg.threshold,
            scale: render_cfg.scale,
            world: loaded.world,
            vertices: graph.num_vertices(),
            cells: graph.num_edges(),
        };
        let sidecar = provenance::write_sidecar(&out, &params)?;
        tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "rendered");
    }
    Ok(())
}

fn report() -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&provenance::Report::current())?
    );
    Ok(())
}
