//! Decompose a handful of random rooms and print what came out.
//!
//! Usage:
//!   cargo run -p bcd --example decompose_rooms -- [seed]
//!
//! Prints each room as ASCII, then the critical events and the cell dump.

use bcd::api::{draw_room, Decomposer, GraphDump, ObstacleCount, RoomCfg, RoomReplay};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2025);
    let cfg = RoomCfg {
        width: 24,
        height: 12,
        obstacles: ObstacleCount::Uniform { min: 1, max: 3 },
        max_extent_frac: 0.3,
        border_walls: true,
    };
    let mut engine = Decomposer::new();
    for index in 0..3 {
        let map = draw_room(cfg, RoomReplay { seed, index });
        println!("room {index} (seed {seed}):\n{map}");
        match engine.run(&map) {
            Ok(()) => {
                let graph = engine.graph();
                println!(
                    "{} critical points, {} cells",
                    graph.num_vertices(),
                    graph.num_edges()
                );
                for ev in engine.events() {
                    println!("  {:?} at x={} -> vertex {}", ev.kind, ev.x, ev.vertex);
                }
                print!("{}", GraphDump(graph));
            }
            Err(err) => println!("decomposition failed: {err}"),
        }
        println!();
    }
}
