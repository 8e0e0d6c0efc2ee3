//! Reduce a thick maze read from a file and print what was found.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use maze_topology::{
    reduce, EdgeKind, Location, Maze, RoomPartition, ThickMaze, TopologyReducer, VertexKind,
    WeightedTopologyGraph,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

// two rooms joined by a corridor, with a ring and a few dead ends
const SAMPLE: &str = "\
...#....#...
...#.##.#...
............
#.#####.####
#.#...#....#
#.#.#.####.#
#...#......#
";

/// Find the rooms and corridors of a thick maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File holding the maze, `#` for walls and `.` for floor; a built-in sample is used if omitted
    path: Option<PathBuf>,

    /// Skip room detection and reduce corridors only
    #[arg(long)]
    corridors_only: bool,
}

fn glyph(kind: VertexKind) -> char {
    match kind {
        VertexKind::RoomEntrance { .. } => 'E',
        VertexKind::DeadEnd => 'D',
        VertexKind::Junction => 'J',
        VertexKind::LoopAnchor => 'L',
        VertexKind::Isolated => 'I',
    }
}

fn render(maze: &ThickMaze, rooms: &RoomPartition, graph: &WeightedTopologyGraph) -> String {
    let (width, height) = maze.dimensions();

    (0..height.get())
        .map(|y| (0..width.get())
            .map(|x| {
                let location = Location(x, y);
                if !maze.cell_in_bounds(location) {
                    '#'
                } else if let Some(vertex) = graph.vertex_at(location) {
                    glyph(vertex.kind)
                } else if rooms.room_of(location).is_some() {
                    'o'
                } else {
                    '.'
                }
            })
            .collect::<String>())
        .join("\n")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let text = match &args.path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?,
        None => SAMPLE.to_owned(),
    };
    let maze: ThickMaze = text.parse().context("could not parse maze")?;
    info!(cells = maze.in_bounds_cells().len(), "maze loaded");

    let (rooms, graph) = if args.corridors_only {
        let rooms = RoomPartition::empty(&maze);
        let graph = TopologyReducer::new(&maze, &rooms).build();
        (rooms, graph)
    } else {
        reduce(&maze)
    };

    println!("{}\n", render(&maze, &rooms, &graph));

    for (room, cells) in rooms.rooms() {
        println!("room {room}: {} cells from {:?}", cells.len(), cells.first());
    }

    for vertex in graph.vertices() {
        println!("vertex {} at {:?}: {:?}", vertex.id, vertex.location, vertex.kind);
    }

    for edge in graph.edges() {
        let kind = match edge.kind {
            EdgeKind::Room { room } => format!("room {room}"),
            EdgeKind::Corridor => "corridor".to_owned(),
            EdgeKind::Loop => "loop".to_owned(),
        };
        println!("edge {} - {} ({kind}): weight {}", edge.ends.0, edge.ends.1, edge.weight);
    }

    println!(
        "\n{} rooms, {} vertices, {} edges, total weight {}",
        rooms.len(),
        graph.vertices().len(),
        graph.edges().len(),
        graph.total_weight(),
    );

    Ok(())
}
