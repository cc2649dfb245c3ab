use std::{io, path::PathBuf};

use clap::Parser;
use graph_vis::{
    config::{Config, EdgeSource},
    draw::{Graphviz, LayoutKind, Output},
};
use log::LevelFilter;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(
    name = "graph-vis",
    about = "Visualize small graphs (nodes 0..n-1).",
    version
)]
struct Args {
    #[arg(long = "n", help = "Number of nodes (n)")]
    n: usize,

    #[arg(
        long = "edges",
        allow_hyphen_values = true,
        help = "Edges as a JSON-style 2D list, e.g. '[[0,1],[1,2]]' (use '-' to read from stdin)"
    )]
    edges: String,

    #[arg(
        long = "out",
        value_name = "PATH",
        help = "Save the visualization to this file (png, svg, pdf, ...) instead of opening a viewer"
    )]
    out: Option<PathBuf>,

    #[arg(long = "layout", value_enum, default_value_t = LayoutKind::Spring, help = "Layout algorithm")]
    layout: LayoutKind,

    #[arg(long = "text", help = "Print the adjacency list instead of drawing")]
    text: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            n: args.n,
            edges: EdgeSource::from_arg(args.edges),
            output: args.out.map_or(Output::Display, Output::File),
            layout: args.layout,
            text_only: args.text,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let config = Config::from(Args::parse());
    let edges_text = config.edges.read(io::stdin().lock())?;

    graph_vis::run(
        &config,
        &edges_text,
        &Graphviz,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(())
}
