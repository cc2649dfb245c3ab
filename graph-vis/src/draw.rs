use std::{
    io,
    path::{Path, PathBuf},
    process::Command,
};

use graphviz_rust::{
    cmd::{CommandArg, Format, Layout},
    exec_dot,
};
use log::debug;
use petgraph::{
    Graph,
    dot::{Config, Dot},
    graph::UnGraph,
};
use thiserror::Error;

const NODE_STYLE: &str =
    r#"shape=circle, width=0.5, height=0.5, style=filled, fillcolor="skyblue", color="black""#;
const EDGE_STYLE: &str = r#"color="gray""#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LayoutKind {
    /// Force-directed placement.
    #[default]
    Spring,
    /// Nodes evenly spaced on a circle.
    Circular,
}

impl LayoutKind {
    fn engine(self) -> Layout {
        match self {
            LayoutKind::Spring => Layout::Fdp,
            LayoutKind::Circular => Layout::Circo,
        }
    }
}

/// Where a drawing ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Rendered to a temporary image and opened in the system viewer.
    Display,
    File(PathBuf),
}

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("graphviz failed: {0}")]
    Graphviz(#[from] io::Error),
    #[error("could not open a viewer for {}: {source}", .path.display())]
    Viewer { path: PathBuf, source: io::Error },
}

/// The drawing capability the pipeline relies on.
pub trait GraphicsDelegate {
    fn is_available(&self) -> bool;

    fn draw(
        &self,
        graph: &UnGraph<usize, ()>,
        layout: LayoutKind,
        output: &Output,
    ) -> Result<(), DrawError>;
}

/// Graph with nodes `0..n` and the given edges; node weights are the ids.
pub fn build_graph(n: usize, edges: &[(usize, usize)]) -> UnGraph<usize, ()> {
    let mut g: UnGraph<usize, ()> = Graph::with_capacity(n, edges.len());
    let vertices = (0..n).map(|i| g.add_node(i)).collect::<Vec<_>>();
    for &(a, b) in edges {
        g.add_edge(vertices[a], vertices[b], ());
    }
    g
}

pub fn to_dot(graph: &UnGraph<usize, ()>) -> String {
    let dot = Dot::with_attr_getters(
        graph,
        &[Config::EdgeNoLabel],
        &|_, _| EDGE_STYLE.to_string(),
        &|_, _| NODE_STYLE.to_string(),
    );
    format!("{:?}", dot)
}

/// Picks the output format from the file extension, defaulting to PNG.
pub fn format_for(path: &Path) -> Format {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("svg") => Format::Svg,
        Some("pdf") => Format::Pdf,
        Some("jpg" | "jpeg") => Format::Jpg,
        Some("gif") => Format::Gif,
        Some("dot" | "gv") => Format::Dot,
        _ => Format::Png,
    }
}

/// Renders through the Graphviz command line tools.
#[derive(Debug, Default, Clone, Copy)]
pub struct Graphviz;

impl Graphviz {
    fn export(
        &self,
        graph: &UnGraph<usize, ()>,
        layout: LayoutKind,
        path: &Path,
    ) -> io::Result<()> {
        debug!(
            "rendering {} nodes with {:?} layout to {}",
            graph.node_count(),
            layout,
            path.display()
        );
        exec_dot(
            to_dot(graph),
            vec![
                CommandArg::Layout(layout.engine()),
                CommandArg::Custom("-Gsize=6,6".into()),
                CommandArg::Format(format_for(path)),
                CommandArg::Output(path.to_string_lossy().to_string()),
            ],
        )?;
        Ok(())
    }
}

impl GraphicsDelegate for Graphviz {
    fn is_available(&self) -> bool {
        match exec_dot("graph {}".into(), vec![CommandArg::Format(Format::Dot)]) {
            Ok(_) => true,
            Err(e) => {
                debug!("graphviz probe failed: {e}");
                false
            }
        }
    }

    fn draw(
        &self,
        graph: &UnGraph<usize, ()>,
        layout: LayoutKind,
        output: &Output,
    ) -> Result<(), DrawError> {
        match output {
            Output::File(path) => Ok(self.export(graph, layout, path)?),
            Output::Display => {
                let path =
                    std::env::temp_dir().join(format!("graph-vis-{}.png", std::process::id()));
                self.export(graph, layout, &path)?;
                open_viewer(&path).map_err(|source| DrawError::Viewer { path, source })
            }
        }
    }
}

fn open_viewer(path: &Path) -> io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };
    command.arg(path).spawn()?;
    Ok(())
}
