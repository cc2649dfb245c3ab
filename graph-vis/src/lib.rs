use std::io::{self, Write};

use log::debug;

use crate::{
    adjacency::{find_invalid, render_adjacency, valid_edges},
    config::Config,
    draw::{GraphicsDelegate, Output, build_graph},
    edges::{Edge, parse_edges},
};

pub mod adjacency;
pub mod config;
pub mod draw;
pub mod edges;
pub mod literal;

/// Parses `edges_text` and either draws it through `delegate` or prints the adjacency list.
///
/// Regular output goes to `out`, warnings and render failures to `err`. Only failures to
/// write to those streams are returned.
pub fn run(
    config: &Config,
    edges_text: &str,
    delegate: &dyn GraphicsDelegate,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<()> {
    let edges = parse_edges(edges_text);
    debug!("parsed {} edges for n={}", edges.len(), config.n);

    if config.text_only {
        return print_adjacency(out, config.n, &edges);
    }

    if !delegate.is_available() {
        writeln!(out, "Graphviz (the `dot` executable) is not available.")?;
        writeln!(
            out,
            "Falling back to text adjacency output. To enable plotting, install Graphviz: https://graphviz.org/download/"
        )?;
        return print_adjacency(out, config.n, &edges);
    }

    let invalid = find_invalid(config.n, &edges);
    if !invalid.is_empty() {
        writeln!(
            err,
            "Warning: some edges reference nodes outside 0..n-1 and will be ignored: {:?}",
            invalid
        )?;
    }

    let graph = build_graph(config.n, &valid_edges(config.n, &edges));
    match delegate.draw(&graph, config.layout, &config.output) {
        Ok(()) => {
            if let Output::File(path) = &config.output {
                writeln!(out, "Saved image to: {}", path.display())?;
            }
            Ok(())
        }
        Err(e) => {
            writeln!(err, "Failed to render image: {e}")?;
            writeln!(out, "Falling back to text adjacency output.")?;
            print_adjacency(out, config.n, &edges)
        }
    }
}

fn print_adjacency(out: &mut dyn Write, n: usize, edges: &[Edge]) -> io::Result<()> {
    writeln!(out, "Adjacency list:")?;
    for line in render_adjacency(n, edges) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io, path::PathBuf};

    use petgraph::graph::UnGraph;

    use super::*;
    use crate::{
        config::EdgeSource,
        draw::{DrawError, LayoutKind},
    };

    #[derive(Default)]
    struct FakeDelegate {
        unavailable: bool,
        failing: bool,
        drawn: RefCell<Vec<(usize, Vec<(usize, usize)>, LayoutKind, Output)>>,
    }

    impl GraphicsDelegate for FakeDelegate {
        fn is_available(&self) -> bool {
            !self.unavailable
        }

        fn draw(
            &self,
            graph: &UnGraph<usize, ()>,
            layout: LayoutKind,
            output: &Output,
        ) -> Result<(), DrawError> {
            if self.failing {
                return Err(DrawError::Graphviz(io::Error::other("syntax error")));
            }
            let edges = graph
                .edge_indices()
                .filter_map(|e| graph.edge_endpoints(e))
                .map(|(a, b)| (graph[a], graph[b]))
                .collect();
            self.drawn
                .borrow_mut()
                .push((graph.node_count(), edges, layout, output.clone()));
            Ok(())
        }
    }

    fn config(n: usize, output: Output) -> Config {
        Config {
            n,
            edges: EdgeSource::Stdin,
            output,
            layout: LayoutKind::Circular,
            text_only: false,
        }
    }

    fn run_with(config: &Config, text: &str, delegate: &FakeDelegate) -> (String, String) {
        let mut out = vec![];
        let mut err = vec![];
        run(config, text, delegate, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn draws_valid_edges_and_warns_about_the_rest() {
        let delegate = FakeDelegate::default();
        let path = PathBuf::from("graph.png");
        let (out, err) = run_with(
            &config(3, Output::File(path.clone())),
            "[[0,1],[0,5],[-1,2],[1,2]]",
            &delegate,
        );

        assert_eq!(out, "Saved image to: graph.png\n");
        assert_eq!(
            err,
            "Warning: some edges reference nodes outside 0..n-1 and will be ignored: [(0, 5), (-1, 2)]\n"
        );
        assert_eq!(
            delegate.drawn.borrow().as_slice(),
            &[(
                3,
                vec![(0, 1), (1, 2)],
                LayoutKind::Circular,
                Output::File(path)
            )]
        );
    }

    #[test]
    fn display_output_prints_nothing() {
        let delegate = FakeDelegate::default();
        let (out, err) = run_with(&config(2, Output::Display), "[[0,1]]", &delegate);
        assert!(out.is_empty());
        assert!(err.is_empty());
        assert_eq!(delegate.drawn.borrow().len(), 1);
    }

    #[test]
    fn falls_back_when_delegate_is_unavailable() {
        let delegate = FakeDelegate {
            unavailable: true,
            ..Default::default()
        };
        let (out, err) = run_with(&config(3, Output::Display), "[[0,5],[2,1]]", &delegate);

        assert!(out.starts_with("Graphviz (the `dot` executable) is not available.\n"));
        assert!(out.contains("install Graphviz"));
        assert!(out.ends_with("Adjacency list:\n0: []\n1: [2]\n2: [1]\n"));
        assert!(err.is_empty());
        assert!(delegate.drawn.borrow().is_empty());
    }

    #[test]
    fn text_only_skips_delegate() {
        let delegate = FakeDelegate::default();
        let config = Config {
            text_only: true,
            ..config(4, Output::Display)
        };
        let (out, err) = run_with(&config, "[[0,1],[1,2],[2,3],[3,0]]", &delegate);

        assert_eq!(
            out,
            "Adjacency list:\n0: [1, 3]\n1: [0, 2]\n2: [1, 3]\n3: [0, 2]\n"
        );
        assert!(err.is_empty());
        assert!(delegate.drawn.borrow().is_empty());
    }

    #[test]
    fn render_failure_falls_back_to_text() {
        let delegate = FakeDelegate {
            failing: true,
            ..Default::default()
        };
        let (out, err) = run_with(
            &config(2, Output::File("graph.svg".into())),
            "",
            &delegate,
        );

        assert_eq!(
            out,
            "Falling back to text adjacency output.\nAdjacency list:\n0: []\n1: []\n"
        );
        assert_eq!(err, "Failed to render image: graphviz failed: syntax error\n");
    }
}
