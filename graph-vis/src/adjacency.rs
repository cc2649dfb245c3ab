use crate::edges::Edge;

/// Converts an edge to node indices if both endpoints lie in `0..n`.
pub fn in_range(n: usize, (a, b): Edge) -> Option<(usize, usize)> {
    let a = usize::try_from(a).ok().filter(|&a| a < n)?;
    let b = usize::try_from(b).ok().filter(|&b| b < n)?;
    Some((a, b))
}

/// Edges with at least one endpoint outside `0..n`, in input order.
pub fn find_invalid(n: usize, edges: &[Edge]) -> Vec<Edge> {
    edges
        .iter()
        .copied()
        .filter(|&edge| in_range(n, edge).is_none())
        .collect()
}

pub fn valid_edges(n: usize, edges: &[Edge]) -> Vec<(usize, usize)> {
    edges.iter().filter_map(|&edge| in_range(n, edge)).collect()
}

/// Undirected neighbor lists for nodes `0..n`, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMap {
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyMap {
    pub fn new(n: usize, edges: &[Edge]) -> Self {
        let mut neighbors = vec![vec![]; n];
        for (a, b) in valid_edges(n, edges) {
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }
        Self { neighbors }
    }

    /// Sorted neighbors of `node`, or `None` when `node >= n`.
    pub fn neighbors(&self, node: usize) -> Option<&[usize]> {
        self.neighbors.get(node).map(Vec::as_slice)
    }

    pub fn lines(&self) -> Vec<String> {
        self.neighbors
            .iter()
            .enumerate()
            .map(|(node, list)| format!("{node}: {list:?}"))
            .collect()
    }
}

pub fn render_adjacency(n: usize, edges: &[Edge]) -> Vec<String> {
    AdjacencyMap::new(n, edges).lines()
}
