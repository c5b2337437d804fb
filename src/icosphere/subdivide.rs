//! Edge and face subdivision
//!
//! Every base edge is split into `degree` segments first, so neighbouring
//! base faces share the same inserted nodes and sub-edges. Each base face is
//! then filled with a triangular grid of nodes and cut into `degree²`
//! triangles: `degree(degree+1)/2` pointing up, the rest pointing down.
//!
//! Grid layout for one base face (`degree = 3`, indices into the face grid):
//!
//! ```text
//!          9            <- n2
//!        7   8
//!      4   5   6
//!    0   1   2   3      <- n0 ... n1
//! ```
//!
//! Positions are interpolated linearly and only projected onto the sphere
//! once the whole mesh is built.

use glam::DVec3;

use super::base;
use super::{IcoEdge, IcoFace, IcoNode};

/// Nodes and sub-edges inserted along one base edge, from its first endpoint
#[derive(Debug, Clone)]
struct EdgeSplit {
    first: usize,
    nodes: Vec<usize>,
    edges: Vec<usize>,
}

/// An [`EdgeSplit`] read from one face's point of view
#[derive(Debug, Clone, Copy)]
struct SplitView<'a> {
    split: &'a EdgeSplit,
    reversed: bool,
}

impl<'a> SplitView<'a> {
    /// View `split` walking away from `start`
    fn from(split: &'a EdgeSplit, start: usize) -> Self {
        Self {
            split,
            reversed: split.first != start,
        }
    }

    #[inline]
    fn node(&self, k: usize) -> usize {
        if self.reversed {
            self.split.nodes[self.split.nodes.len() - 1 - k]
        } else {
            self.split.nodes[k]
        }
    }

    #[inline]
    fn edge(&self, k: usize) -> usize {
        if self.reversed {
            self.split.edges[self.split.edges.len() - 1 - k]
        } else {
            self.split.edges[k]
        }
    }
}

/// Arena of nodes, edges and faces under construction
#[derive(Debug, Default)]
pub(super) struct MeshArena {
    pub nodes: Vec<IcoNode>,
    pub edges: Vec<IcoEdge>,
    pub faces: Vec<IcoFace>,
}

impl MeshArena {
    fn with_capacity(degree: usize) -> Self {
        let d2 = degree * degree;
        Self {
            nodes: Vec::with_capacity(10 * d2 + 2),
            edges: Vec::with_capacity(30 * d2),
            faces: Vec::with_capacity(20 * d2),
        }
    }

    fn add_node(&mut self, position: DVec3) -> usize {
        self.nodes.push(IcoNode::new(position));
        self.nodes.len() - 1
    }

    /// Add an edge and register it with both endpoints
    fn connect(&mut self, a: usize, b: usize) -> usize {
        let index = self.edges.len();
        self.edges.push(IcoEdge::new(a, b));
        self.nodes[a].edges.push(index);
        self.nodes[b].edges.push(index);
        index
    }

    /// Add a face given its ring edges and register it everywhere
    fn add_face(&mut self, nodes: [usize; 3], ring: [usize; 3]) {
        let index = self.faces.len();
        // Stored edge i is the one opposite node i
        let edges = [ring[1], ring[2], ring[0]];
        for &n in &nodes {
            self.nodes[n].faces.push(index);
        }
        for &e in &edges {
            self.edges[e].faces.push(index);
        }
        self.faces.push(IcoFace::new(nodes, edges));
    }
}

/// Subdivide the base icosahedron into `degree²` triangles per face
///
/// `degree` must be at least 1; `degree = 1` reproduces the icosahedron.
pub(super) fn subdivide(degree: usize) -> MeshArena {
    let d = degree;
    let mut arena = MeshArena::with_capacity(d);

    for p in base::positions() {
        arena.add_node(p);
    }

    let splits: Vec<EdgeSplit> = base::EDGES
        .iter()
        .map(|&[a, b]| split_edge(&mut arena, a, b, d))
        .collect();

    for &(nodes, ring) in base::FACES.iter() {
        let e0 = SplitView::from(&splits[ring[0]], nodes[0]);
        let e1 = SplitView::from(&splits[ring[1]], nodes[1]);
        let e2 = SplitView::from(&splits[ring[2]], nodes[0]);
        subdivide_face(&mut arena, nodes, [e0, e1, e2], d);
    }

    arena
}

fn split_edge(arena: &mut MeshArena, a: usize, b: usize, d: usize) -> EdgeSplit {
    let p0 = arena.nodes[a].position;
    let p1 = arena.nodes[b].position;
    let mut split = EdgeSplit {
        first: a,
        nodes: Vec::with_capacity(d.saturating_sub(1)),
        edges: Vec::with_capacity(d),
    };

    arena.nodes[a].edges.push(arena.edges.len());
    let mut prior = a;
    for s in 1..d {
        let edge = arena.edges.len();
        let node = arena.nodes.len();
        split.edges.push(edge);
        split.nodes.push(node);
        arena.edges.push(IcoEdge::new(prior, node));
        prior = node;

        let mut inserted = IcoNode::new(p0.lerp(p1, s as f64 / d as f64));
        inserted.edges = vec![edge, edge + 1];
        arena.nodes.push(inserted);
    }
    split.edges.push(arena.edges.len());
    arena.nodes[b].edges.push(arena.edges.len());
    arena.edges.push(IcoEdge::new(prior, b));

    split
}

fn subdivide_face(arena: &mut MeshArena, corners: [usize; 3], sides: [SplitView<'_>; 3], d: usize) {
    let [n0, n1, n2] = corners;
    let [e0, e1, e2] = sides;

    // Node grid, bottom row first
    let mut grid = Vec::with_capacity((d + 1) * (d + 2) / 2);
    grid.push(n0);
    grid.extend((0..d - 1).map(|k| e0.node(k)));
    grid.push(n1);
    for s in 1..d {
        let left = e2.node(s - 1);
        let right = e1.node(s - 1);
        let (p0, p1) = (arena.nodes[left].position, arena.nodes[right].position);
        grid.push(left);
        for t in 1..d - s {
            grid.push(arena.add_node(p0.lerp(p1, t as f64 / (d - s) as f64)));
        }
        grid.push(right);
    }
    grid.push(n2);

    // Horizontal edges, row by row
    let mut rows = Vec::with_capacity(d * (d + 1) / 2);
    rows.extend((0..d).map(|k| e0.edge(k)));
    let mut at = d + 1;
    for s in 1..d {
        for _ in 0..d - s {
            rows.push(arena.connect(grid[at], grid[at + 1]));
            at += 1;
        }
        at += 1;
    }

    // Edges rising to the left (parallel to n1 -> n2)
    let mut rising = Vec::with_capacity(d * (d + 1) / 2);
    at = 1;
    for s in 0..d {
        for _ in 1..d - s {
            rising.push(arena.connect(grid[at], grid[at + d - s]));
            at += 1;
        }
        rising.push(e1.edge(s));
        at += 2;
    }

    // Edges rising to the right (parallel to n0 -> n2)
    let mut climbing = Vec::with_capacity(d * (d + 1) / 2);
    at = 1;
    for s in 0..d {
        climbing.push(e2.edge(s));
        for _ in 1..d - s {
            climbing.push(arena.connect(grid[at], grid[at + d - s + 1]));
            at += 1;
        }
        at += 2;
    }

    // Upward triangles
    at = 0;
    let mut k = 0;
    for s in 0..d {
        for _ in 0..d - s {
            arena.add_face(
                [grid[at], grid[at + 1], grid[at + d - s + 1]],
                [rows[k], rising[k], climbing[k]],
            );
            at += 1;
            k += 1;
        }
        at += 1;
    }

    // Downward triangles
    at = 1;
    k = 0;
    for s in 1..d {
        for _ in 0..d - s {
            arena.add_face(
                [grid[at], grid[at + d - s + 2], grid[at + d - s + 1]],
                [climbing[k + 1], rows[k + d - s + 1], rising[k]],
            );
            at += 1;
            k += 1;
        }
        at += 2;
        k += 1;
    }
}
