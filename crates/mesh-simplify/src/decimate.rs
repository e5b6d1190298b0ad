//! Mesh decimation using edge collapse with quadric error metrics.
//!
//! This module provides mesh simplification by iteratively contracting
//! vertex pairs while minimizing geometric error, following the
//! Garland–Heckbert quadric error metric (QEM) formulation.
//!
//! The loop pops the cheapest candidate edge from a min-priority queue,
//! re-validates it against the current topology (lazy invalidation: stale
//! entries are discarded at pop time, never eagerly removed), contracts it
//! in place, refreshes the surviving vertex's quadric, and re-seeds the
//! queue with updated costs for the surviving vertex's neighborhood.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, info, trace, warn};

use crate::compact::compact_mesh;
use crate::error::{MeshError, MeshResult};
use crate::quadric::{self, Quadric};
use crate::topology::MeshTopology;
use crate::types::Mesh;

/// Parameters for mesh decimation.
#[derive(Debug, Clone)]
pub struct DecimateParams {
    /// Target number of vertices in the simplified mesh. The loop stops as
    /// soon as the live vertex count reaches this value; if the candidate
    /// queue drains first, the result reports more vertices than requested.
    pub target_vertices: usize,
}

impl DecimateParams {
    /// Create params targeting a specific vertex count.
    pub fn with_target_vertices(count: usize) -> Self {
        Self {
            target_vertices: count,
        }
    }
}

/// Result of mesh decimation.
#[derive(Debug, Clone)]
pub struct DecimateResult {
    /// The decimated mesh.
    pub mesh: Mesh,
    /// Number of vertices in the original mesh.
    pub original_vertices: usize,
    /// Number of vertices in the decimated mesh. Equals the requested
    /// target unless the candidate queue was exhausted first.
    pub final_vertices: usize,
    /// Number of faces in the original mesh.
    pub original_faces: usize,
    /// Number of faces in the decimated mesh.
    pub final_faces: usize,
    /// Number of pair contractions performed.
    pub collapses_performed: usize,
    /// Number of candidates rejected by the manifold or boundary guards.
    pub collapses_rejected: usize,
    /// True if the queue drained before the target vertex count was reached.
    pub queue_exhausted: bool,
}

impl DecimateResult {
    /// Whether the requested vertex count was actually reached.
    pub fn reached_target(&self, params: &DecimateParams) -> bool {
        self.final_vertices <= params.target_vertices
    }
}

/// A candidate pair contraction in the priority queue.
///
/// An entry is a *proposal*, not a live fact: its cached position and cost
/// were valid when it was pushed. The consumer re-validates endpoints and
/// local topology at pop time and simply discards entries that no longer
/// apply.
#[derive(Debug, Clone)]
struct CandidatePair {
    v1: u32,
    v2: u32,
    /// Optimal merged position computed when the pair was enqueued.
    position: [f64; 3],
    /// Contraction cost at `position`; may be slightly negative near
    /// degenerate configurations and is compared as-is.
    cost: f64,
}

impl PartialEq for CandidatePair {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CandidatePair {}

impl PartialOrd for CandidatePair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidatePair {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed comparison so BinaryHeap (a max-heap) pops the minimum.
        // Cost first, then position, then the index pair: a total,
        // reproducible order even across equal costs.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.position[0].total_cmp(&self.position[0]))
            .then_with(|| other.position[1].total_cmp(&self.position[1]))
            .then_with(|| other.position[2].total_cmp(&self.position[2]))
            .then_with(|| other.v1.cmp(&self.v1))
            .then_with(|| other.v2.cmp(&self.v2))
    }
}

/// Min-priority queue of candidate pair contractions.
///
/// A thin wrapper over [`BinaryHeap`]; consistency with the mesh is the
/// consumer's concern. Entries invalidated by a contraction are left in
/// place and filtered out when popped (lazy invalidation), which trades a
/// larger heap for not needing decrease-key semantics.
struct CollapseQueue {
    heap: BinaryHeap<CandidatePair>,
}

impl CollapseQueue {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// O(log n) insert.
    fn push(&mut self, entry: CandidatePair) {
        self.heap.push(entry);
    }

    /// O(log n) remove-and-return of the minimum-cost entry, or None when
    /// no entries remain.
    fn pop_min(&mut self) -> Option<CandidatePair> {
        self.heap.pop()
    }
}

/// Compute the optimal merged position and contraction cost for a pair.
///
/// The combined quadric's stationary point is used when the solve is
/// well-conditioned; otherwise the midpoint of the two endpoints stands in
/// and the condition is reported as a diagnostic, not a failure.
fn evaluate_pair(v1: u32, v2: u32, quadrics: &[Quadric], topo: &MeshTopology) -> CandidatePair {
    let combined = quadrics[v1 as usize] + quadrics[v2 as usize];

    let position = match combined.minimizer() {
        Some(p) => p,
        None => {
            debug!(
                target: "mesh_simplify::decimate",
                v1, v2,
                "singular quadric system, falling back to edge midpoint"
            );
            let p1 = &topo.positions[v1 as usize];
            let p2 = &topo.positions[v2 as usize];
            nalgebra::center(p1, p2)
        }
    };

    let cost = combined.evaluate(position.x, position.y, position.z);

    CandidatePair {
        v1,
        v2,
        position: [position.x, position.y, position.z],
        cost,
    }
}

/// Decimate a mesh to a target vertex count using quadric edge collapse.
///
/// Every candidate that would produce non-manifold topology or collapse a
/// boundary edge is skipped, never fatal. The only error is an empty input
/// mesh; a drained queue before the target is reached is reported through
/// [`DecimateResult::queue_exhausted`] and a `final_vertices` above the
/// target.
///
/// # Example
/// ```
/// use mesh_simplify::{decimate_mesh, DecimateParams, Mesh, Vertex};
///
/// let mut mesh = Mesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.5, 0.5, 1.0));
/// mesh.faces.push([0, 2, 1]);
/// mesh.faces.push([0, 1, 3]);
/// mesh.faces.push([1, 2, 3]);
/// mesh.faces.push([2, 0, 3]);
///
/// let result = decimate_mesh(&mesh, &DecimateParams::with_target_vertices(4)).unwrap();
/// assert_eq!(result.final_vertices, 4);
/// ```
pub fn decimate_mesh(mesh: &Mesh, params: &DecimateParams) -> MeshResult<DecimateResult> {
    if mesh.is_empty() {
        return Err(MeshError::empty_mesh("cannot decimate an empty mesh"));
    }

    let original_vertices = mesh.vertex_count();
    let original_faces = mesh.face_count();
    let target = params.target_vertices;

    // Already at or below target: nothing to do.
    if original_vertices <= target {
        return Ok(DecimateResult {
            mesh: mesh.clone(),
            original_vertices,
            final_vertices: original_vertices,
            original_faces,
            final_faces: original_faces,
            collapses_performed: 0,
            collapses_rejected: 0,
            queue_exhausted: false,
        });
    }

    info!(
        target: "mesh_simplify::decimate",
        vertices = original_vertices,
        faces = original_faces,
        target_vertices = target,
        "starting decimation"
    );

    let mut topo = MeshTopology::build(mesh);
    let mut quadrics = quadric::vertex_quadrics(&topo);

    // Liveness masks over the original, fixed-capacity arrays. Nothing is
    // physically removed until the final compaction pass.
    let mut vertex_alive = vec![true; original_vertices];
    let mut face_alive = vec![true; original_faces];
    let mut live_vertices = original_vertices;
    let mut live_faces = original_faces;

    // Seed the queue with every distinct edge of the input.
    let mut queue = CollapseQueue::new();
    for &(a, b) in &topo.edges {
        queue.push(evaluate_pair(a, b, &quadrics, &topo));
    }

    let mut collapses_performed = 0;
    let mut collapses_rejected = 0;
    let mut queue_exhausted = false;

    while live_vertices > target {
        let Some(candidate) = queue.pop_min() else {
            queue_exhausted = true;
            warn!(
                target: "mesh_simplify::decimate",
                live_vertices,
                target_vertices = target,
                "candidate queue exhausted before reaching target"
            );
            break;
        };

        let v1 = candidate.v1;
        let v2 = candidate.v2;

        // Stale entry: one of the endpoints was merged away after this
        // proposal was enqueued.
        if !vertex_alive[v1 as usize] || !vertex_alive[v2 as usize] {
            continue;
        }

        // Manifold guard: the endpoints of a collapsible edge must share
        // exactly two neighbor vertices (the triangle apexes on either
        // side). Anything else would pinch the surface.
        let shared_vertices: Vec<u32> = topo.vertex_adjacency[v1 as usize]
            .intersection(&topo.vertex_adjacency[v2 as usize])
            .copied()
            .collect();
        if shared_vertices.len() != 2 {
            trace!(
                target: "mesh_simplify::decimate",
                v1, v2,
                shared = shared_vertices.len(),
                "rejecting non-manifold pair"
            );
            collapses_rejected += 1;
            continue;
        }

        // Boundary guard: exactly two shared incident faces. One shared
        // face means a boundary edge; more means non-manifold topology.
        let shared_faces: Vec<u32> = topo.vertex_faces[v1 as usize]
            .intersection(&topo.vertex_faces[v2 as usize])
            .copied()
            .collect();
        if shared_faces.len() != 2 {
            trace!(
                target: "mesh_simplify::decimate",
                v1, v2,
                shared = shared_faces.len(),
                "rejecting boundary or non-manifold pair"
            );
            collapses_rejected += 1;
            continue;
        }

        // Contract: merge v2 into v1 at the cached optimal position.
        topo.positions[v1 as usize] =
            nalgebra::Point3::new(candidate.position[0], candidate.position[1], candidate.position[2]);

        vertex_alive[v2 as usize] = false;
        live_vertices -= 1;

        // The two shared faces degenerate to a line; kill them and drop
        // them from every incidence set so live vertices only ever hold
        // live faces.
        for &f in &shared_faces {
            face_alive[f as usize] = false;
            let corners = topo.faces[f as usize];
            for &u in &corners {
                topo.vertex_faces[u as usize].remove(&f);
            }
        }
        live_faces -= 2;

        // Rewire adjacency: v1 absorbs v2's exclusive neighbors, and every
        // set that referenced v2 is repointed at v1 (or just drops v2, for
        // the two shared apex vertices that already know v1).
        topo.vertex_adjacency[v1 as usize].remove(&v2);
        let v2_exclusive: Vec<u32> = topo.vertex_adjacency[v2 as usize]
            .iter()
            .copied()
            .filter(|&n| n != v1 && !shared_vertices.contains(&n))
            .collect();
        for &n in &v2_exclusive {
            topo.vertex_adjacency[n as usize].remove(&v2);
            topo.vertex_adjacency[n as usize].insert(v1);
            topo.vertex_adjacency[v1 as usize].insert(n);
        }
        for &s in &shared_vertices {
            topo.vertex_adjacency[s as usize].remove(&v2);
        }

        // v1 inherits v2's surviving faces (the shared ones are already
        // dead and removed).
        let v2_faces: Vec<u32> = topo.vertex_faces[v2 as usize].iter().copied().collect();
        for &f in &v2_faces {
            topo.vertex_faces[v1 as usize].insert(f);
        }

        // Rewrite v2 -> v1 in every face now incident to v1 and refresh
        // the cached plane data those faces contribute to quadrics.
        let incident: Vec<u32> = topo.vertex_faces[v1 as usize].iter().copied().collect();
        for &f in &incident {
            for idx in topo.faces[f as usize].iter_mut() {
                if *idx == v2 {
                    *idx = v1;
                }
            }
            topo.refresh_face(f);
        }

        // Refresh v1's quadric from scratch from its current incident
        // faces; incremental Q1 + Q2 would drift across many merges.
        quadrics[v1 as usize] =
            quadric::vertex_quadric(&topo.vertex_faces[v1 as usize], &topo.face_normals, &topo.face_centers);

        collapses_performed += 1;

        // Re-seed costs for the surviving vertex's new neighborhood. Older
        // entries for these pairs stay in the queue; they are discarded at
        // pop time if no longer valid.
        let neighbors: Vec<u32> = topo.vertex_adjacency[v1 as usize].iter().copied().collect();
        for n in neighbors {
            queue.push(evaluate_pair(v1, n, &quadrics, &topo));
        }
    }

    let final_mesh = compact_mesh(&topo.positions, &vertex_alive, &topo.faces, &face_alive);

    info!(
        target: "mesh_simplify::decimate",
        final_vertices = live_vertices,
        final_faces = live_faces,
        collapses_performed,
        collapses_rejected,
        queue_exhausted,
        "decimation finished"
    );

    Ok(DecimateResult {
        mesh: final_mesh,
        original_vertices,
        final_vertices: live_vertices,
        original_faces,
        final_faces: live_faces,
        collapses_performed,
        collapses_rejected,
        queue_exhausted,
    })
}
