//! Benchmarks for mesh simplification.
//!
//! Run with: cargo bench -p mesh-simplify
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-simplify -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-simplify -- --baseline main

use std::f64::consts::PI;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use mesh_simplify::{DecimateParams, Mesh, MeshTopology, Vertex, decimate_mesh, quadric};

/// Create a closed UV sphere with `2 + (rings - 1) * segments` vertices.
fn create_sphere(rings: usize, segments: usize) -> Mesh {
    let mut mesh = Mesh::new();

    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0));
    for r in 1..rings {
        let phi = PI * r as f64 / rings as f64;
        for s in 0..segments {
            let theta = 2.0 * PI * s as f64 / segments as f64;
            mesh.vertices.push(Vertex::from_coords(
                phi.sin() * theta.cos(),
                phi.sin() * theta.sin(),
                phi.cos(),
            ));
        }
    }
    let south = mesh.vertices.len() as u32;
    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, -1.0));

    let ring = |k: usize, s: usize| (1 + k * segments + s % segments) as u32;

    for s in 0..segments {
        mesh.faces.push([0, ring(0, s), ring(0, s + 1)]);
    }
    for k in 0..rings - 2 {
        for s in 0..segments {
            mesh.faces
                .push([ring(k, s), ring(k + 1, s), ring(k + 1, s + 1)]);
            mesh.faces
                .push([ring(k, s), ring(k + 1, s + 1), ring(k, s + 1)]);
        }
    }
    for s in 0..segments {
        mesh.faces
            .push([south, ring(rings - 2, s + 1), ring(rings - 2, s)]);
    }

    mesh
}

fn bench_topology_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("topology_build");

    for (rings, segments) in [(16, 24), (32, 48), (64, 96)] {
        let mesh = create_sphere(rings, segments);
        group.bench_with_input(
            BenchmarkId::from_parameter(mesh.vertex_count()),
            &mesh,
            |b, mesh| b.iter(|| MeshTopology::build(black_box(mesh))),
        );
    }

    group.finish();
}

fn bench_initial_quadrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("initial_quadrics");

    for (rings, segments) in [(16, 24), (32, 48)] {
        let mesh = create_sphere(rings, segments);
        let topo = MeshTopology::build(&mesh);
        group.bench_with_input(
            BenchmarkId::from_parameter(mesh.vertex_count()),
            &topo,
            |b, topo| b.iter(|| quadric::vertex_quadrics(black_box(topo))),
        );
    }

    group.finish();
}

fn bench_decimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimate");
    group.sample_size(20);

    for (rings, segments) in [(16, 24), (32, 48)] {
        let mesh = create_sphere(rings, segments);
        let target = mesh.vertex_count() / 2;
        let params = DecimateParams::with_target_vertices(target);

        group.bench_with_input(
            BenchmarkId::new("half", mesh.vertex_count()),
            &mesh,
            |b, mesh| b.iter(|| decimate_mesh(black_box(mesh), &params).unwrap()),
        );
    }

    // Deep decimation stresses the lazy-invalidation queue: most popped
    // entries late in the run are stale.
    let mesh = create_sphere(32, 48);
    let params = DecimateParams::with_target_vertices(mesh.vertex_count() / 10);
    group.bench_function(BenchmarkId::new("tenth", mesh.vertex_count()), |b| {
        b.iter(|| decimate_mesh(black_box(&mesh), &params).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_topology_build,
    bench_initial_quadrics,
    bench_decimate
);
criterion_main!(benches);
