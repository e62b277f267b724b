//! Property-based tests for tesselation and extrusion invariants.
//!
//! Run with: cargo test -p layer-mesh --test properties

use glam::DVec2;
use layer_mesh::{normalize_windings, ArcParams, ContourSet, Triangle};
use proptest::prelude::*;
use std::f64::consts::TAU;

// =============================================================================
// Strategies
// =============================================================================

/// A simple polygon, star-shaped around the origin, counter-clockwise.
///
/// Angles increase strictly and no gap exceeds a quarter turn, so the
/// origin is always well inside.
fn arb_star(min: usize, max: usize) -> impl Strategy<Value = Vec<DVec2>> {
    (min..=max).prop_flat_map(|n| {
        prop::collection::vec((0.0..0.5f64, 0.5..5.0f64), n).prop_map(move |spokes| {
            spokes
                .iter()
                .enumerate()
                .map(|(i, &(jitter, radius))| {
                    let theta = TAU * (i as f64 + jitter) / n as f64;
                    radius * DVec2::new(theta.cos(), theta.sin())
                })
                .collect()
        })
    })
}

/// A comb: `teeth` fingers of width 0.5 on a base of height 0.5, rotated
/// and moved off the origin. Far from star-shaped for more than two teeth.
fn arb_comb() -> impl Strategy<Value = Vec<DVec2>> {
    (2usize..9)
        .prop_flat_map(|teeth| {
            (
                prop::collection::vec(1.0..5.0f64, teeth),
                0.0..TAU,
                (-50.0..50.0f64, -50.0..50.0f64),
            )
        })
        .prop_map(|(heights, angle, (dx, dy))| {
            let base = 0.5;
            let last = heights.len() - 1;
            let mut points = vec![DVec2::ZERO];
            for (i, &h) in heights.iter().enumerate().rev() {
                let x = i as f64;
                points.push(DVec2::new(x + 0.5, if i == last { 0.0 } else { base }));
                points.push(DVec2::new(x + 0.5, h));
                points.push(DVec2::new(x, h));
                if i > 0 {
                    points.push(DVec2::new(x, base));
                }
            }
            let rotation = DVec2::from_angle(angle);
            let offset = DVec2::new(dx, dy);
            points.iter().map(|&p| offset + rotation.rotate(p)).collect()
        })
}

/// A drill in one cell of a 4 x 4 grid over a 20 x 20 board: circle or
/// rotated square, off the cell centre, never reaching the cell border.
#[derive(Debug, Clone, Copy)]
struct Drill {
    circle: bool,
    radius: f64,
    angle: f64,
    shift: DVec2,
}

fn arb_drills() -> impl Strategy<Value = Vec<Option<Drill>>> {
    let drill = (any::<bool>(), 0.3..1.2f64, 0.0..90.0f64, -1.0..1.0f64, -1.0..1.0f64).prop_map(
        |(circle, radius, angle, sx, sy)| Drill {
            circle,
            radius,
            angle,
            shift: DVec2::new(sx, sy),
        },
    );
    prop::collection::vec(prop::option::weighted(0.7, drill), 16)
}

fn board_with_drills(drills: &[Option<Drill>]) -> ContourSet {
    let mut set = ContourSet::new();
    let board = [
        DVec2::new(0.0, 0.0),
        DVec2::new(20.0, 0.0),
        DVec2::new(20.0, 20.0),
        DVec2::new(0.0, 20.0),
    ];
    set.add_polygon(&board, 0.0, 0.0, 0.0, false, false).unwrap();
    for (cell, drill) in drills.iter().enumerate() {
        let Some(d) = drill else {
            continue;
        };
        let centre = DVec2::new(2.5 + 5.0 * (cell % 4) as f64, 2.5 + 5.0 * (cell / 4) as f64) + d.shift;
        if d.circle {
            set.add_circle(centre.x, centre.y, d.radius, true, true).unwrap();
        } else {
            let r = d.radius;
            let corners = [DVec2::new(r, 0.0), DVec2::new(0.0, r), DVec2::new(-r, 0.0), DVec2::new(0.0, -r)];
            set.add_polygon(&corners, centre.x, centre.y, d.angle, true, true).unwrap();
        }
    }
    set
}

fn build(points: &[DVec2], reversed: bool) -> ContourSet {
    let mut set = ContourSet::new();
    let id = set.new_contour(false, false).unwrap();
    let mut push = |p: &DVec2| {
        set.push_vertex(id, p.x, p.y).unwrap();
    };
    if reversed {
        points.iter().rev().for_each(&mut push);
    } else {
        points.iter().for_each(&mut push);
    }
    set
}

fn polygon_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f64>()
        * 0.5
}

fn covered_area(set: &ContourSet, triangles: &[Triangle]) -> f64 {
    triangles
        .iter()
        .map(|t| {
            let [a, b, c] = t.map(|v| set.vertex(v).map(|v| v.position).unwrap_or_default());
            0.5 * (b - a).perp_dot(c - a)
        })
        .sum()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn simple_polygon_gives_n_minus_two(points in arb_star(6, 40)) {
        let mut set = build(&points, false);
        let triangles = set.tesselate().unwrap().to_vec();
        prop_assert_eq!(triangles.len(), points.len() - 2);
    }

    #[test]
    fn area_is_conserved(points in arb_star(6, 40), reversed in any::<bool>()) {
        let mut set = build(&points, reversed);
        let triangles = set.tesselate().unwrap().to_vec();
        let expected = polygon_area(&points);
        let got = covered_area(&set, &triangles);
        prop_assert!((got - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn hole_area_is_subtracted(points in arb_star(6, 30), r in 0.05..0.2f64) {
        let mut set = build(&points, false);
        let hole = set.add_circle(0.0, 0.0, r, true, false).unwrap();
        let hole_area = set.contour(hole).unwrap().signed_area().abs();
        let triangles = set.tesselate().unwrap().to_vec();
        let expected = polygon_area(&points) - hole_area;
        let got = covered_area(&set, &triangles);
        prop_assert!((got - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn winding_normalization_is_idempotent(points in arb_star(6, 20), reversed in any::<bool>(), hole in any::<bool>()) {
        let mut set = build(&points, reversed);
        let id = set.contours()[0].id();
        set.ensure_winding(id, hole).unwrap();
        let first = set.contours()[0].clone();
        prop_assert!(!set.ensure_winding(id, hole).unwrap());
        prop_assert_eq!(&set.contours()[0], &first);

        normalize_windings(&mut set);
        prop_assert_eq!(normalize_windings(&mut set), 0);
        prop_assert!(set.contours()[0].is_ccw());
    }

    #[test]
    fn circle_segments_monotone_and_capped(
        max_segments in 3u32..200,
        min_chord in 0.01..1.0f64,
        extra in 0.0..2.0f64,
        r1 in 0.001..50.0f64,
        r2 in 0.001..50.0f64,
    ) {
        let params = ArcParams::new(max_segments, min_chord, min_chord + extra).unwrap();
        let (small, large) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        let a = params.circle_segments(small);
        let b = params.circle_segments(large);
        prop_assert!(a <= b);
        prop_assert!(b <= max_segments);
        prop_assert!(a >= 3);
    }

    #[test]
    fn comb_gives_n_minus_two_and_conserves_area(points in arb_comb(), reversed in any::<bool>()) {
        let mut set = build(&points, reversed);
        let triangles = set.tesselate().unwrap().to_vec();
        prop_assert_eq!(triangles.len(), points.len() - 2);

        let expected = polygon_area(&points);
        let got = covered_area(&set, &triangles);
        prop_assert!((got - expected).abs() <= 1e-9 * expected.max(1.0));

        let sheet = set.to_2d_mesh(0.0, true).unwrap();
        prop_assert!(sheet.validate());
        let solid = set.to_3d_mesh(1.6, 0.0).unwrap();
        prop_assert_eq!(solid.boundary_edge_count(), 0);
        prop_assert!(solid.validate());
    }

    #[test]
    fn board_with_many_drills_is_valid(drills in arb_drills()) {
        let mut set = board_with_drills(&drills);
        let drilled: f64 = set.contours()[1..].iter().map(|c| c.signed_area().abs()).sum();
        set.tesselate().unwrap();

        let sheet = set.to_2d_mesh(0.0, true).unwrap();
        let expected = 400.0 - drilled;
        prop_assert!((sheet.area() - expected).abs() <= 1e-9 * expected);
        prop_assert!(sheet.validate());

        let solid = set.to_3d_mesh(1.6, 0.0).unwrap();
        prop_assert_eq!(solid.boundary_edge_count(), 0);
        prop_assert!(solid.validate());
    }

    #[test]
    fn overlapping_plated_holes_merge_into_one(dx in 0.5..3.5f64, dy in 0.5..3.5f64) {
        let mut set = ContourSet::new();
        let board = [
            DVec2::new(0.0, 0.0),
            DVec2::new(20.0, 0.0),
            DVec2::new(20.0, 20.0),
            DVec2::new(0.0, 20.0),
        ];
        let drill = [
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 4.0),
            DVec2::new(0.0, 4.0),
        ];
        set.add_polygon(&board, 0.0, 0.0, 0.0, false, false).unwrap();
        set.add_polygon(&drill, 5.0, 5.0, 0.0, true, true).unwrap();
        set.add_polygon(&drill, 5.0 + dx, 5.0 + dy, 0.0, true, true).unwrap();
        set.tesselate().unwrap();

        let sheet = set.to_2d_mesh(0.0, true).unwrap();
        let union = 32.0 - (4.0 - dx) * (4.0 - dy);
        prop_assert!((sheet.area() - (400.0 - union)).abs() <= 1e-6);
        prop_assert_eq!(sheet.vertex_count(), 12);
        // The two points where the drills cross are plated like the drills
        prop_assert_eq!(sheet.plated.iter().filter(|&&p| p).count(), 8);
        prop_assert!(sheet.validate());

        let solid = set.to_3d_mesh(1.6, 0.0).unwrap();
        prop_assert_eq!(solid.boundary_edge_count(), 0);
        prop_assert!(solid.validate());
    }

    #[test]
    fn extrusion_is_closed(points in arb_star(6, 30), with_hole in any::<bool>(), height in 0.01..5.0f64) {
        let mut set = build(&points, false);
        let mut edges = points.len();
        if with_hole {
            let id = set.add_circle(0.0, 0.0, 0.1, true, false).unwrap();
            edges += set.contour(id).unwrap().len();
        }
        set.tesselate().unwrap();
        let mesh = set.to_3d_mesh(height, 0.0).unwrap();
        prop_assert_eq!(mesh.side_faces.len(), 2 * edges);
        prop_assert_eq!(mesh.boundary_edge_count(), 0);
        prop_assert!(mesh.validate());
    }
}
