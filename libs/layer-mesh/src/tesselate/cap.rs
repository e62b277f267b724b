//! # Cap Filling
//!
//! Triangulates one solid outline and the holes punched into it.
//!
//! `earcutr` does the ear clipping. Its output is then brought in line with
//! what the mesh extractor needs:
//!
//! 1. boundary points earcut filtered as collinear are split back into the
//!    boundary triangle they lie on, so every wall edge has a cap edge
//! 2. near-zero-area triangles are flipped across their longest edge
//! 3. the covered area must match the outline area
//!
//! A hole-free outline earcut cannot finish is fanned around one new
//! centre vertex when that centre sees every edge.

use super::outline::Outline;
use super::Triangle;
use crate::error::{FaultKind, TesselationFault};
use crate::predicates::orient;
use crate::vertex::{VertexId, VertexPool};
use config::constants::{AREA_TOLERANCE, SLIVER_RATIO};
use glam::DVec2;
use std::collections::{HashMap, HashSet};
use tracing::debug;

const FLIP_PASSES: usize = 4;

/// Triangles of one cap and the centre vertex added when fanning.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fill {
    pub triangles: Vec<Triangle>,
    pub steiner: Option<VertexId>,
}

/// Fills `outer` minus `holes`.
///
/// # Errors
///
/// `Unresolved` on the outer outline's contour when neither earcut nor the
/// fan produce a cap covering the outline.
pub(crate) fn fill(
    outer: &Outline,
    holes: &[&Outline],
    pool: &mut VertexPool,
) -> Result<Fill, TesselationFault> {
    let cap = Cap::new(outer, holes);
    let expected = outer.area - holes.iter().map(|h| h.area).sum::<f64>();

    if let Some(faces) = cap.clip().filter(|faces| cap.covers(faces, expected)) {
        return Ok(Fill {
            triangles: cap.triangles(&faces),
            steiner: None,
        });
    }
    if holes.is_empty() {
        if let Some(fill) = fan(outer, pool) {
            debug!(contour = %outer.contour, "earcut failed, fanned around centre");
            return Ok(fill);
        }
    }
    Err(TesselationFault {
        contour: outer.contour,
        vertex: 0,
        kind: FaultKind::Unresolved,
    })
}

/// The outline and its holes flattened into one point list.
struct Cap {
    ids: Vec<VertexId>,
    points: Vec<DVec2>,
    starts: Vec<usize>,
}

impl Cap {
    fn new(outer: &Outline, holes: &[&Outline]) -> Self {
        let total = outer.vertices.len() + holes.iter().map(|h| h.vertices.len()).sum::<usize>();
        let mut cap = Self {
            ids: Vec::with_capacity(total),
            points: Vec::with_capacity(total),
            starts: Vec::with_capacity(holes.len()),
        };
        cap.ids.extend_from_slice(&outer.vertices);
        cap.points.extend_from_slice(&outer.positions);
        for hole in holes {
            cap.starts.push(cap.points.len());
            cap.ids.extend_from_slice(&hole.vertices);
            cap.points.extend_from_slice(&hole.positions);
        }
        cap
    }

    /// Earcut followed by the repair passes. `None` when the result still
    /// misses a point or holds a non-positive triangle.
    fn clip(&self) -> Option<Vec<[usize; 3]>> {
        let flat: Vec<f64> = self.points.iter().flat_map(|p| [p.x, p.y]).collect();
        let indices = earcutr::earcut(&flat, &self.starts, 2).ok()?;

        let mut faces = Vec::with_capacity(indices.len() / 3 + self.starts.len() * 2);
        for t in indices.chunks_exact(3) {
            let (a, b, c) = (t[0], t[1], t[2]);
            if a == b || b == c || a == c {
                continue;
            }
            if orient(self.points[a], self.points[b], self.points[c]) < 0.0 {
                faces.push([a, c, b]);
            } else {
                faces.push([a, b, c]);
            }
        }

        restore_dropped(&self.points, &mut faces)?;
        flip_slivers(&self.points, &mut faces);

        faces
            .iter()
            .all(|f| area2(&self.points, *f) > 0.0)
            .then_some(faces)
    }

    fn covers(&self, faces: &[[usize; 3]], expected: f64) -> bool {
        let covered: f64 = faces.iter().map(|f| area2(&self.points, *f)).sum::<f64>() * 0.5;
        (covered - expected).abs() <= AREA_TOLERANCE * expected.max(1.0)
    }

    fn triangles(&self, faces: &[[usize; 3]]) -> Vec<Triangle> {
        faces
            .iter()
            .map(|&[a, b, c]| [self.ids[a], self.ids[b], self.ids[c]])
            .collect()
    }
}

#[inline]
fn area2(points: &[DVec2], [a, b, c]: [usize; 3]) -> f64 {
    orient(points[a], points[b], points[c])
}

/// Twice the area over the squared longest edge; zero for a flat triangle.
fn quality(points: &[DVec2], face: [usize; 3]) -> f64 {
    let longest = longest_edge(points, face).1;
    if longest == 0.0 {
        0.0
    } else {
        area2(points, face) / longest
    }
}

/// Start slot of the longest edge and its squared length.
fn longest_edge(points: &[DVec2], face: [usize; 3]) -> (usize, f64) {
    (0..3)
        .map(|k| (k, points[face[k]].distance_squared(points[face[(k + 1) % 3]])))
        .fold((0, f64::NEG_INFINITY), |best, e| if e.1 > best.1 { e } else { best })
}

/// Splits every point no face uses into the boundary edge it lies on.
///
/// Returns `None` when a point cannot be placed.
fn restore_dropped(points: &[DVec2], faces: &mut Vec<[usize; 3]>) -> Option<()> {
    let used: HashSet<usize> = faces.iter().flatten().copied().collect();
    let dropped: Vec<usize> = (0..points.len()).filter(|v| !used.contains(v)).collect();

    for v in dropped {
        let directed: HashSet<(usize, usize)> = faces
            .iter()
            .flat_map(|f| (0..3).map(move |k| (f[k], f[(k + 1) % 3])))
            .collect();
        let p = points[v];

        let mut best: Option<(usize, usize, f64)> = None;
        for (fi, f) in faces.iter().enumerate() {
            for k in 0..3 {
                let (i, j) = (f[k], f[(k + 1) % 3]);
                if directed.contains(&(j, i)) {
                    continue;
                }
                let (a, b) = (points[i], points[j]);
                let along = b - a;
                let t = (p - a).dot(along);
                if t <= 0.0 || t >= along.length_squared() {
                    continue;
                }
                let off = orient(a, b, p).abs() / along.length();
                if best.map_or(true, |(_, _, d)| off < d) {
                    best = Some((fi, k, off));
                }
            }
        }

        let (fi, k, _) = best?;
        let f = faces[fi];
        let (i, j, o) = (f[k], f[(k + 1) % 3], f[(k + 2) % 3]);
        let (first, second) = ([i, v, o], [v, j, o]);
        if area2(points, first) <= 0.0 || area2(points, second) <= 0.0 {
            return None;
        }
        faces[fi] = first;
        faces.push(second);
    }
    Some(())
}

/// Flips slivers across their longest edge while that improves the worse
/// of the two triangles involved.
fn flip_slivers(points: &[DVec2], faces: &mut [[usize; 3]]) {
    for _ in 0..FLIP_PASSES {
        let edges: HashMap<(usize, usize), usize> = faces
            .iter()
            .enumerate()
            .flat_map(|(fi, f)| (0..3).map(move |k| ((f[k], f[(k + 1) % 3]), fi)))
            .collect();
        let mut touched = vec![false; faces.len()];
        let mut flipped = 0;

        for fi in 0..faces.len() {
            let face = faces[fi];
            let before = quality(points, face);
            if touched[fi] || before > SLIVER_RATIO {
                continue;
            }
            let k = longest_edge(points, face).0;
            let (p, q, r) = (face[k], face[(k + 1) % 3], face[(k + 2) % 3]);
            let Some(&ni) = edges.get(&(q, p)) else {
                continue;
            };
            if touched[ni] {
                continue;
            }
            let other = faces[ni];
            let Some(s) = other.iter().copied().find(|&x| x != p && x != q) else {
                continue;
            };

            let (first, second) = ([p, s, r], [s, q, r]);
            if area2(points, first) <= 0.0 || area2(points, second) <= 0.0 {
                continue;
            }
            let after = quality(points, first).min(quality(points, second));
            if after <= before.min(quality(points, other)) {
                continue;
            }
            faces[fi] = first;
            faces[ni] = second;
            touched[fi] = true;
            touched[ni] = true;
            flipped += 1;
        }
        if flipped == 0 {
            break;
        }
    }
}

/// Fans a counter-clockwise outline around its area centroid.
///
/// `None` unless the centroid lies strictly left of every edge.
fn fan(outer: &Outline, pool: &mut VertexPool) -> Option<Fill> {
    let ring = &outer.positions;
    let n = ring.len();
    let origin = ring[0];
    let (mut twice_area, mut sum) = (0.0, DVec2::ZERO);
    for i in 0..n {
        let (a, b) = (ring[i] - origin, ring[(i + 1) % n] - origin);
        let cross = a.perp_dot(b);
        twice_area += cross;
        sum += (a + b) * cross;
    }
    if twice_area <= 0.0 {
        return None;
    }
    let centre = origin + sum / (3.0 * twice_area);
    if (0..n).any(|i| orient(ring[i], ring[(i + 1) % n], centre) <= 0.0) {
        return None;
    }

    let nearest = (0..n).min_by(|&a, &b| {
        ring[a]
            .distance_squared(centre)
            .total_cmp(&ring[b].distance_squared(centre))
    })?;
    let plated = pool.get(outer.vertices[nearest]).is_some_and(|v| v.plated);
    let steiner = pool.add(centre.x, centre.y, plated);
    let triangles = (0..n)
        .map(|i| [outer.vertices[i], outer.vertices[(i + 1) % n], steiner])
        .collect();
    Some(Fill {
        triangles,
        steiner: Some(steiner),
    })
}
