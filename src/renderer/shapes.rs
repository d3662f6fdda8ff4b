//! Shape generation for 3D primitives
//!
//! Wireframes come out as line lists (two vertices per edge), solids as
//! triangle lists.

use glam::Vec3;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// The 8 corners of an axis-aligned box
fn box_corners(center: Vec3, size: Vec3) -> [Vec3; 8] {
    let h = size * 0.5;
    let mut corners = [Vec3::ZERO; 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        let sx = if i & 1 == 0 { -h.x } else { h.x };
        let sy = if i & 2 == 0 { -h.y } else { h.y };
        let sz = if i & 4 == 0 { -h.z } else { h.z };
        *corner = center + Vec3::new(sx, sy, sz);
    }
    corners
}

/// Corner index pairs for the 12 box edges
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Generate line-list vertices for the edges of a box
pub fn box_edges(center: Vec3, size: Vec3, color: [f32; 4]) -> Vec<Vertex> {
    let corners = box_corners(center, size);
    let mut vertices = Vec::with_capacity(BOX_EDGES.len() * 2);
    for (a, b) in BOX_EDGES {
        vertices.push(Vertex::at(corners[a], color));
        vertices.push(Vertex::at(corners[b], color));
    }
    vertices
}

/// Generate triangle-list vertices for a filled UV sphere
pub fn sphere(center: Vec3, radius: f32, color: [f32; 4], rings: u32, segments: u32) -> Vec<Vertex> {
    let point = |ring: u32, seg: u32| {
        let phi = PI * ring as f32 / rings as f32;
        let theta = 2.0 * PI * seg as f32 / segments as f32;
        center
            + radius * Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
    };

    let mut vertices = Vec::with_capacity((rings * segments * 6) as usize);
    for ring in 0..rings {
        for seg in 0..segments {
            let p00 = point(ring, seg);
            let p01 = point(ring, seg + 1);
            let p10 = point(ring + 1, seg);
            let p11 = point(ring + 1, seg + 1);

            // Two triangles per quad
            vertices.push(Vertex::at(p00, color));
            vertices.push(Vertex::at(p10, color));
            vertices.push(Vertex::at(p01, color));

            vertices.push(Vertex::at(p01, color));
            vertices.push(Vertex::at(p10, color));
            vertices.push(Vertex::at(p11, color));
        }
    }
    vertices
}

/// Corner cycles for the 6 box faces
const BOX_FACES: [[usize; 4]; 6] = [
    [0, 1, 3, 2],
    [4, 5, 7, 6],
    [0, 2, 6, 4],
    [1, 3, 7, 5],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
];

/// Generate triangle-list vertices for a filled box
pub fn solid_box(center: Vec3, size: Vec3, color: [f32; 4]) -> Vec<Vertex> {
    let corners = box_corners(center, size);
    let mut vertices = Vec::with_capacity(BOX_FACES.len() * 6);
    for [a, b, c, d] in BOX_FACES {
        for i in [a, b, c, a, c, d] {
            vertices.push(Vertex::at(corners[i], color));
        }
    }
    vertices
}
