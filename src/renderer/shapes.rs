//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Segment count that keeps edges smooth without flooding small shapes
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 0.5) as u32).clamp(12, 128)
}

#[inline]
fn rim(center: Vec2, radius: f32, i: u32, segments: u32) -> Vec2 {
    let theta = (i as f32 / segments as f32) * TAU;
    center + Vec2::new(theta.cos(), theta.sin()) * radius
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let a = rim(center, radius, i, segments);
        let b = rim(center, radius, i + 1, segments);

        // Fan from center
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let in1 = rim(center, inner_radius, i, segments);
        let out1 = rim(center, outer_radius, i, segments);
        let in2 = rim(center, inner_radius, i + 1, segments);
        let out2 = rim(center, outer_radius, i + 1, segments);

        vertices.extend_from_slice(&quad(in1, out1, in2, out2, color));
    }

    vertices
}

/// Circle outline of the given radius, `stroke` wide and centered on the rim
pub fn outline(center: Vec2, radius: f32, stroke: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = stroke / 2.0;
    ring(
        center,
        (radius - half).max(0.0),
        radius + half,
        color,
        segments_for(radius),
    )
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    quad(
        min,
        Vec2::new(max.x, min.y),
        Vec2::new(min.x, max.y),
        max,
        color,
    )
    .to_vec()
}

/// Two triangles covering `a b / c d`
fn quad(a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}
