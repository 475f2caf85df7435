//! Vertex types and a tessellating draw surface

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::shapes::{circle_outline, rect_corners, segments_for_radius};
use super::{Color, DrawSurface};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    fn at(p: Vec2, color: Color) -> Self {
        Self::new(p.x, p.y, color)
    }
}

/// Colors for game elements (classic white-on-black vector look)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const ASTEROID: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SHIP: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PROJECTILE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    /// CSS color string for canvas 2D styles
    pub fn css(c: [f32; 4]) -> String {
        let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgba({}, {}, {}, {})", ch(c[0]), ch(c[1]), ch(c[2]), c[3])
    }
}

/// Collects one frame of drawing as line-list and triangle-list vertices
#[derive(Debug, Default, Clone)]
pub struct VertexBatch {
    /// Pairs of vertices, one pair per line segment
    pub lines: Vec<Vertex>,
    /// Triples of vertices, one triple per triangle
    pub triangles: Vec<Vertex>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame, keeping allocations
    pub fn clear(&mut self) {
        self.lines.clear();
        self.triangles.clear();
    }

    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }

    pub fn triangle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    fn closed_loop(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 2 {
            return;
        }
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.lines.push(Vertex::at(a, color));
            self.lines.push(Vertex::at(b, color));
        }
    }
}

impl DrawSurface for VertexBatch {
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let points = circle_outline(center, radius, segments_for_radius(radius));
        self.closed_loop(&points, color);
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: Color) {
        self.closed_loop(points, color);
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        let [a, b, c, d] = rect_corners(min, size);
        // Two triangles
        for p in [a, b, c, a, c, d] {
            self.triangles.push(Vertex::at(p, color));
        }
    }
}
