//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use crate::to_world;

/// Ship silhouette in local space, nose along +x
pub const SHIP_OUTLINE: [Vec2; 3] = [
    Vec2::new(-3.0, -5.0),
    Vec2::new(12.0, 0.0),
    Vec2::new(-3.0, 5.0),
];

/// Ship triangle in world space
pub fn ship_outline(pos: Vec2, heading: f32) -> [Vec2; 3] {
    SHIP_OUTLINE.map(|p| to_world(pos, heading, p))
}

/// Evenly spaced points on a circle (not closed; first point is at angle 0)
pub fn circle_outline(center: Vec2, radius: f32, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * TAU;
            center + Vec2::new(theta.cos(), theta.sin()) * radius
        })
        .collect()
}

/// Segment count that keeps circle edges a few pixels long
pub fn segments_for_radius(radius: f32) -> u32 {
    ((radius * 0.75) as u32).clamp(12, 64)
}

/// Corners of an axis-aligned rectangle, clockwise from `min`
pub fn rect_corners(min: Vec2, size: Vec2) -> [Vec2; 4] {
    [
        min,
        Vec2::new(min.x + size.x, min.y),
        min + size,
        Vec2::new(min.x, min.y + size.y),
    ]
}
