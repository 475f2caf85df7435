//! Rendering module
//!
//! The simulation draws through [`DrawSurface`], a minimal stroke/fill
//! interface. The browser build implements it on a canvas 2D context;
//! [`VertexBatch`] tessellates into vertex lists for GPU-style backends.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, VertexBatch, colors};

use glam::Vec2;

use crate::consts::PROJECTILE_DRAW_SIZE;
use crate::sim::{Entity, EntityKind, Simulation};

/// RGBA, each channel 0-1
pub type Color = [f32; 4];

/// Primitive drawing operations the game needs
pub trait DrawSurface {
    /// Outline of a circle
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Outline of a closed polygon (last point joins the first)
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color);
    /// Solid axis-aligned rectangle
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
}

/// Draw one entity with its kind's shape
pub fn draw_entity<S: DrawSurface + ?Sized>(entity: &Entity, surface: &mut S) {
    match &entity.kind {
        EntityKind::Asteroid => {
            surface.stroke_circle(entity.pos, entity.radius(), colors::ASTEROID);
        }
        EntityKind::Ship(ship) => {
            let outline = shapes::ship_outline(entity.pos, ship.heading);
            surface.stroke_polygon(&outline, colors::SHIP);
        }
        EntityKind::Projectile => {
            let size = Vec2::splat(PROJECTILE_DRAW_SIZE);
            surface.fill_rect(entity.pos - size * 0.5, size, colors::PROJECTILE);
        }
    }
}

/// Draw every live entity
pub fn draw_entities<S: DrawSurface + ?Sized>(entities: &[Entity], surface: &mut S) {
    for entity in entities.iter().filter(|e| e.is_alive()) {
        draw_entity(entity, surface);
    }
}

impl Simulation {
    /// Render pass: runs after the tick's compaction
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        draw_entities(self.entities(), surface);
    }
}
