//! Fixed-step simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep passed in explicitly
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod motion;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, resolve_collisions, split_children};
pub use entity::{Entity, EntityKind, Lifetime, Ship};
pub use motion::{MotionOutcome, advance, update_ship, wrap};
pub use state::{SimEvent, Simulation, Snapshot};
pub use tick::{TickInput, tick};
