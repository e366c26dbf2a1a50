//! Core primitives.
//!
//! Geometry, faction identity and damage types shared by the shield logic.
//! Nothing in here knows about shields.

pub mod vec3;
pub mod faction;
pub mod damage;

// Re-export core types
pub use vec3::{Vec3, GridCell};
pub use faction::{FactionId, FactionRelations, FactionTable, RelationKind};
pub use damage::{DamageComponent, DamageKind, ShieldDamages};
