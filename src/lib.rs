//! # Shield Query
//!
//! Fluent query and damage-blocking resolution over a live set of shields.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       SHIELD QUERY                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Primitives                              │
//! │  ├── vec3.rs       - 3D vector, grid cells                   │
//! │  ├── faction.rs    - Faction identity and relations          │
//! │  └── damage.rs     - Damage breakdown                        │
//! │                                                              │
//! │  shields/          - Shield logic                            │
//! │  ├── shield.rs     - Shield trait, bubble shield             │
//! │  ├── collision.rs  - Circle and sphere geometry              │
//! │  ├── filter.rs     - Filter stages                           │
//! │  ├── query.rs      - Fluent query                            │
//! │  ├── intersects.rs - Intersection stage, block resolver      │
//! │  ├── registry.rs   - Region-keyed shield store               │
//! │  ├── deployment.rs - Carrier-worn shields                    │
//! │  ├── projectile.rs - Projectile interception                 │
//! │  └── fire_line.rs  - Line-of-fire truncation                 │
//! │                                                              │
//! │  config.rs         - Host switches                           │
//! │  error.rs          - Registry/deployment/config errors       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Query Flow
//!
//! A query is built from a snapshot of shields, narrowed by filters,
//! turned into (shield, hit point) pairs by an intersection probe, and
//! finally resolved with `get` or `block`. Queries are immutable values;
//! nothing runs until a terminal call walks the chain.
//!
//! ```
//! use shield_query::{BubbleShield, FactionId, FactionTable, ShieldId, ShieldQuery, Vec3};
//!
//! let relations = FactionTable::new();
//! let shields = vec![BubbleShield::new(ShieldId(1), FactionId(1), Vec3::ZERO, 5.0, 20.0)];
//!
//! let blocked = ShieldQuery::new(&shields, &relations)
//!     .is_active(true)
//!     .intersects_segment(Vec3::ground(-10.0, 0.0), Vec3::ground(10.0, 0.0), false)
//!     .block(8.0);
//! assert!(blocked);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod shields;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use crate::core::vec3::{Vec3, GridCell};
pub use crate::core::faction::{FactionId, FactionRelations, FactionTable, RelationKind};
pub use crate::core::damage::{DamageComponent, DamageKind, ShieldDamages};
pub use shields::{
    BubbleShield, HitQuery, Shield, ShieldBoundary, ShieldFilter, ShieldHit, ShieldId, ShieldQuery,
    ShieldRegistry, RegionId,
};
pub use config::ShieldsConfig;
pub use error::ShieldError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
