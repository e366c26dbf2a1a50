//! Shield Logic Module
//!
//! Everything that works on shields. Single-threaded: shields absorb damage
//! through interior mutability and are only touched from the simulation tick.
//!
//! ## Module Structure
//!
//! - `shield`: Shield capability trait and the stock bubble shield
//! - `collision`: Ground-plane circle geometry
//! - `filter`: Activation and faction filter stages
//! - `query`: Fluent shield query
//! - `intersects`: Intersection stage and block resolver
//! - `registry`: Region-keyed shield store
//! - `deployment`: Carrier-worn shields and shield items
//! - `projectile`: Per-tick projectile interception
//! - `fire_line`: Line-of-fire truncation

pub mod shield;
pub mod collision;
pub mod filter;
pub mod query;
pub mod intersects;
pub mod registry;
pub mod deployment;
pub mod projectile;
pub mod fire_line;

// Re-export key types
pub use shield::{BubbleShield, Deployable, Shield, ShieldBoundary, ShieldId};
pub use filter::ShieldFilter;
pub use query::{ShieldIter, ShieldQuery};
pub use intersects::{HitQuery, Probe, ShieldHit};
pub use registry::{RegionId, ShieldRegistry};
pub use deployment::{Carrier, CarrierId, ShieldItem};
pub use projectile::{ProjectileFlight, ProjectileInterceptor, ProjectileOutcome};
pub use fire_line::shootable_cells;
