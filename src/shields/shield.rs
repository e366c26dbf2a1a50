//! Shield Capability
//!
//! The `Shield` trait is everything the query core needs from a live shield.
//! `BubbleShield` is the stock implementation: a circular ground-plane dome
//! (or a full sphere) with an energy pool. Boxed shields forward to their
//! contents, so one registry can hold several shield kinds as trait objects.

use std::cell::Cell;
use serde::{Serialize, Deserialize};

use crate::core::damage::ShieldDamages;
use crate::core::faction::FactionId;
use crate::core::vec3::Vec3;
use crate::shields::collision::{
    point_in_circle, point_in_sphere, segment_circle_entry, segment_sphere_entry,
};

/// Unique shield identifier within a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShieldId(pub u32);

/// A shield entity as seen by queries.
///
/// Blocking takes `&self`: queries only ever hold shared references into the
/// registry, so implementors keep their capacity behind interior mutability.
pub trait Shield {
    /// Registry identity.
    fn id(&self) -> ShieldId;

    /// Whether the shield is currently up.
    fn is_active(&self) -> bool;

    /// Owning faction.
    fn faction(&self) -> FactionId;

    /// Whether `point` is inside the shield boundary.
    fn collides_point(&self, point: Vec3) -> bool;

    /// Where the segment `start -> end` hits the shield boundary, if anywhere.
    fn collides_segment(&self, start: Vec3, end: Vec3) -> Option<Vec3>;

    /// Absorb `damage` at `impact`. Returns the amount absorbed.
    fn block(&self, damage: f32, impact: Vec3) -> f32;

    /// Absorb a damage breakdown at `impact`. Returns the amount absorbed.
    fn block_damages(&self, damages: &ShieldDamages, impact: Vec3) -> f32 {
        self.block(damages.damage(), impact)
    }
}

/// Shields that a carrier can wear.
pub trait Deployable: Shield {
    /// Minimum carrier body size needed to deploy.
    fn deployment_size(&self) -> f32;
}

impl<T: Shield + ?Sized> Shield for Box<T> {
    fn id(&self) -> ShieldId {
        (**self).id()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn faction(&self) -> FactionId {
        (**self).faction()
    }

    fn collides_point(&self, point: Vec3) -> bool {
        (**self).collides_point(point)
    }

    fn collides_segment(&self, start: Vec3, end: Vec3) -> Option<Vec3> {
        (**self).collides_segment(start, end)
    }

    fn block(&self, damage: f32, impact: Vec3) -> f32 {
        (**self).block(damage, impact)
    }

    fn block_damages(&self, damages: &ShieldDamages, impact: Vec3) -> f32 {
        (**self).block_damages(damages, impact)
    }
}

impl<T: Deployable + ?Sized> Deployable for Box<T> {
    fn deployment_size(&self) -> f32 {
        (**self).deployment_size()
    }
}

// =============================================================================
// BUBBLE SHIELD
// =============================================================================

/// Shape of a bubble shield's boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShieldBoundary {
    /// Ground-plane circle; height never matters.
    #[default]
    Dome,
    /// Full 3D sphere.
    Sphere,
}

/// Bubble shield: a dome centered on a ground-plane point, or a sphere.
#[derive(Debug, Clone)]
pub struct BubbleShield {
    id: ShieldId,
    faction: FactionId,
    center: Vec3,
    radius: f32,
    boundary: ShieldBoundary,
    active: Cell<bool>,
    energy: Cell<f32>,
    deployment_size: f32,
}

impl BubbleShield {
    /// Create an active shield with a full energy pool.
    pub fn new(id: ShieldId, faction: FactionId, center: Vec3, radius: f32, energy: f32) -> Self {
        Self {
            id,
            faction,
            center: center.flatten(),
            radius,
            boundary: ShieldBoundary::Dome,
            active: Cell::new(true),
            energy: Cell::new(energy),
            deployment_size: 1.0,
        }
    }

    /// Create an active spherical shield. The center keeps its height.
    pub fn sphere(id: ShieldId, faction: FactionId, center: Vec3, radius: f32, energy: f32) -> Self {
        Self {
            center,
            boundary: ShieldBoundary::Sphere,
            ..Self::new(id, faction, center, radius, energy)
        }
    }

    /// Set the minimum carrier body size.
    pub fn with_deployment_size(mut self, size: f32) -> Self {
        self.deployment_size = size;
        self
    }

    /// Boundary center. Ground-plane for domes.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Boundary shape.
    pub fn boundary(&self) -> ShieldBoundary {
        self.boundary
    }

    /// Boundary radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Remaining energy.
    pub fn energy(&self) -> f32 {
        self.energy.get()
    }

    /// Raise or drop the shield.
    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }

    /// Take up to `amount` from the energy pool, returning what was taken.
    fn drain(&self, amount: f32) -> f32 {
        let taken = amount.max(0.0).min(self.energy.get());
        self.energy.set(self.energy.get() - taken);
        taken
    }
}

impl Shield for BubbleShield {
    fn id(&self) -> ShieldId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn faction(&self) -> FactionId {
        self.faction
    }

    fn collides_point(&self, point: Vec3) -> bool {
        match self.boundary {
            ShieldBoundary::Dome => point_in_circle(point, self.center, self.radius),
            ShieldBoundary::Sphere => point_in_sphere(point, self.center, self.radius),
        }
    }

    fn collides_segment(&self, start: Vec3, end: Vec3) -> Option<Vec3> {
        match self.boundary {
            ShieldBoundary::Dome => segment_circle_entry(start, end, self.center, self.radius),
            ShieldBoundary::Sphere => segment_sphere_entry(start, end, self.center, self.radius),
        }
    }

    fn block(&self, damage: f32, _impact: Vec3) -> f32 {
        self.drain(damage)
    }

    fn block_damages(&self, damages: &ShieldDamages, _impact: Vec3) -> f32 {
        // Each component drains independently until the pool runs dry
        damages
            .scaled_components()
            .map(|component| self.drain(component.amount))
            .sum()
    }
}

impl Deployable for BubbleShield {
    fn deployment_size(&self) -> f32 {
        self.deployment_size
    }
}
