//! Intersection Stage and Block Resolver
//!
//! `HitQuery` pairs each shield with where a probe geometry hit it. The
//! resolver walks those pairs in source order and stops at the first shield
//! that absorbs the whole hit.
//!
//! ## Absorption side effect
//!
//! Absorb and compare happen in one step per candidate. A shield reached
//! before the blocker still has `block` called on it and keeps whatever
//! capacity loss that causes, even though it does not count as the blocker.
//! Shields after the blocker are never touched.

use tracing::{debug, trace};

use crate::core::damage::ShieldDamages;
use crate::core::faction::{FactionId, FactionRelations};
use crate::core::vec3::Vec3;
use crate::shields::filter::ShieldFilter;
use crate::shields::query::{Sequence, ShieldIter};
use crate::shields::shield::Shield;

/// A shield together with where the probe hit it.
pub struct ShieldHit<'a, S: ?Sized> {
    /// The shield
    pub shield: &'a S,
    /// Hit location, `None` when the probe missed
    pub point: Option<Vec3>,
}

impl<'a, S: ?Sized> Clone for ShieldHit<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S: ?Sized> Copy for ShieldHit<'a, S> {}

/// Geometry a shield is tested against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Probe {
    /// A single point; the hit location is the point itself.
    Point(Vec3),
    /// A segment; the hit location is wherever the shield's boundary says.
    Segment {
        /// Segment start
        start: Vec3,
        /// Segment end
        end: Vec3,
    },
}

impl Probe {
    /// Test one shield.
    pub fn hit<S>(&self, shield: &S) -> Option<Vec3>
    where
        S: Shield + ?Sized,
    {
        match *self {
            Probe::Point(point) => shield.collides_point(point).then_some(point),
            Probe::Segment { start, end } => shield.collides_segment(start, end),
        }
    }
}

// =============================================================================
// HIT QUERY
// =============================================================================

/// Query over (shield, hit point) pairs.
pub struct HitQuery<'a, S: ?Sized> {
    hits: Sequence<'a, ShieldHit<'a, S>>,
    relations: &'a dyn FactionRelations,
}

impl<'a, S: ?Sized> Clone for HitQuery<'a, S> {
    fn clone(&self) -> Self {
        Self {
            hits: self.hits.clone(),
            relations: self.relations,
        }
    }
}

impl<'a, S> HitQuery<'a, S>
where
    S: Shield + ?Sized + 'a,
{
    /// Pair every shield in `shields` with its probe result, keeping pairs
    /// where `hit.is_some() != invert`.
    pub(crate) fn probe(
        shields: &Sequence<'a, &'a S>,
        probe: Probe,
        invert: bool,
        relations: &'a dyn FactionRelations,
    ) -> Self {
        let hits = shields
            .map(move |shield| ShieldHit { shield, point: probe.hit(shield) })
            .filter(move |hit| hit.point.is_some() != invert);
        Self { hits, relations }
    }

    fn shields(&self) -> Sequence<'a, &'a S> {
        self.hits.map(|hit| hit.shield)
    }

    /// Narrow by an arbitrary filter stage on the paired shield.
    pub fn filter(&self, filter: ShieldFilter) -> Self {
        let relations = self.relations;
        Self {
            hits: self.hits.filter(move |hit| filter.matches(hit.shield, relations)),
            relations,
        }
    }

    /// Keep pairs whose shield activation state equals `active`.
    pub fn is_active(&self, active: bool) -> Self {
        self.filter(ShieldFilter::IsActive { active })
    }

    /// Keep pairs whose shield is owned by `faction` (or the complement).
    pub fn of_faction(&self, faction: FactionId, invert: bool) -> Self {
        self.filter(ShieldFilter::OfFaction { faction, invert })
    }

    /// Keep pairs whose shield is friendly to `faction` (or the complement).
    pub fn friendly_to(&self, faction: FactionId, invert: bool) -> Self {
        self.filter(ShieldFilter::FriendlyTo { faction, invert })
    }

    /// Keep pairs whose shield is hostile to `faction` (or the complement).
    pub fn hostile_to(&self, faction: FactionId, invert: bool) -> Self {
        self.filter(ShieldFilter::HostileTo { faction, invert })
    }

    /// Re-probe the current shields against a point. Previous hit points are dropped.
    pub fn intersects_point(&self, point: Vec3, invert: bool) -> Self {
        Self::probe(&self.shields(), Probe::Point(point), invert, self.relations)
    }

    /// Re-probe the current shields against a segment. Previous hit points are dropped.
    pub fn intersects_segment(&self, start: Vec3, end: Vec3, invert: bool) -> Self {
        Self::probe(&self.shields(), Probe::Segment { start, end }, invert, self.relations)
    }

    /// Walk the chain and yield the matching shields.
    pub fn get(&self) -> ShieldIter<'a, &'a S> {
        self.shields().iter()
    }

    /// Walk the chain and yield the pairs.
    pub fn hits(&self) -> ShieldIter<'a, ShieldHit<'a, S>> {
        self.hits.iter()
    }

    /// Try to block `damage`. Returns whether some shield blocked it.
    pub fn block(&self, damage: f32) -> bool {
        self.block_with(damage, |_, _| {})
    }

    /// Try to block `damage`, calling `on_block` with the blocker and impact point.
    pub fn block_with<F>(&self, damage: f32, on_block: F) -> bool
    where
        F: FnOnce(&'a S, Vec3),
    {
        match self.resolve(damage, |shield, point| shield.block(damage, point)) {
            Some((shield, point)) => {
                on_block(shield, point);
                true
            }
            None => false,
        }
    }

    /// Try to block a damage breakdown. Returns whether some shield blocked it.
    pub fn block_damages(&self, damages: &ShieldDamages) -> bool {
        self.block_damages_with(damages, |_, _| {})
    }

    /// Try to block a damage breakdown, calling `on_block` with the blocker
    /// and impact point.
    pub fn block_damages_with<F>(&self, damages: &ShieldDamages, on_block: F) -> bool
    where
        F: FnOnce(&'a S, Vec3),
    {
        match self.resolve(damages.damage(), |shield, point| shield.block_damages(damages, point)) {
            Some((shield, point)) => {
                on_block(shield, point);
                true
            }
            None => false,
        }
    }

    /// First pair with a hit point whose shield absorbs at least `amount`.
    fn resolve<F>(&self, amount: f32, absorb: F) -> Option<(&'a S, Vec3)>
    where
        F: Fn(&'a S, Vec3) -> f32,
    {
        let blocker = self.hits
            .iter()
            .filter_map(|hit| hit.point.map(|point| (hit.shield, point)))
            .find(|&(shield, point)| {
                let absorbed = absorb(shield, point);
                if absorbed < amount {
                    trace!("Shield {:?} absorbed {:.2} of {:.2}, not enough to block",
                           shield.id(), absorbed, amount);
                }
                absorbed >= amount
            });

        if let Some((shield, point)) = blocker {
            debug!("Shield {:?} blocked {:.2} damage at {}", shield.id(), amount, point);
        }

        blocker
    }
}
