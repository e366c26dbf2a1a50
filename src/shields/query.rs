//! Shield Query
//!
//! Fluent, immutable filter chain over a snapshot of shields.
//!
//! ## Evaluation
//!
//! A query is a deferred sequence: every filter returns a new query that
//! wraps the previous one, and nothing is evaluated until a terminal call
//! (`get`, `block`) walks it. Chain links share no iteration state, so one
//! intermediate query can branch into several independent chains and any
//! link can be walked any number of times.
//!
//! ```text
//! source ──► is_active ──► hostile_to ──► intersects_segment ──► block
//!                    └───► friendly_to ──► get
//! ```

use std::rc::Rc;

use crate::core::faction::{FactionId, FactionRelations};
use crate::core::vec3::Vec3;
use crate::shields::filter::ShieldFilter;
use crate::shields::intersects::{HitQuery, Probe};
use crate::shields::shield::Shield;

/// Boxed iterator returned by terminal calls.
pub type ShieldIter<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

type Walk<'a, T> = dyn Fn() -> ShieldIter<'a, T> + 'a;

// =============================================================================
// DEFERRED SEQUENCE
// =============================================================================

/// Re-walkable lazy sequence. Each walk starts a fresh iterator from the
/// source through every stage.
pub(crate) struct Sequence<'a, T> {
    walk: Rc<Walk<'a, T>>,
}

impl<'a, T> Clone for Sequence<'a, T> {
    fn clone(&self) -> Self {
        Self { walk: Rc::clone(&self.walk) }
    }
}

impl<'a, T: 'a> Sequence<'a, T> {
    /// Sequence over a cloneable source (slice, `Vec` reference, iterator).
    pub(crate) fn from_source<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + 'a,
        I::IntoIter: 'a,
    {
        Self {
            walk: Rc::new(move || -> ShieldIter<'a, T> {
                Box::new(source.clone().into_iter())
            }),
        }
    }

    /// Start a fresh walk.
    pub(crate) fn iter(&self) -> ShieldIter<'a, T> {
        (*self.walk)()
    }

    /// New sequence keeping items that satisfy `keep`.
    pub(crate) fn filter<F>(&self, keep: F) -> Self
    where
        F: Fn(&T) -> bool + 'a,
    {
        let upstream = Rc::clone(&self.walk);
        let keep = Rc::new(keep);
        Self {
            walk: Rc::new(move || -> ShieldIter<'a, T> {
                let keep = Rc::clone(&keep);
                Box::new((*upstream)().filter(move |item| (*keep)(item)))
            }),
        }
    }

    /// New sequence with `f` applied to every item.
    pub(crate) fn map<U, F>(&self, f: F) -> Sequence<'a, U>
    where
        U: 'a,
        F: Fn(T) -> U + 'a,
    {
        let upstream = Rc::clone(&self.walk);
        let f = Rc::new(f);
        Sequence {
            walk: Rc::new(move || -> ShieldIter<'a, U> {
                let f = Rc::clone(&f);
                Box::new((*upstream)().map(move |item| (*f)(item)))
            }),
        }
    }
}

// =============================================================================
// SHIELD QUERY
// =============================================================================

/// Query over plain shields.
pub struct ShieldQuery<'a, S: ?Sized> {
    shields: Sequence<'a, &'a S>,
    relations: &'a dyn FactionRelations,
}

impl<'a, S: ?Sized> Clone for ShieldQuery<'a, S> {
    fn clone(&self) -> Self {
        Self {
            shields: self.shields.clone(),
            relations: self.relations,
        }
    }
}

impl<'a, S> ShieldQuery<'a, S>
where
    S: Shield + ?Sized + 'a,
{
    /// Build a query over a snapshot of shields.
    ///
    /// The source is cloned on every walk, so pass something cheap to clone
    /// such as a slice or `&Vec`.
    pub fn new<I>(shields: I, relations: &'a dyn FactionRelations) -> Self
    where
        I: IntoIterator<Item = &'a S> + Clone + 'a,
        I::IntoIter: 'a,
    {
        Self {
            shields: Sequence::from_source(shields),
            relations,
        }
    }

    /// Narrow by an arbitrary filter stage.
    pub fn filter(&self, filter: ShieldFilter) -> Self {
        let relations = self.relations;
        Self {
            shields: self.shields.filter(move |shield| filter.matches(*shield, relations)),
            relations,
        }
    }

    /// Keep shields whose activation state equals `active`.
    pub fn is_active(&self, active: bool) -> Self {
        self.filter(ShieldFilter::IsActive { active })
    }

    /// Keep shields owned by `faction` (or the complement with `invert`).
    pub fn of_faction(&self, faction: FactionId, invert: bool) -> Self {
        self.filter(ShieldFilter::OfFaction { faction, invert })
    }

    /// Keep shields owned by `faction` or its allies (or the complement).
    pub fn friendly_to(&self, faction: FactionId, invert: bool) -> Self {
        self.filter(ShieldFilter::FriendlyTo { faction, invert })
    }

    /// Keep shields hostile to `faction` (or the complement).
    pub fn hostile_to(&self, faction: FactionId, invert: bool) -> Self {
        self.filter(ShieldFilter::HostileTo { faction, invert })
    }

    /// Pair every shield with whether it contains `point`.
    ///
    /// Keeps pairs where a hit exists, or where none does with `invert`.
    pub fn intersects_point(&self, point: Vec3, invert: bool) -> HitQuery<'a, S> {
        HitQuery::probe(&self.shields, Probe::Point(point), invert, self.relations)
    }

    /// Pair every shield with where the segment `start -> end` hits it.
    ///
    /// Keeps pairs where a hit exists, or where none does with `invert`.
    pub fn intersects_segment(&self, start: Vec3, end: Vec3, invert: bool) -> HitQuery<'a, S> {
        HitQuery::probe(&self.shields, Probe::Segment { start, end }, invert, self.relations)
    }

    /// Walk the chain and yield the matching shields.
    pub fn get(&self) -> ShieldIter<'a, &'a S> {
        self.shields.iter()
    }
}
