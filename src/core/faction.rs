//! Faction Identity and Relations
//!
//! The query core treats faction relations as an opaque lookup.
//! `FactionTable` is the in-memory implementation used by hosts without
//! their own relation database.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

/// Opaque faction identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactionId(pub u32);

/// How one faction regards another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RelationKind {
    /// At war
    Hostile,
    /// Neither allied nor hostile
    #[default]
    Neutral,
    /// Allied
    Ally,
}

/// Relation lookup between two factions.
pub trait FactionRelations {
    /// Relation of `faction` towards `other`.
    fn relation_kind(&self, faction: FactionId, other: FactionId) -> RelationKind;
}

/// Symmetric relation table keyed by faction pair.
///
/// Unlisted pairs resolve to `RelationKind::Neutral`. A faction's relation
/// to itself is whatever was recorded, so a table may mark a faction hostile
/// to itself.
#[derive(Clone, Debug, Default)]
pub struct FactionTable {
    relations: BTreeMap<(FactionId, FactionId), RelationKind>,
}

impl FactionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a relation in both directions.
    pub fn set_relation(&mut self, a: FactionId, b: FactionId, kind: RelationKind) {
        self.relations.insert(Self::key(a, b), kind);
    }

    /// Builder form of `set_relation`.
    pub fn with_relation(mut self, a: FactionId, b: FactionId, kind: RelationKind) -> Self {
        self.set_relation(a, b, kind);
        self
    }

    #[inline]
    fn key(a: FactionId, b: FactionId) -> (FactionId, FactionId) {
        if a <= b { (a, b) } else { (b, a) }
    }
}

impl FactionRelations for FactionTable {
    fn relation_kind(&self, faction: FactionId, other: FactionId) -> RelationKind {
        self.relations
            .get(&Self::key(faction, other))
            .copied()
            .unwrap_or_default()
    }
}
