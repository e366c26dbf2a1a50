//! Shield Filters
//!
//! Predicate stages shared by `ShieldQuery` and `HitQuery`. Each filter keeps
//! a shield when `predicate(shield) != invert`.

use crate::core::faction::{FactionId, FactionRelations, RelationKind};
use crate::shields::shield::Shield;

/// A single narrowing stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShieldFilter {
    /// Keep shields whose activation state equals `active`.
    IsActive {
        /// Wanted activation state
        active: bool,
    },
    /// Keep shields owned by `faction`.
    OfFaction {
        /// Faction to match
        faction: FactionId,
        /// Keep the complement instead
        invert: bool,
    },
    /// Keep shields owned by `faction` or by one of its allies.
    FriendlyTo {
        /// Faction to match
        faction: FactionId,
        /// Keep the complement instead
        invert: bool,
    },
    /// Keep shields hostile to `faction`. A faction is never hostile to itself.
    HostileTo {
        /// Faction to match
        faction: FactionId,
        /// Keep the complement instead
        invert: bool,
    },
}

impl ShieldFilter {
    /// Evaluate the filter against one shield.
    pub fn matches<S>(&self, shield: &S, relations: &dyn FactionRelations) -> bool
    where
        S: Shield + ?Sized,
    {
        match *self {
            ShieldFilter::IsActive { active } => shield.is_active() == active,
            ShieldFilter::OfFaction { faction, invert } => {
                (shield.faction() == faction) != invert
            }
            ShieldFilter::FriendlyTo { faction, invert } => {
                let own = shield.faction();
                (own == faction
                    || relations.relation_kind(own, faction) == RelationKind::Ally)
                    != invert
            }
            ShieldFilter::HostileTo { faction, invert } => {
                let own = shield.faction();
                (own != faction
                    && relations.relation_kind(own, faction) == RelationKind::Hostile)
                    != invert
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::faction::FactionTable;
    use crate::core::vec3::Vec3;
    use crate::shields::shield::{BubbleShield, ShieldId};

    const RED: FactionId = FactionId(1);
    const BLUE: FactionId = FactionId(2);
    const GREEN: FactionId = FactionId(3);

    fn shield_of(faction: FactionId) -> BubbleShield {
        BubbleShield::new(ShieldId(faction.0), faction, Vec3::ZERO, 1.0, 1.0)
    }

    fn relations() -> FactionTable {
        FactionTable::new()
            .with_relation(RED, BLUE, RelationKind::Hostile)
            .with_relation(RED, GREEN, RelationKind::Ally)
            // Pathological self-hostility must not leak into HostileTo
            .with_relation(RED, RED, RelationKind::Hostile)
    }

    #[test]
    fn test_is_active() {
        let table = relations();
        let s = shield_of(RED);
        assert!(ShieldFilter::IsActive { active: true }.matches(&s, &table));
        s.set_active(false);
        assert!(ShieldFilter::IsActive { active: false }.matches(&s, &table));
        assert!(!ShieldFilter::IsActive { active: true }.matches(&s, &table));
    }

    #[test]
    fn test_of_faction_and_invert() {
        let table = relations();
        let filter = ShieldFilter::OfFaction { faction: RED, invert: false };
        let inverted = ShieldFilter::OfFaction { faction: RED, invert: true };

        assert!(filter.matches(&shield_of(RED), &table));
        assert!(!filter.matches(&shield_of(BLUE), &table));
        assert!(!inverted.matches(&shield_of(RED), &table));
        assert!(inverted.matches(&shield_of(BLUE), &table));
    }

    #[test]
    fn test_friendly_includes_self_and_allies() {
        let table = relations();
        let filter = ShieldFilter::FriendlyTo { faction: RED, invert: false };

        assert!(filter.matches(&shield_of(RED), &table));
        assert!(filter.matches(&shield_of(GREEN), &table));
        assert!(!filter.matches(&shield_of(BLUE), &table));
    }

    #[test]
    fn test_hostile_excludes_self() {
        let table = relations();
        let filter = ShieldFilter::HostileTo { faction: RED, invert: false };

        assert!(filter.matches(&shield_of(BLUE), &table));
        assert!(!filter.matches(&shield_of(GREEN), &table));
        assert!(!filter.matches(&shield_of(RED), &table));

        let inverted = ShieldFilter::HostileTo { faction: RED, invert: true };
        assert!(inverted.matches(&shield_of(RED), &table));
    }
}
