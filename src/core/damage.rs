//! Damage Breakdown
//!
//! Structured damage passed to shields: a primary component plus any
//! secondary components, all scaled by a common factor.

use serde::{Serialize, Deserialize};

/// Kind of a damage component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    /// Bullets, blades, shrapnel
    Kinetic,
    /// Fire and explosions
    Thermal,
    /// Electromagnetic pulse
    Emp,
}

/// One component of incoming damage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageComponent {
    /// Damage kind
    pub kind: DamageKind,
    /// Unscaled amount
    pub amount: f32,
}

impl DamageComponent {
    /// Create a new component.
    pub const fn new(kind: DamageKind, amount: f32) -> Self {
        Self { kind, amount }
    }
}

/// Damage breakdown for a single hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShieldDamages {
    /// Main damage component
    pub primary: DamageComponent,
    /// Extra components (e.g. an incendiary payload)
    pub secondary: Vec<DamageComponent>,
    /// Multiplier applied to every component
    pub factor: f32,
}

impl ShieldDamages {
    /// Single-component damage with factor 1.
    pub fn new(primary: DamageComponent) -> Self {
        Self {
            primary,
            secondary: Vec::new(),
            factor: 1.0,
        }
    }

    /// Add a secondary component.
    pub fn with_secondary(mut self, component: DamageComponent) -> Self {
        self.secondary.push(component);
        self
    }

    /// Set the scaling factor.
    pub fn with_factor(mut self, factor: f32) -> Self {
        self.factor = factor;
        self
    }

    /// All components, primary first, already scaled by `factor`.
    pub fn scaled_components(&self) -> impl Iterator<Item = DamageComponent> + '_ {
        std::iter::once(self.primary)
            .chain(self.secondary.iter().copied())
            .map(move |c| DamageComponent::new(c.kind, c.amount * self.factor))
    }

    /// Total scaled damage. This is the amount a shield has to absorb to block.
    pub fn damage(&self) -> f32 {
        self.scaled_components().map(|c| c.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_component_damage() {
        let damages = ShieldDamages::new(DamageComponent::new(DamageKind::Kinetic, 12.0));
        assert_eq!(damages.damage(), 12.0);
    }

    #[test]
    fn test_secondary_and_factor() {
        let damages = ShieldDamages::new(DamageComponent::new(DamageKind::Kinetic, 10.0))
            .with_secondary(DamageComponent::new(DamageKind::Thermal, 4.0))
            .with_factor(0.5);

        assert_eq!(damages.damage(), 7.0);

        let kinds: Vec<DamageKind> = damages.scaled_components().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![DamageKind::Kinetic, DamageKind::Thermal]);
    }
}
