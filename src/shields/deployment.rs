//! Shield Deployment
//!
//! Carriers (creatures big enough to wear a shield) deploy and undeploy
//! shields into the registry. Items are matched to the shield they provide
//! through the `ShieldItem` variant instead of type inspection.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::error::ShieldError;
use crate::shields::registry::{RegionId, ShieldRegistry};
use crate::shields::shield::{Deployable, ShieldId};

/// Carrier identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CarrierId(pub u32);

/// A creature that can wear one deployed shield.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Carrier {
    /// Carrier identity
    pub id: CarrierId,
    /// Region the carrier is in
    pub region: RegionId,
    /// Body size compared against a shield's deployment size
    pub body_size: f32,
    deployed: Option<ShieldId>,
}

impl Carrier {
    /// Create a carrier with nothing deployed.
    pub fn new(id: CarrierId, region: RegionId, body_size: f32) -> Self {
        Self {
            id,
            region,
            body_size,
            deployed: None,
        }
    }

    /// Currently deployed shield.
    pub fn deployed(&self) -> Option<ShieldId> {
        self.deployed
    }
}

/// Whether the carrier is big enough for the shield.
pub fn can_deploy<S: Deployable>(carrier: &Carrier, shield: &S) -> bool {
    carrier.body_size >= shield.deployment_size()
}

/// Deploy a shield on a carrier and register it in the carrier's region.
pub fn deploy_shield<S: Deployable>(
    registry: &mut ShieldRegistry<S>,
    carrier: &mut Carrier,
    shield: S,
) -> Result<(), ShieldError> {
    if carrier.deployed.is_some() {
        return Err(ShieldError::AlreadyDeployed(carrier.id));
    }
    if !can_deploy(carrier, &shield) {
        return Err(ShieldError::CarrierTooSmall {
            carrier: carrier.id,
            body_size: carrier.body_size,
            required: shield.deployment_size(),
        });
    }

    let id = shield.id();
    registry.add(carrier.region, shield)?;
    carrier.deployed = Some(id);

    debug!("Carrier {:?} deployed shield {:?}", carrier.id, id);
    Ok(())
}

/// Take a carrier's shield down and remove it from the registry.
pub fn undeploy_shield<S: Deployable>(
    registry: &mut ShieldRegistry<S>,
    carrier: &mut Carrier,
) -> Result<S, ShieldError> {
    let id = carrier.deployed.ok_or(ShieldError::NothingDeployed(carrier.id))?;
    let shield = registry.remove(carrier.region, id)?;
    carrier.deployed = None;

    debug!("Carrier {:?} undeployed shield {:?}", carrier.id, id);
    Ok(shield)
}

/// Shields deployed on a carrier.
pub fn deployed_shields(carrier: &Carrier) -> Vec<ShieldId> {
    carrier.deployed.into_iter().collect()
}

// =============================================================================
// SHIELD ITEMS
// =============================================================================

/// An item that may carry a shield.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShieldItem {
    /// The shield itself
    Shield(ShieldId),
    /// A packed item holding another item
    Packed(Box<ShieldItem>),
    /// Anything else
    Other,
}

impl ShieldItem {
    /// Whether this item is, or directly packs, the given shield.
    pub fn provides_shield(&self, shield: ShieldId) -> bool {
        match self {
            ShieldItem::Shield(id) => *id == shield,
            ShieldItem::Packed(inner) => **inner == ShieldItem::Shield(shield),
            ShieldItem::Other => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::faction::{FactionId, FactionTable};
    use crate::core::vec3::Vec3;
    use crate::shields::shield::{BubbleShield, Deployable, Shield};

    const MAP: RegionId = RegionId(1);

    fn personal_shield(id: u32, size: f32) -> BubbleShield {
        BubbleShield::new(ShieldId(id), FactionId(1), Vec3::ZERO, 1.5, 10.0)
            .with_deployment_size(size)
    }

    #[test]
    fn test_can_deploy_by_size() {
        let carrier = Carrier::new(CarrierId(1), MAP, 1.0);
        assert!(can_deploy(&carrier, &personal_shield(1, 1.0)));
        assert!(!can_deploy(&carrier, &personal_shield(1, 1.5)));
    }

    #[test]
    fn test_deploy_and_undeploy() {
        let table = FactionTable::new();
        let mut registry = ShieldRegistry::new();
        let mut carrier = Carrier::new(CarrierId(1), MAP, 1.0);

        deploy_shield(&mut registry, &mut carrier, personal_shield(7, 1.0)).unwrap();
        assert_eq!(carrier.deployed(), Some(ShieldId(7)));
        assert_eq!(deployed_shields(&carrier), vec![ShieldId(7)]);
        assert_eq!(registry.query(MAP, &table).get().count(), 1);

        let shield = undeploy_shield(&mut registry, &mut carrier).unwrap();
        assert_eq!(shield.id(), ShieldId(7));
        assert!(carrier.deployed().is_none());
        assert!(deployed_shields(&carrier).is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_deploy_rejections() {
        let mut registry = ShieldRegistry::new();
        let mut small = Carrier::new(CarrierId(1), MAP, 0.5);
        assert!(matches!(
            deploy_shield(&mut registry, &mut small, personal_shield(1, 1.0)),
            Err(ShieldError::CarrierTooSmall { .. })
        ));
        assert!(registry.is_empty());

        let mut carrier = Carrier::new(CarrierId(2), MAP, 2.0);
        deploy_shield(&mut registry, &mut carrier, personal_shield(2, 1.0)).unwrap();
        assert!(matches!(
            deploy_shield(&mut registry, &mut carrier, personal_shield(3, 1.0)),
            Err(ShieldError::AlreadyDeployed(CarrierId(2)))
        ));
    }

    #[test]
    fn test_undeploy_nothing() {
        let mut registry: ShieldRegistry<BubbleShield> = ShieldRegistry::new();
        let mut carrier = Carrier::new(CarrierId(1), MAP, 1.0);
        assert!(matches!(
            undeploy_shield(&mut registry, &mut carrier),
            Err(ShieldError::NothingDeployed(CarrierId(1)))
        ));
    }

    #[test]
    fn test_item_provides_shield() {
        let id = ShieldId(4);
        assert!(ShieldItem::Shield(id).provides_shield(id));
        assert!(!ShieldItem::Shield(ShieldId(5)).provides_shield(id));
        assert!(ShieldItem::Packed(Box::new(ShieldItem::Shield(id))).provides_shield(id));
        assert!(!ShieldItem::Other.provides_shield(id));

        // Only the directly packed item counts
        let nested = ShieldItem::Packed(Box::new(ShieldItem::Packed(Box::new(ShieldItem::Shield(id)))));
        assert!(!nested.provides_shield(id));
    }

    /// Building-mounted shield that no carrier can lift.
    struct Emplacement {
        id: ShieldId,
    }

    impl Shield for Emplacement {
        fn id(&self) -> ShieldId { self.id }
        fn is_active(&self) -> bool { true }
        fn faction(&self) -> FactionId { FactionId(1) }
        fn collides_point(&self, point: Vec3) -> bool { point.ground_distance_squared(Vec3::ZERO) <= 100.0 }
        fn collides_segment(&self, _start: Vec3, _end: Vec3) -> Option<Vec3> { None }
        fn block(&self, damage: f32, _impact: Vec3) -> f32 { damage }
    }

    impl Deployable for Emplacement {
        fn deployment_size(&self) -> f32 { f32::INFINITY }
    }

    #[test]
    fn test_deployed_shield_joins_building_shields() {
        let table = FactionTable::new();
        let mut registry: ShieldRegistry<Box<dyn Deployable>> = ShieldRegistry::new();
        registry.add(MAP, Box::new(Emplacement { id: ShieldId(1) })).unwrap();

        let mut carrier = Carrier::new(CarrierId(1), MAP, 1.0);
        let lifted: Box<dyn Deployable> = Box::new(Emplacement { id: ShieldId(2) });
        assert!(matches!(
            deploy_shield(&mut registry, &mut carrier, lifted),
            Err(ShieldError::CarrierTooSmall { .. })
        ));

        let worn: Box<dyn Deployable> = Box::new(personal_shield(3, 1.0));
        deploy_shield(&mut registry, &mut carrier, worn).unwrap();

        let ids: Vec<u32> = registry
            .query(MAP, &table)
            .intersects_point(Vec3::ZERO, false)
            .get()
            .map(|s| s.id().0)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        let removed = undeploy_shield(&mut registry, &mut carrier).unwrap();
        assert_eq!(removed.id(), ShieldId(3));
        assert_eq!(registry.len(), 1);
    }
}
