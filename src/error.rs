//! Shield errors.
//!
//! The query core never fails; these cover the registry, deployment and
//! configuration surfaces around it.

use crate::shields::deployment::CarrierId;
use crate::shields::registry::RegionId;
use crate::shields::shield::ShieldId;

/// Errors raised outside the query core.
#[derive(Debug, thiserror::Error)]
pub enum ShieldError {
    /// A shield with this id is already registered.
    #[error("Shield {0:?} is already registered")]
    DuplicateShield(ShieldId),

    /// No shield with this id in the region.
    #[error("Shield {shield:?} not found in region {region:?}")]
    UnknownShield {
        /// Region searched
        region: RegionId,
        /// Missing shield
        shield: ShieldId,
    },

    /// Carrier already wears a shield.
    #[error("Carrier {0:?} already has a deployed shield")]
    AlreadyDeployed(CarrierId),

    /// Carrier body too small for the shield.
    #[error("Carrier {carrier:?} (size {body_size}) is too small for a shield of size {required}")]
    CarrierTooSmall {
        /// Carrier
        carrier: CarrierId,
        /// Carrier body size
        body_size: f32,
        /// Required deployment size
        required: f32,
    },

    /// Carrier has nothing to undeploy.
    #[error("Carrier {0:?} has no deployed shield")]
    NothingDeployed(CarrierId),

    /// Config could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),
}
