//! Shield Registry
//!
//! Live shields grouped by simulation region. Regions iterate in insertion
//! order so query results are reproducible.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::faction::FactionRelations;
use crate::error::ShieldError;
use crate::shields::query::ShieldQuery;
use crate::shields::shield::{Shield, ShieldId};

/// Simulation region (map, zone) identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u32);

/// Region-keyed store of live shields.
#[derive(Debug)]
pub struct ShieldRegistry<S> {
    regions: BTreeMap<RegionId, Vec<S>>,
}

impl<S> Default for ShieldRegistry<S> {
    fn default() -> Self {
        Self { regions: BTreeMap::new() }
    }
}

impl<S: Shield> ShieldRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shield in a region.
    ///
    /// Shield ids are unique across all regions.
    pub fn add(&mut self, region: RegionId, shield: S) -> Result<(), ShieldError> {
        let id = shield.id();
        if self.contains(id) {
            return Err(ShieldError::DuplicateShield(id));
        }
        debug!("Registered shield {:?} in region {:?}", id, region);
        self.regions.entry(region).or_default().push(shield);
        Ok(())
    }

    /// Remove a shield from a region and hand it back.
    ///
    /// A region is dropped once its last shield is gone.
    pub fn remove(&mut self, region: RegionId, id: ShieldId) -> Result<S, ShieldError> {
        let shields = self.regions
            .get_mut(&region)
            .ok_or(ShieldError::UnknownShield { region, shield: id })?;
        let index = shields
            .iter()
            .position(|s| s.id() == id)
            .ok_or(ShieldError::UnknownShield { region, shield: id })?;
        let shield = shields.remove(index);

        if shields.is_empty() {
            self.regions.remove(&region);
        }

        debug!("Removed shield {:?} from region {:?}", id, region);
        Ok(shield)
    }

    /// Number of regions holding at least one shield.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Whether any region holds a shield with this id.
    pub fn contains(&self, id: ShieldId) -> bool {
        self.regions.values().flatten().any(|s| s.id() == id)
    }

    /// Look up a shield in a region.
    pub fn get(&self, region: RegionId, id: ShieldId) -> Option<&S> {
        self.shields(region).iter().find(|s| s.id() == id)
    }

    /// Shields in a region, in insertion order. Unknown regions are empty.
    pub fn shields(&self, region: RegionId) -> &[S] {
        self.regions.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of shields across all regions.
    pub fn len(&self) -> usize {
        self.regions.values().map(Vec::len).sum()
    }

    /// Whether the registry holds no shields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start a query over a region's shields.
    pub fn query<'a>(
        &'a self,
        region: RegionId,
        relations: &'a dyn FactionRelations,
    ) -> ShieldQuery<'a, S> {
        ShieldQuery::new(self.shields(region), relations)
    }
}
