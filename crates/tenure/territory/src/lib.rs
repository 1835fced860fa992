//! Tenure Territory - registry of community territories
//!
//! Territories are write-once: the administrator registers a name, a
//! boundary polygon and the owning community, and the record is never
//! updated or removed afterwards. Anyone may read.
//!
//! The owning community is stored by id value only; the registry does not
//! check that the community exists.

#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tenure_authority::SharedPolicy;
use tenure_types::{
    BlockHeight, CallContext, CommunityId, GuardedAction, Sequence, TenureError, TenureResult,
    TerritoryId,
};
use tracing::info;

/// A boundary vertex in fixed-point degrees (degrees × 10^6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: i64,
    pub longitude: i64,
}

impl Coordinate {
    pub const fn new(latitude: i64, longitude: i64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A registered territory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Territory {
    pub id: TerritoryId,
    pub name: String,
    /// Ordered polygon vertices, stored exactly as submitted.
    pub boundary: Vec<Coordinate>,
    pub community_id: CommunityId,
    pub registered_at: BlockHeight,
}

#[derive(Default)]
struct TerritoryTable {
    sequence: Sequence,
    records: BTreeMap<TerritoryId, Territory>,
}

/// Admin-write, public-read territory registry.
pub struct TerritoryRegistry {
    policy: SharedPolicy,
    table: RwLock<TerritoryTable>,
}

impl TerritoryRegistry {
    pub fn new(policy: SharedPolicy) -> Self {
        Self {
            policy,
            table: RwLock::new(TerritoryTable::default()),
        }
    }

    /// Register a territory and return its id.
    pub fn register(
        &self,
        ctx: &CallContext,
        name: impl Into<String>,
        boundary: Vec<Coordinate>,
        community_id: CommunityId,
    ) -> TenureResult<TerritoryId> {
        self.policy
            .authorize(&ctx.sender, GuardedAction::RegisterTerritory)?;

        let mut table = self.table.write().map_err(|_| TenureError::LockPoisoned)?;
        let id = TerritoryId(table.sequence.peek_next()?);

        let territory = Territory {
            id,
            name: name.into(),
            boundary,
            community_id,
            registered_at: ctx.height,
        };

        info!(
            territory_id = %id,
            community_id = %community_id,
            vertices = territory.boundary.len(),
            height = %ctx.height,
            "Territory registered"
        );

        table.records.insert(id, territory);
        table.sequence.commit(id.0);

        Ok(id)
    }

    pub fn get(&self, id: TerritoryId) -> TenureResult<Option<Territory>> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table.records.get(&id).cloned())
    }

    /// Number of territories registered so far.
    pub fn count(&self) -> TenureResult<usize> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table.records.len())
    }

    /// Last id issued, 0 before the first registration.
    pub fn last_id(&self) -> TenureResult<TerritoryId> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(TerritoryId(table.sequence.last()))
    }

    /// All territories in id order.
    pub fn list(&self) -> TenureResult<Vec<Territory>> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table.records.values().cloned().collect())
    }

    pub fn list_by_community(&self, community_id: CommunityId) -> TenureResult<Vec<Territory>> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table
            .records
            .values()
            .filter(|t| t.community_id == community_id)
            .cloned()
            .collect())
    }
}
