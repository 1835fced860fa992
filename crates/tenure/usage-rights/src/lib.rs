//! Tenure Usage Rights - which activities are permitted on which territory
//!
//! One entry per `(territory, activity)` pair. Setting an entry replaces any
//! previous one; there is no history and no delete. An activity with no entry
//! is not permitted.

#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tenure_authority::SharedPolicy;
use tenure_types::{
    ActivityType, BlockHeight, CallContext, GuardedAction, TenureError, TenureResult, TerritoryId,
};
use tracing::{debug, info};

/// Composite key of the usage rights table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageKey {
    pub territory_id: TerritoryId,
    pub activity_type: ActivityType,
}

impl UsageKey {
    pub fn new(territory_id: TerritoryId, activity_type: ActivityType) -> Self {
        Self {
            territory_id,
            activity_type,
        }
    }
}

impl std::fmt::Display for UsageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.territory_id, self.activity_type.code())
    }
}

/// Current ruling for one activity on one territory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRight {
    pub permitted: bool,
    pub restrictions: String,
    pub updated_at: BlockHeight,
}

/// Admin-write, public-read usage rights table.
pub struct UsageRightsTable {
    policy: SharedPolicy,
    // Ordered by territory then activity code so per-territory scans are ranges.
    rights: RwLock<BTreeMap<UsageKey, UsageRight>>,
}

impl UsageRightsTable {
    pub fn new(policy: SharedPolicy) -> Self {
        Self {
            policy,
            rights: RwLock::new(BTreeMap::new()),
        }
    }

    /// Set, or overwrite, the ruling for `(territory_id, activity_type)`.
    pub fn set(
        &self,
        ctx: &CallContext,
        territory_id: TerritoryId,
        activity_type: ActivityType,
        permitted: bool,
        restrictions: impl Into<String>,
    ) -> TenureResult<bool> {
        self.policy
            .authorize(&ctx.sender, GuardedAction::SetUsageRights)?;

        let key = UsageKey::new(territory_id, activity_type);
        let right = UsageRight {
            permitted,
            restrictions: restrictions.into(),
            updated_at: ctx.height,
        };

        let mut rights = self.rights.write().map_err(|_| TenureError::LockPoisoned)?;
        if let Some(previous) = rights.insert(key, right) {
            debug!(
                key = %key,
                was_permitted = previous.permitted,
                "Usage right overwritten"
            );
        }

        info!(
            territory_id = %territory_id,
            activity = %activity_type,
            permitted,
            height = %ctx.height,
            "Usage right set"
        );

        Ok(true)
    }

    pub fn get(
        &self,
        territory_id: TerritoryId,
        activity_type: ActivityType,
    ) -> TenureResult<Option<UsageRight>> {
        let rights = self.rights.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(rights
            .get(&UsageKey::new(territory_id, activity_type))
            .cloned())
    }

    /// `false` when no ruling exists for the pair.
    pub fn is_permitted(
        &self,
        territory_id: TerritoryId,
        activity_type: ActivityType,
    ) -> TenureResult<bool> {
        let rights = self.rights.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(rights
            .get(&UsageKey::new(territory_id, activity_type))
            .is_some_and(|r| r.permitted))
    }

    /// Every ruling on one territory, ordered by activity code.
    pub fn rights_for_territory(
        &self,
        territory_id: TerritoryId,
    ) -> TenureResult<Vec<(ActivityType, UsageRight)>> {
        let rights = self.rights.read().map_err(|_| TenureError::LockPoisoned)?;
        let from = UsageKey::new(territory_id, ActivityType(u32::MIN));
        let to = UsageKey::new(territory_id, ActivityType(u32::MAX));
        Ok(rights
            .range(from..=to)
            .map(|(key, right)| (key.activity_type, right.clone()))
            .collect())
    }

    pub fn len(&self) -> TenureResult<usize> {
        let rights = self.rights.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(rights.len())
    }

    pub fn is_empty(&self) -> TenureResult<bool> {
        Ok(self.len()? == 0)
    }
}
