//! Tenure Community - community registration and verification
//!
//! Registration is open to any caller. Only the administrator can mark a
//! community as verified. Verification never reverts; verifying an already
//! verified community succeeds again and moves `verification_date` to the
//! height of the latest call.

#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tenure_authority::SharedPolicy;
use tenure_types::{
    BlockHeight, CallContext, CommunityId, GuardedAction, Principal, RecordKind, Sequence,
    TenureError, TenureResult,
};
use tracing::{debug, info};

/// A registered community.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
    pub representative: Principal,
    pub members_count: u32,
    pub verified: bool,
    pub verification_date: Option<BlockHeight>,
}

#[derive(Default)]
struct CommunityTable {
    sequence: Sequence,
    records: BTreeMap<CommunityId, Community>,
}

/// Community registry.
pub struct CommunityRegistry {
    policy: SharedPolicy,
    table: RwLock<CommunityTable>,
}

impl CommunityRegistry {
    pub fn new(policy: SharedPolicy) -> Self {
        Self {
            policy,
            table: RwLock::new(CommunityTable::default()),
        }
    }

    /// Register a community. Any caller may do this.
    pub fn register(
        &self,
        ctx: &CallContext,
        name: impl Into<String>,
        representative: Principal,
        members_count: u32,
    ) -> TenureResult<CommunityId> {
        let mut table = self.table.write().map_err(|_| TenureError::LockPoisoned)?;
        let id = CommunityId(table.sequence.peek_next()?);

        info!(
            community_id = %id,
            registered_by = %ctx.sender,
            members = members_count,
            "Community registered"
        );

        table.records.insert(
            id,
            Community {
                id,
                name: name.into(),
                representative,
                members_count,
                verified: false,
                verification_date: None,
            },
        );
        table.sequence.commit(id.0);

        Ok(id)
    }

    /// Mark a community verified at the caller's height.
    pub fn verify(&self, ctx: &CallContext, id: CommunityId) -> TenureResult<bool> {
        self.policy
            .authorize(&ctx.sender, GuardedAction::VerifyCommunity)?;

        let mut table = self.table.write().map_err(|_| TenureError::LockPoisoned)?;
        let community = table
            .records
            .get_mut(&id)
            .ok_or_else(|| TenureError::not_found(RecordKind::Community, id))?;

        if let Some(previous) = community.verification_date {
            debug!(
                community_id = %id,
                previous = %previous,
                height = %ctx.height,
                "Community re-verified, verification date replaced"
            );
        }

        community.verified = true;
        community.verification_date = Some(ctx.height);

        info!(community_id = %id, height = %ctx.height, "Community verified");
        Ok(true)
    }

    pub fn get(&self, id: CommunityId) -> TenureResult<Option<Community>> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table.records.get(&id).cloned())
    }

    /// `false` for unknown ids.
    pub fn is_verified(&self, id: CommunityId) -> TenureResult<bool> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table.records.get(&id).is_some_and(|c| c.verified))
    }

    pub fn count(&self) -> TenureResult<usize> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table.records.len())
    }

    pub fn list(&self) -> TenureResult<Vec<Community>> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table.records.values().cloned().collect())
    }

    pub fn list_verified(&self) -> TenureResult<Vec<Community>> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table
            .records
            .values()
            .filter(|c| c.verified)
            .cloned()
            .collect())
    }
}
