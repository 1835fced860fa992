//! Append-only record of every write call, accepted or rejected.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tenure_types::{BlockHeight, CallContext, Principal, TenureError, TenureResult};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JournalEntryId(pub String);

impl JournalEntryId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// One write call as the caller saw it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JournalEntry {
    pub entry_id: JournalEntryId,
    pub operation: String,
    pub caller: Principal,
    pub height: BlockHeight,
    /// Error code returned to the caller; `None` when the call succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_with: Option<u16>,
    pub recorded_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn succeeded(&self) -> bool {
        self.rejected_with.is_none()
    }
}

#[derive(Debug, Default)]
pub struct AuditJournal {
    entries: RwLock<Vec<JournalEntry>>,
}

impl AuditJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &self,
        operation: &str,
        ctx: &CallContext,
        rejected_with: Option<u16>,
    ) -> TenureResult<JournalEntryId> {
        let entry = JournalEntry {
            entry_id: JournalEntryId::generate(),
            operation: operation.to_string(),
            caller: ctx.sender.clone(),
            height: ctx.height,
            rejected_with,
            recorded_at: Utc::now(),
        };
        let entry_id = entry.entry_id.clone();

        let mut entries = self.entries.write().map_err(|_| TenureError::LockPoisoned)?;
        entries.push(entry);

        Ok(entry_id)
    }

    /// Snapshot of every entry in call order.
    pub fn entries(&self) -> TenureResult<Vec<JournalEntry>> {
        let entries = self.entries.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(entries.clone())
    }

    pub fn for_caller(&self, caller: &Principal) -> TenureResult<Vec<JournalEntry>> {
        let entries = self.entries.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(entries
            .iter()
            .filter(|e| e.caller == *caller)
            .cloned()
            .collect())
    }

    pub fn rejected(&self) -> TenureResult<Vec<JournalEntry>> {
        let entries = self.entries.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(entries
            .iter()
            .filter(|e| !e.succeeded())
            .cloned()
            .collect())
    }

    pub fn len(&self) -> TenureResult<usize> {
        let entries = self.entries.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> TenureResult<bool> {
        Ok(self.len()? == 0)
    }
}
