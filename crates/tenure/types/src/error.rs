use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AgreementId, GuardedAction, Principal};

pub type TenureResult<T> = Result<T, TenureError>;

/// Which table a missing record was looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Community,
    Agreement,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecordKind::Community => "community",
            RecordKind::Agreement => "agreement",
        };
        f.write_str(name)
    }
}

/// Errors returned by every registry write.
///
/// A call that fails with any of these has performed no writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TenureError {
    #[error("unauthorized: {caller} may not {action}")]
    Unauthorized {
        caller: Principal,
        action: GuardedAction,
    },

    #[error("{kind} not found: {key}")]
    NotFound { kind: RecordKind, key: String },

    #[error("agreement {0} has ended and accepts no further writes")]
    InactiveState(AgreementId),

    #[error("registry lock poisoned")]
    LockPoisoned,

    #[error("id sequence exhausted")]
    SequenceExhausted,
}

impl TenureError {
    /// Code surfaced to callers in the `{err: code}` envelope.
    pub fn code(&self) -> u16 {
        match self {
            TenureError::Unauthorized { .. } => 403,
            TenureError::InactiveState(_) => 403,
            TenureError::NotFound { .. } => 404,
            TenureError::LockPoisoned | TenureError::SequenceExhausted => 500,
        }
    }

    pub fn not_found(kind: RecordKind, key: impl std::fmt::Display) -> Self {
        TenureError::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TenureError::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TenureError::NotFound { .. })
    }
}
