//! Tenure Types - shared vocabulary for the territorial rights registries
//!
//! Every registry speaks in the same terms: a [`Principal`] calls in at some
//! [`BlockHeight`], records are addressed by small sequential ids, and every
//! failure is one of the [`TenureError`] kinds with a fixed numeric code.

#![deny(unsafe_code)]

pub mod error;
pub mod ids;
pub mod sequence;

pub use error::{RecordKind, TenureError, TenureResult};
pub use ids::{AgreementId, CommunityId, PaymentId, TerritoryId};
pub use sequence::Sequence;

use serde::{Deserialize, Serialize};

/// An account identity: a caller, a company, a representative or a payee.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(pub String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Height of the execution environment's chain, used as an opaque timestamp.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    pub const fn new(height: u64) -> Self {
        Self(height)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of land use a right or an agreement is about.
///
/// The code space is open: any `u32` is accepted and stored as given. The
/// named constants are the catalogue registries ship with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityType(pub u32);

impl ActivityType {
    pub const AGRICULTURE: ActivityType = ActivityType(1);
    pub const HUNTING: ActivityType = ActivityType(2);
    pub const FISHING: ActivityType = ActivityType(3);
    pub const LOGGING: ActivityType = ActivityType(4);
    pub const MINING: ActivityType = ActivityType(5);
    pub const TOURISM: ActivityType = ActivityType(6);

    pub const fn code(self) -> u32 {
        self.0
    }

    /// Human-readable name for catalogued codes.
    pub fn label(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("agriculture"),
            2 => Some("hunting"),
            3 => Some("fishing"),
            4 => Some("logging"),
            5 => Some("mining"),
            6 => Some("tourism"),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{}", label),
            None => write!(f, "activity-{}", self.0),
        }
    }
}

/// Every write that passes through the authorization guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardedAction {
    RegisterTerritory,
    VerifyCommunity,
    SetUsageRights,
    CreateAgreement,
    RecordPayment,
    EndAgreement,
}

impl GuardedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardedAction::RegisterTerritory => "register_territory",
            GuardedAction::VerifyCommunity => "verify_community",
            GuardedAction::SetUsageRights => "set_usage_rights",
            GuardedAction::CreateAgreement => "create_agreement",
            GuardedAction::RecordPayment => "record_payment",
            GuardedAction::EndAgreement => "end_agreement",
        }
    }
}

impl std::fmt::Display for GuardedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment inputs of a single call: who sent it and at which height.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub sender: Principal,
    pub height: BlockHeight,
}

impl CallContext {
    pub fn new(sender: Principal, height: BlockHeight) -> Self {
        Self { sender, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_labels_cover_catalogue() {
        assert_eq!(ActivityType::HUNTING.label(), Some("hunting"));
        assert_eq!(ActivityType::TOURISM.to_string(), "tourism");
        assert_eq!(ActivityType(42).label(), None);
        assert_eq!(ActivityType(42).to_string(), "activity-42");
    }

    #[test]
    fn scalar_types_serialize_transparently() {
        assert_eq!(serde_json::to_string(&BlockHeight(123)).unwrap(), "123");
        assert_eq!(serde_json::to_string(&ActivityType::LOGGING).unwrap(), "4");
        assert_eq!(
            serde_json::to_string(&Principal::new("ST1ADMIN")).unwrap(),
            "\"ST1ADMIN\""
        );
    }

    #[test]
    fn guarded_action_names() {
        assert_eq!(GuardedAction::RecordPayment.to_string(), "record_payment");
        assert_eq!(
            serde_json::to_string(&GuardedAction::EndAgreement).unwrap(),
            "\"end_agreement\""
        );
    }
}
