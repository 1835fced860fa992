//! # tenure-service
//!
//! One deployment of the territorial rights registries:
//!
//! - the four registries, sharing one [`SharedPolicy`]
//! - a [`BlockClock`] stamping every call
//! - an [`AuditJournal`] of every write attempt
//! - [`Session`], the caller-facing write surface answering with
//!   [`CallResponse`] (`{"ok": ..}` / `{"err": code}`)
//!
//! Reads go straight to the registries through the accessors on [`Tenure`]
//! and are never guarded.
//!
//! ```no_run
//! use tenure_service::{Tenure, TenureConfig};
//! use tenure_types::Principal;
//!
//! let config = TenureConfig::load(Some("tenure.toml"))?;
//! tenure_service::init_tracing(&config.logging)?;
//!
//! let tenure = Tenure::from_config(&config)?;
//! let admin = tenure.session(Principal::new(tenure_service::DEFAULT_ADMIN));
//! let community = admin.register_community("Amazonian Tribe", Principal::new("ST3REP"), 150);
//! assert!(community.is_ok());
//! # Ok::<(), tenure_service::ServiceError>(())
//! ```

#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod error;
pub mod journal;
pub mod logging;
pub mod response;
pub mod session;

pub use clock::BlockClock;
pub use config::{AuthorityConfig, ChainConfig, LoggingConfig, TenureConfig, DEFAULT_ADMIN};
pub use error::{ServiceError, ServiceResult};
pub use journal::{AuditJournal, JournalEntry, JournalEntryId};
pub use logging::init_tracing;
pub use response::CallResponse;
pub use session::Session;

use tenure_authority::SharedPolicy;
use tenure_benefits::BenefitLedger;
use tenure_community::CommunityRegistry;
use tenure_territory::TerritoryRegistry;
use tenure_types::{BlockHeight, Principal};
use tenure_usage_rights::UsageRightsTable;
use tracing::info;

/// The registries of one deployment and the environment they run in.
pub struct Tenure {
    territories: TerritoryRegistry,
    communities: CommunityRegistry,
    usage_rights: UsageRightsTable,
    benefits: BenefitLedger,
    clock: BlockClock,
    journal: AuditJournal,
}

impl Tenure {
    pub fn new(policy: SharedPolicy, genesis: BlockHeight) -> Self {
        Self {
            territories: TerritoryRegistry::new(policy.clone()),
            communities: CommunityRegistry::new(policy.clone()),
            usage_rights: UsageRightsTable::new(policy.clone()),
            benefits: BenefitLedger::new(policy),
            clock: BlockClock::new(genesis),
            journal: AuditJournal::new(),
        }
    }

    pub fn from_config(config: &TenureConfig) -> ServiceResult<Self> {
        let policy = config.authority.build_policy()?;
        let genesis = config.chain.genesis();

        info!(
            admins = config.authority.admins.len(),
            genesis = %genesis,
            "Tenure registries initialized"
        );

        Ok(Self::new(policy, genesis))
    }

    /// Bind a caller for a series of writes.
    pub fn session(&self, caller: Principal) -> Session<'_> {
        Session::new(self, caller)
    }

    pub fn territories(&self) -> &TerritoryRegistry {
        &self.territories
    }

    pub fn communities(&self) -> &CommunityRegistry {
        &self.communities
    }

    pub fn usage_rights(&self) -> &UsageRightsTable {
        &self.usage_rights
    }

    pub fn benefits(&self) -> &BenefitLedger {
        &self.benefits
    }

    pub fn clock(&self) -> &BlockClock {
        &self.clock
    }

    pub fn journal(&self) -> &AuditJournal {
        &self.journal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config() {
        let tenure = Tenure::from_config(&TenureConfig::default()).unwrap();
        assert_eq!(tenure.clock().current(), BlockHeight(0));
        assert!(tenure.journal().is_empty().unwrap());
    }

    #[test]
    fn from_config_rejects_missing_admins() {
        let config = TenureConfig {
            authority: AuthorityConfig { admins: vec![] },
            ..Default::default()
        };
        assert!(matches!(
            Tenure::from_config(&config),
            Err(ServiceError::Authority(_))
        ));
    }

    #[test]
    fn session_stamps_current_height() {
        let config = TenureConfig {
            chain: ChainConfig { genesis_height: 123 },
            ..Default::default()
        };
        let tenure = Tenure::from_config(&config).unwrap();
        let session = tenure.session(Principal::new(DEFAULT_ADMIN));
        assert_eq!(session.context().height, BlockHeight(123));

        tenure.clock().advance(7);
        assert_eq!(session.context().height, BlockHeight(130));
        assert_eq!(session.caller(), &Principal::new(DEFAULT_ADMIN));
    }
}
