//! Configuration for a tenure deployment

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tenure_authority::{AdminSet, SharedPolicy, SingleAdmin};
use tenure_types::{BlockHeight, Principal};

use crate::error::{ServiceError, ServiceResult};

/// Administrator the registries ship with.
pub const DEFAULT_ADMIN: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenureConfig {
    /// Who may perform guarded writes
    #[serde(default)]
    pub authority: AuthorityConfig,

    /// Block clock configuration
    #[serde(default)]
    pub chain: ChainConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Authority configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityConfig {
    /// Administrator principals. One entry yields a single-admin policy.
    #[serde(default = "default_admins")]
    pub admins: Vec<String>,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            admins: default_admins(),
        }
    }
}

impl AuthorityConfig {
    /// Build the policy every registry will share.
    pub fn build_policy(&self) -> ServiceResult<SharedPolicy> {
        let mut admins: Vec<Principal> = self
            .admins
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(Principal::new)
            .collect();

        match admins.len() {
            0 => Err(ServiceError::Authority(
                "at least one administrator is required".into(),
            )),
            1 => Ok(SingleAdmin::shared(admins.remove(0))),
            _ => Ok(Arc::new(AdminSet::new(admins))),
        }
    }
}

/// Block clock configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Height the clock starts at
    #[serde(default)]
    pub genesis_height: u64,
}

impl ChainConfig {
    pub fn genesis(&self) -> BlockHeight {
        BlockHeight(self.genesis_height)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_admins() -> Vec<String> {
    vec![DEFAULT_ADMIN.to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TenureConfig {
    /// Load configuration from file
    ///
    /// Sources, later overriding earlier: built-in defaults, the optional
    /// file, then `TENURE_`-prefixed environment variables with `__` between
    /// nested keys (`TENURE_CHAIN__GENESIS_HEIGHT=100`). `TENURE_AUTHORITY__ADMINS`
    /// takes a comma-separated list.
    pub fn load(path: Option<&str>) -> ServiceResult<Self> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&TenureConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("TENURE")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("authority.admins")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenure_types::GuardedAction;

    #[test]
    fn test_default_config() {
        let config = TenureConfig::default();
        assert_eq!(config.authority.admins, vec![DEFAULT_ADMIN.to_string()]);
        assert_eq!(config.chain.genesis(), BlockHeight(0));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_without_file_matches_defaults() {
        let config = TenureConfig::load(None).unwrap();
        assert_eq!(config.authority.admins, vec![DEFAULT_ADMIN.to_string()]);
    }

    #[test]
    fn test_single_admin_policy() {
        let policy = AuthorityConfig::default().build_policy().unwrap();
        let admin = Principal::new(DEFAULT_ADMIN);
        let other = Principal::new("ST2OTHER");
        assert!(policy.is_authorized(&admin, GuardedAction::VerifyCommunity));
        assert!(!policy.is_authorized(&other, GuardedAction::VerifyCommunity));
    }

    #[test]
    fn test_admin_set_policy() {
        let config = AuthorityConfig {
            admins: vec!["ST1A".into(), " ST1B ".into()],
        };
        let policy = config.build_policy().unwrap();
        assert!(policy.is_authorized(&Principal::new("ST1A"), GuardedAction::EndAgreement));
        assert!(policy.is_authorized(&Principal::new("ST1B"), GuardedAction::EndAgreement));
    }

    #[test]
    fn test_empty_admins_rejected() {
        let config = AuthorityConfig {
            admins: vec!["  ".into()],
        };
        assert!(matches!(
            config.build_policy(),
            Err(ServiceError::Authority(_))
        ));
    }
}
