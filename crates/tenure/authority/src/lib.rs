//! Tenure Authority - who may write to the registries
//!
//! Every registry receives its guard as an injected [`AuthorizationPolicy`].
//! Reads are never guarded. A rejected write returns
//! [`TenureError::Unauthorized`] before any state is touched.
//!
//! Shipped policies:
//!
//! - [`SingleAdmin`]: one fixed administrator principal
//! - [`AdminSet`]: any principal out of a fixed set
//! - any `Fn(&Principal, GuardedAction) -> bool` closure, for role checks
//!   that depend on the action

#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use tenure_types::{GuardedAction, Principal, TenureError, TenureResult};
use tracing::warn;

/// A policy shared by every registry of one deployment.
pub type SharedPolicy = Arc<dyn AuthorizationPolicy>;

/// Decides whether a caller may perform a guarded write.
pub trait AuthorizationPolicy: Send + Sync {
    fn is_authorized(&self, caller: &Principal, action: GuardedAction) -> bool;

    /// Check and turn a denial into the caller-visible error.
    fn authorize(&self, caller: &Principal, action: GuardedAction) -> TenureResult<()> {
        if self.is_authorized(caller, action) {
            return Ok(());
        }

        warn!(caller = %caller, action = %action, "Write rejected by authorization policy");
        Err(TenureError::Unauthorized {
            caller: caller.clone(),
            action,
        })
    }
}

impl<F> AuthorizationPolicy for F
where
    F: Fn(&Principal, GuardedAction) -> bool + Send + Sync,
{
    fn is_authorized(&self, caller: &Principal, action: GuardedAction) -> bool {
        self(caller, action)
    }
}

/// Exactly one principal may perform every guarded write.
#[derive(Clone, Debug)]
pub struct SingleAdmin {
    admin: Principal,
}

impl SingleAdmin {
    pub fn new(admin: Principal) -> Self {
        Self { admin }
    }

    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    pub fn shared(admin: Principal) -> SharedPolicy {
        Arc::new(Self::new(admin))
    }
}

impl AuthorizationPolicy for SingleAdmin {
    fn is_authorized(&self, caller: &Principal, _action: GuardedAction) -> bool {
        *caller == self.admin
    }
}

/// Any member of a fixed set may perform every guarded write.
#[derive(Clone, Debug, Default)]
pub struct AdminSet {
    admins: BTreeSet<Principal>,
}

impl AdminSet {
    pub fn new(admins: impl IntoIterator<Item = Principal>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }

    pub fn contains(&self, principal: &Principal) -> bool {
        self.admins.contains(principal)
    }

    pub fn len(&self) -> usize {
        self.admins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}

impl AuthorizationPolicy for AdminSet {
    fn is_authorized(&self, caller: &Principal, _action: GuardedAction) -> bool {
        self.contains(caller)
    }
}
