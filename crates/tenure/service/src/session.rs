use tenure_benefits::AgreementTerms;
use tenure_territory::Coordinate;
use tenure_types::{
    ActivityType, AgreementId, CallContext, CommunityId, PaymentId, Principal, TenureResult,
    TerritoryId,
};
use tracing::error;

use crate::response::CallResponse;
use crate::Tenure;

/// A caller bound to a deployment.
///
/// Every write is stamped with the clock's current height, journaled, and
/// answered with a [`CallResponse`].
pub struct Session<'a> {
    tenure: &'a Tenure,
    caller: Principal,
}

impl<'a> Session<'a> {
    pub(crate) fn new(tenure: &'a Tenure, caller: Principal) -> Self {
        Self { tenure, caller }
    }

    pub fn caller(&self) -> &Principal {
        &self.caller
    }

    /// Context the next call will run with.
    pub fn context(&self) -> CallContext {
        CallContext::new(self.caller.clone(), self.tenure.clock().current())
    }

    fn call<T>(
        &self,
        operation: &str,
        write: impl FnOnce(&CallContext) -> TenureResult<T>,
    ) -> CallResponse<T> {
        let ctx = self.context();
        let result = write(&ctx);

        let rejected_with = result.as_ref().err().map(|e| e.code());
        if let Err(err) = self.tenure.journal().append(operation, &ctx, rejected_with) {
            error!(operation, caller = %ctx.sender, error = %err, "Journal append failed");
        }

        result.into()
    }

    pub fn register_territory(
        &self,
        name: impl Into<String>,
        boundary: Vec<Coordinate>,
        community_id: CommunityId,
    ) -> CallResponse<TerritoryId> {
        self.call("register_territory", |ctx| {
            self.tenure
                .territories()
                .register(ctx, name, boundary, community_id)
        })
    }

    pub fn register_community(
        &self,
        name: impl Into<String>,
        representative: Principal,
        members_count: u32,
    ) -> CallResponse<CommunityId> {
        self.call("register_community", |ctx| {
            self.tenure
                .communities()
                .register(ctx, name, representative, members_count)
        })
    }

    pub fn verify_community(&self, community_id: CommunityId) -> CallResponse<bool> {
        self.call("verify_community", |ctx| {
            self.tenure.communities().verify(ctx, community_id)
        })
    }

    pub fn set_usage_rights(
        &self,
        territory_id: TerritoryId,
        activity_type: ActivityType,
        permitted: bool,
        restrictions: impl Into<String>,
    ) -> CallResponse<bool> {
        self.call("set_usage_rights", |ctx| {
            self.tenure
                .usage_rights()
                .set(ctx, territory_id, activity_type, permitted, restrictions)
        })
    }

    pub fn create_agreement(&self, terms: AgreementTerms) -> CallResponse<AgreementId> {
        self.call("create_agreement", |ctx| {
            self.tenure.benefits().create_agreement(ctx, terms)
        })
    }

    pub fn record_payment(
        &self,
        agreement_id: AgreementId,
        amount: u64,
        received_by: Principal,
    ) -> CallResponse<PaymentId> {
        self.call("record_payment", |ctx| {
            self.tenure
                .benefits()
                .record_payment(ctx, agreement_id, amount, received_by)
        })
    }

    pub fn end_agreement(&self, agreement_id: AgreementId) -> CallResponse<bool> {
        self.call("end_agreement", |ctx| {
            self.tenure.benefits().end_agreement(ctx, agreement_id)
        })
    }
}
