use serde::{Deserialize, Serialize};
use tenure_types::{
    ActivityType, AgreementId, BlockHeight, CommunityId, PaymentId, Principal, TerritoryId,
};

/// What the administrator supplies when creating an agreement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementTerms {
    /// Referenced by value; not checked against the territory registry.
    pub territory_id: TerritoryId,
    /// Referenced by value; not checked against the community registry.
    pub community_id: CommunityId,
    pub company: Principal,
    pub activity_type: ActivityType,
    /// Amount per compensation period, in minor units.
    pub compensation_amount: u64,
    /// Compensation period in blocks.
    pub compensation_frequency: u64,
}

/// A benefit-sharing agreement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    pub id: AgreementId,
    pub territory_id: TerritoryId,
    pub community_id: CommunityId,
    pub company: Principal,
    pub activity_type: ActivityType,
    pub compensation_amount: u64,
    pub compensation_frequency: u64,
    pub start_height: BlockHeight,
    pub end_height: Option<BlockHeight>,
    pub active: bool,
}

impl Agreement {
    pub(crate) fn open(id: AgreementId, terms: AgreementTerms, start_height: BlockHeight) -> Self {
        Self {
            id,
            territory_id: terms.territory_id,
            community_id: terms.community_id,
            company: terms.company,
            activity_type: terms.activity_type,
            compensation_amount: terms.compensation_amount,
            compensation_frequency: terms.compensation_frequency,
            start_height,
            end_height: None,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// A payment recorded under an agreement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub agreement_id: AgreementId,
    pub payment_id: PaymentId,
    pub amount: u64,
    pub paid_at: BlockHeight,
    pub received_by: Principal,
}

/// Summary counts over the whole ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStatistics {
    pub total_agreements: usize,
    pub active_agreements: usize,
    pub ended_agreements: usize,
    pub total_payments: usize,
}
