use std::collections::BTreeMap;
use std::sync::RwLock;

use tenure_authority::SharedPolicy;
use tenure_types::{
    AgreementId, CallContext, CommunityId, GuardedAction, PaymentId, Principal, RecordKind,
    Sequence, TenureError, TenureResult,
};
use tracing::{info, warn};

use crate::types::{Agreement, AgreementTerms, LedgerStatistics, Payment};

/// An agreement together with the sequence its payments draw ids from.
struct AgreementSlot {
    agreement: Agreement,
    payments: Sequence,
}

#[derive(Default)]
struct LedgerTable {
    agreements: Sequence,
    slots: BTreeMap<AgreementId, AgreementSlot>,
    payments: BTreeMap<(AgreementId, PaymentId), Payment>,
}

impl LedgerTable {
    fn slot_mut(&mut self, id: AgreementId) -> TenureResult<&mut AgreementSlot> {
        self.slots
            .get_mut(&id)
            .ok_or_else(|| TenureError::not_found(RecordKind::Agreement, id))
    }
}

fn payment_range(id: AgreementId) -> std::ops::RangeInclusive<(AgreementId, PaymentId)> {
    (id, PaymentId(0))..=(id, PaymentId(u64::MAX))
}

/// The benefit-sharing ledger.
pub struct BenefitLedger {
    policy: SharedPolicy,
    table: RwLock<LedgerTable>,
}

impl BenefitLedger {
    pub fn new(policy: SharedPolicy) -> Self {
        Self {
            policy,
            table: RwLock::new(LedgerTable::default()),
        }
    }

    /// Open a new agreement starting at the caller's height.
    pub fn create_agreement(
        &self,
        ctx: &CallContext,
        terms: AgreementTerms,
    ) -> TenureResult<AgreementId> {
        self.policy
            .authorize(&ctx.sender, GuardedAction::CreateAgreement)?;

        let mut table = self.table.write().map_err(|_| TenureError::LockPoisoned)?;
        let id = AgreementId(table.agreements.peek_next()?);
        let agreement = Agreement::open(id, terms, ctx.height);

        info!(
            agreement_id = %id,
            territory_id = %agreement.territory_id,
            community_id = %agreement.community_id,
            company = %agreement.company,
            activity = %agreement.activity_type,
            amount = agreement.compensation_amount,
            "Benefit agreement created"
        );

        table.slots.insert(
            id,
            AgreementSlot {
                agreement,
                payments: Sequence::new(),
            },
        );
        table.agreements.commit(id.0);

        Ok(id)
    }

    /// Record a payment under an active agreement and return its id.
    pub fn record_payment(
        &self,
        ctx: &CallContext,
        agreement_id: AgreementId,
        amount: u64,
        received_by: Principal,
    ) -> TenureResult<PaymentId> {
        self.policy
            .authorize(&ctx.sender, GuardedAction::RecordPayment)?;

        let mut table = self.table.write().map_err(|_| TenureError::LockPoisoned)?;
        let LedgerTable {
            slots, payments, ..
        } = &mut *table;
        let slot = slots
            .get_mut(&agreement_id)
            .ok_or_else(|| TenureError::not_found(RecordKind::Agreement, agreement_id))?;

        if !slot.agreement.active {
            warn!(
                agreement_id = %agreement_id,
                amount,
                "Payment rejected, agreement has ended"
            );
            return Err(TenureError::InactiveState(agreement_id));
        }

        let payment_id = PaymentId(slot.payments.peek_next()?);
        let payment = Payment {
            agreement_id,
            payment_id,
            amount,
            paid_at: ctx.height,
            received_by,
        };

        info!(
            agreement_id = %agreement_id,
            payment_id = %payment_id,
            amount,
            received_by = %payment.received_by,
            "Benefit payment recorded"
        );

        payments.insert((agreement_id, payment_id), payment);
        slot.payments.commit(payment_id.0);

        Ok(payment_id)
    }

    /// End an agreement at the caller's height.
    pub fn end_agreement(
        &self,
        ctx: &CallContext,
        agreement_id: AgreementId,
    ) -> TenureResult<bool> {
        self.policy
            .authorize(&ctx.sender, GuardedAction::EndAgreement)?;

        let mut table = self.table.write().map_err(|_| TenureError::LockPoisoned)?;
        let agreement = &mut table.slot_mut(agreement_id)?.agreement;

        if let Some(previous) = agreement.end_height {
            warn!(
                agreement_id = %agreement_id,
                previous = %previous,
                height = %ctx.height,
                "Agreement ended again, end height replaced"
            );
        }

        agreement.end_height = Some(ctx.height);
        agreement.active = false;

        info!(agreement_id = %agreement_id, height = %ctx.height, "Benefit agreement ended");
        Ok(true)
    }

    pub fn get_agreement(&self, id: AgreementId) -> TenureResult<Option<Agreement>> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table.slots.get(&id).map(|slot| slot.agreement.clone()))
    }

    pub fn get_payment(
        &self,
        agreement_id: AgreementId,
        payment_id: PaymentId,
    ) -> TenureResult<Option<Payment>> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table.payments.get(&(agreement_id, payment_id)).cloned())
    }

    /// Payments of one agreement in id order; empty for unknown agreements.
    pub fn payments_for(&self, agreement_id: AgreementId) -> TenureResult<Vec<Payment>> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table
            .payments
            .range(payment_range(agreement_id))
            .map(|(_, payment)| payment.clone())
            .collect())
    }

    /// Sum of all payments recorded under an agreement.
    pub fn total_paid(&self, agreement_id: AgreementId) -> TenureResult<u128> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table
            .payments
            .range(payment_range(agreement_id))
            .map(|(_, payment)| u128::from(payment.amount))
            .sum())
    }

    pub fn agreements_for_community(
        &self,
        community_id: CommunityId,
    ) -> TenureResult<Vec<Agreement>> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;
        Ok(table
            .slots
            .values()
            .filter(|slot| slot.agreement.community_id == community_id)
            .map(|slot| slot.agreement.clone())
            .collect())
    }

    pub fn statistics(&self) -> TenureResult<LedgerStatistics> {
        let table = self.table.read().map_err(|_| TenureError::LockPoisoned)?;

        let total_agreements = table.slots.len();
        let active_agreements = table
            .slots
            .values()
            .filter(|slot| slot.agreement.active)
            .count();

        Ok(LedgerStatistics {
            total_agreements,
            active_agreements,
            ended_agreements: total_agreements - active_agreements,
            total_payments: table.payments.len(),
        })
    }
}
