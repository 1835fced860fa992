//! Rejected writes leave every table and every counter untouched.

use proptest::prelude::*;
use tenure_benefits::{Agreement, AgreementTerms, LedgerStatistics, Payment};
use tenure_community::Community;
use tenure_service::{CallResponse, Session, Tenure, TenureConfig, DEFAULT_ADMIN};
use tenure_territory::Territory;
use tenure_types::{ActivityType, AgreementId, CommunityId, PaymentId, Principal, TerritoryId};
use tenure_usage_rights::UsageRight;

const OUTSIDER: &str = "ST2PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

#[derive(Debug, PartialEq)]
struct Snapshot {
    territories: Vec<Territory>,
    communities: Vec<Community>,
    rights: Vec<Vec<(ActivityType, UsageRight)>>,
    agreements: Vec<Agreement>,
    payments: Vec<Vec<Payment>>,
    statistics: LedgerStatistics,
}

fn snapshot(tenure: &Tenure) -> Snapshot {
    let ids = 1..=4u64;
    Snapshot {
        territories: tenure.territories().list().unwrap(),
        communities: tenure.communities().list().unwrap(),
        rights: ids
            .clone()
            .map(|id| tenure.usage_rights().rights_for_territory(TerritoryId(id)).unwrap())
            .collect(),
        agreements: ids
            .clone()
            .flat_map(|id| tenure.benefits().agreements_for_community(CommunityId(id)).unwrap())
            .collect(),
        payments: ids
            .map(|id| tenure.benefits().payments_for(AgreementId(id)).unwrap())
            .collect(),
        statistics: tenure.benefits().statistics().unwrap(),
    }
}

fn terms(id: u64) -> AgreementTerms {
    AgreementTerms {
        territory_id: TerritoryId(id),
        community_id: CommunityId(id),
        company: Principal::new("ST4COMPANY"),
        activity_type: ActivityType::TOURISM,
        compensation_amount: 250,
        compensation_frequency: 10,
    }
}

#[derive(Clone, Debug)]
enum Write {
    RegisterTerritory(u64),
    VerifyCommunity(u64),
    SetUsageRights(u64, u32, bool),
    CreateAgreement(u64),
    RecordPayment(u64, u64),
    EndAgreement(u64),
}

fn write_strategy() -> impl Strategy<Value = Write> {
    prop_oneof![
        (1u64..4).prop_map(Write::RegisterTerritory),
        (1u64..4).prop_map(Write::VerifyCommunity),
        (1u64..4, 1u32..7, any::<bool>()).prop_map(|(t, a, p)| Write::SetUsageRights(t, a, p)),
        (1u64..4).prop_map(Write::CreateAgreement),
        (1u64..4, 1u64..5_000).prop_map(|(a, amount)| Write::RecordPayment(a, amount)),
        (1u64..4).prop_map(Write::EndAgreement),
    ]
}

/// Run a write and report the error code, if any.
fn apply(session: &Session<'_>, write: &Write) -> Option<u16> {
    match write {
        Write::RegisterTerritory(community) => session
            .register_territory("Highland", vec![], CommunityId(*community))
            .err_code(),
        Write::VerifyCommunity(id) => session.verify_community(CommunityId(*id)).err_code(),
        Write::SetUsageRights(territory, activity, permitted) => session
            .set_usage_rights(TerritoryId(*territory), ActivityType(*activity), *permitted, "")
            .err_code(),
        Write::CreateAgreement(id) => session.create_agreement(terms(*id)).err_code(),
        Write::RecordPayment(agreement, amount) => session
            .record_payment(AgreementId(*agreement), *amount, Principal::new("ST5RECEIVER"))
            .err_code(),
        Write::EndAgreement(id) => session.end_agreement(AgreementId(*id)).err_code(),
    }
}

fn seeded() -> Tenure {
    let tenure = Tenure::from_config(&TenureConfig::default()).unwrap();
    let admin = tenure.session(Principal::new(DEFAULT_ADMIN));
    for id in 1..=3u64 {
        admin.register_community(format!("Community {id}"), Principal::new("ST3REP"), 40);
        admin.register_territory(format!("Territory {id}"), vec![], CommunityId(id));
        admin.create_agreement(terms(id));
    }
    admin.record_payment(AgreementId(1), 100, Principal::new("ST5RECEIVER"));
    admin.end_agreement(AgreementId(3));
    tenure
}

proptest! {
    #[test]
    fn property_outsider_writes_change_nothing(
        writes in proptest::collection::vec(write_strategy(), 1..30)
    ) {
        let tenure = seeded();
        let before = snapshot(&tenure);
        let outsider = tenure.session(Principal::new(OUTSIDER));

        for write in &writes {
            prop_assert_eq!(apply(&outsider, write), Some(403));
        }

        prop_assert_eq!(snapshot(&tenure), before);

        // Counters did not move either.
        let admin = tenure.session(Principal::new(DEFAULT_ADMIN));
        prop_assert_eq!(
            admin.register_territory("Next", vec![], CommunityId(1)),
            CallResponse::Ok(TerritoryId(4))
        );
        prop_assert_eq!(
            admin.create_agreement(terms(1)),
            CallResponse::Ok(AgreementId(4))
        );
        prop_assert_eq!(
            admin.record_payment(AgreementId(1), 1, Principal::new("ST5RECEIVER")),
            CallResponse::Ok(PaymentId(2))
        );
    }

    #[test]
    fn property_admin_ids_count_successes(
        writes in proptest::collection::vec(write_strategy(), 1..30)
    ) {
        let tenure = seeded();
        let admin = tenure.session(Principal::new(DEFAULT_ADMIN));
        let mut territories = 3u64;
        let mut agreements = 3u64;

        for write in &writes {
            let outcome = apply(&admin, write);
            match write {
                Write::RegisterTerritory(_) => {
                    prop_assert_eq!(outcome, None);
                    territories += 1;
                }
                Write::CreateAgreement(_) => {
                    prop_assert_eq!(outcome, None);
                    agreements += 1;
                }
                Write::SetUsageRights(..) | Write::EndAgreement(_) | Write::VerifyCommunity(_) => {
                    prop_assert_eq!(outcome, None);
                }
                Write::RecordPayment(..) => {
                    prop_assert!(outcome.is_none() || outcome == Some(403));
                }
            }
        }

        prop_assert_eq!(tenure.territories().count().unwrap() as u64, territories);
        prop_assert_eq!(tenure.territories().last_id().unwrap(), TerritoryId(territories));
        prop_assert_eq!(tenure.benefits().statistics().unwrap().total_agreements as u64, agreements);
    }
}
