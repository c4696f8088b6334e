//! Service tests for domain_claims, run against the in-memory store

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::ClaimId;
use domain_claims::ports::mock::MockClaimStore;
use domain_claims::history::{SUBMITTED_ACTION, UPDATED_ACTION};
use domain_claims::{
    ClaimError, ClaimIntakeService, ClaimPriority, ClaimQuery, ClaimStatus, ClaimType,
    ClaimUpdate, FraudRecommendation, NextAction, ProcessingLogPort, ProcessingStatus,
    TriageService,
};
use test_utils::{IdFixtures, NewClaimBuilder};

fn services(store: &MockClaimStore) -> (ClaimIntakeService, TriageService) {
    let store = Arc::new(store.clone());
    (
        ClaimIntakeService::new(store.clone()),
        TriageService::new(store.clone(), store),
    )
}

// ============================================================================
// Intake
// ============================================================================

mod intake_tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_and_get() {
        let store = MockClaimStore::new();
        let (intake, _) = services(&store);
        let owner = IdFixtures::owner();

        let claim = intake
            .submit(owner, NewClaimBuilder::new().build())
            .await
            .unwrap();

        assert_eq!(claim.status, ClaimStatus::Submitted);
        assert!(claim.claim_number.starts_with("CLM-"));
        assert!(claim.ai_analysis.is_none());

        let fetched = intake.get(owner, claim.id).await.unwrap();
        assert_eq!(fetched, claim);
    }

    #[tokio::test]
    async fn test_submit_rejects_negative_amount() {
        let store = MockClaimStore::new();
        let (intake, _) = services(&store);

        let err = intake
            .submit(IdFixtures::owner(), NewClaimBuilder::new().with_amount(dec!(-1)).build())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_other_users_claims_are_not_found() {
        let store = MockClaimStore::new();
        let (intake, _) = services(&store);

        let claim = intake
            .submit(IdFixtures::owner(), NewClaimBuilder::with_random_description().build())
            .await
            .unwrap();

        let err = intake.get(IdFixtures::other_owner(), claim.id).await.unwrap_err();
        assert!(matches!(err, ClaimError::ClaimNotFound(_)));
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let owner = IdFixtures::owner();
        let mut claims = Vec::new();
        for i in 0..5 {
            claims.push(
                NewClaimBuilder::new()
                    .with_type(if i % 2 == 0 { "auto" } else { "health" })
                    .submit_for(owner),
            );
        }
        claims.push(NewClaimBuilder::new().submit_for(IdFixtures::other_owner()));

        let store = MockClaimStore::with_claims(claims).await;
        let (intake, _) = services(&store);

        let page = intake.list(owner, ClaimQuery::page(1, 2)).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.claims.len(), 2);
        assert_eq!(page.total_pages, 3);

        let autos = intake
            .list(owner, ClaimQuery::page(1, 10).with_type(ClaimType::Auto))
            .await
            .unwrap();
        assert_eq!(autos.total, 3);
        assert!(autos.claims.iter().all(|c| c.claim_type == ClaimType::Auto));
    }

    #[tokio::test]
    async fn test_submit_records_history() {
        let store = MockClaimStore::new();
        let (intake, _) = services(&store);
        let owner = IdFixtures::owner();

        let claim = intake.submit(owner, NewClaimBuilder::new().build()).await.unwrap();
        let history = intake.history(owner, claim.id).await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, SUBMITTED_ACTION);
        assert_eq!(history[0].new_status, Some(ClaimStatus::Submitted));
        assert_eq!(history[0].performed_by, owner);
    }

    #[tokio::test]
    async fn test_update_while_submitted() {
        let store = MockClaimStore::new();
        let (intake, _) = services(&store);
        let owner = IdFixtures::owner();
        let claim = intake.submit(owner, NewClaimBuilder::new().build()).await.unwrap();

        let updated = intake
            .update(
                owner,
                claim.id,
                ClaimUpdate {
                    amount: Some(dec!(32000)),
                    priority: Some(ClaimPriority::Urgent),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.amount, dec!(32000));
        assert_eq!(updated.priority, ClaimPriority::Urgent);
        assert_eq!(updated.description, claim.description);
        assert!(updated.updated_at >= claim.updated_at);
        assert_eq!(intake.get(owner, claim.id).await.unwrap(), updated);

        let history = intake.history(owner, claim.id).await.unwrap();
        let actions: Vec<_> = history.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec![UPDATED_ACTION, SUBMITTED_ACTION]);
    }

    #[tokio::test]
    async fn test_update_rejected_once_under_review() {
        let store = MockClaimStore::new();
        let (intake, _) = services(&store);
        let owner = IdFixtures::owner();
        let claim = intake.submit(owner, NewClaimBuilder::new().build()).await.unwrap();
        store.set_status(claim.id, ClaimStatus::UnderReview).await;

        let err = intake
            .update(
                owner,
                claim.id,
                ClaimUpdate {
                    description: Some("rewritten".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ClaimError::NotEditable(_)));
        assert!(err.is_rejected());
        assert_eq!(intake.get(owner, claim.id).await.unwrap().description, claim.description);
        assert_eq!(intake.history(owner, claim.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_update_rejected() {
        let store = MockClaimStore::new();
        let (intake, _) = services(&store);
        let owner = IdFixtures::owner();
        let claim = intake.submit(owner, NewClaimBuilder::new().build()).await.unwrap();

        let err = intake
            .update(owner, claim.id, ClaimUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClaimError::EmptyUpdate));
    }

    #[tokio::test]
    async fn test_other_users_cannot_update_or_read_history() {
        let store = MockClaimStore::new();
        let (intake, _) = services(&store);
        let claim = intake
            .submit(IdFixtures::owner(), NewClaimBuilder::new().build())
            .await
            .unwrap();
        let stranger = IdFixtures::other_owner();

        let update = ClaimUpdate {
            amount: Some(dec!(1)),
            ..Default::default()
        };
        assert!(intake.update(stranger, claim.id, update).await.unwrap_err().is_not_found());
        assert!(intake.history(stranger, claim.id).await.unwrap_err().is_not_found());
    }
}

// ============================================================================
// Triage
// ============================================================================

mod triage_tests {
    use super::*;

    #[tokio::test]
    async fn test_process_claim_stores_result_and_logs() {
        let owner = IdFixtures::owner();
        let claim = NewClaimBuilder::new().submit_for(owner);
        let store = MockClaimStore::with_claims(vec![claim.clone()]).await;
        let (_, triage) = services(&store);

        let result = triage.process_claim(owner, claim.id).await.unwrap();
        assert_eq!(result.next_action, NextAction::StandardReview);

        let stored = triage.get_analysis(owner, claim.id).await.unwrap();
        assert_eq!(stored, result);

        let logs = store.logs().await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, ProcessingStatus::Success);
        assert_eq!(logs[0].workflow_name, "claim_processing");
        assert_eq!(logs[0].input["claim_number"], claim.claim_number.as_str());
        assert!(logs[0].output.is_some());
    }

    #[tokio::test]
    async fn test_analysis_missing_before_processing() {
        let owner = IdFixtures::owner();
        let claim = NewClaimBuilder::new().submit_for(owner);
        let store = MockClaimStore::with_claims(vec![claim.clone()]).await;
        let (_, triage) = services(&store);

        let err = triage.get_analysis(owner, claim.id).await.unwrap_err();
        assert!(matches!(err, ClaimError::AnalysisNotFound(_)));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_degraded_run_is_stored_and_logged_as_error() {
        let owner = IdFixtures::owner();
        let mut claim = NewClaimBuilder::new().submit_for(owner);
        // Bypasses submission validation to simulate a bad stored row
        claim.amount = dec!(-10);
        let store = MockClaimStore::with_claims(vec![claim.clone()]).await;
        let (_, triage) = services(&store);

        let result = triage.process_claim(owner, claim.id).await.unwrap();
        assert_eq!(result.next_action, NextAction::ManualReview);
        assert!(result.error.is_some());

        let logs = store.entries_for(claim.id).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, ProcessingStatus::Error);
        assert!(logs[0].output.is_none());
        assert!(logs[0].error_message.is_some());
    }

    #[tokio::test]
    async fn test_process_unknown_claim() {
        let store = MockClaimStore::new();
        let (_, triage) = services(&store);

        let err = triage
            .process_claim(IdFixtures::owner(), ClaimId::new_v7())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.logs().await.is_empty());
    }

    #[tokio::test]
    async fn test_fraud_check_on_owned_claim() {
        let owner = IdFixtures::owner();
        let claim = NewClaimBuilder::new()
            .with_type("property")
            .with_amount(dec!(300000))
            .with_description("Emergency, total loss")
            .submit_for(owner);
        let store = MockClaimStore::with_claims(vec![claim.clone()]).await;
        let (_, triage) = services(&store);

        let check = triage.fraud_check(owner, claim.id).await.unwrap();
        assert_eq!(check.fraud_probability.value(), dec!(0.7));
        assert_eq!(check.recommendation, FraudRecommendation::Investigate);
        assert_eq!(check.risk_factors.len(), 3);
    }

    #[tokio::test]
    async fn test_classify_document() {
        let store = MockClaimStore::new();
        let (_, triage) = services(&store);

        let doc = triage.classify_document("Repair shop RECEIPT", "invoice");
        assert_eq!(doc.extracted_data["vendor"], "Auto Repair Shop");
    }

    #[tokio::test]
    async fn test_storage_failure_is_logged_and_returned() {
        let owner = IdFixtures::owner();
        let claim = NewClaimBuilder::new().submit_for(owner);
        let store = MockClaimStore::with_claims(vec![claim.clone()]).await;
        store.fail_analysis_saves(true);
        let (_, triage) = services(&store);

        let err = triage.process_claim(owner, claim.id).await.unwrap_err();
        assert!(matches!(err, ClaimError::Port(ref e) if e.is_transient()));

        let logs = store.entries_for(claim.id).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, ProcessingStatus::Error);
        assert!(logs[0].output.is_none());
        assert!(logs[0].error_message.as_deref().unwrap().contains("down"));
        assert_eq!(logs[0].input["claim_number"], claim.claim_number.as_str());

        let missing = triage.get_analysis(owner, claim.id).await.unwrap_err();
        assert!(matches!(missing, ClaimError::AnalysisNotFound(_)));
    }

    #[tokio::test]
    async fn test_storage_failure_with_log_down_still_returns_error() {
        let owner = IdFixtures::owner();
        let claim = NewClaimBuilder::new().submit_for(owner);
        let store = MockClaimStore::with_claims(vec![claim.clone()]).await;
        store.fail_analysis_saves(true);
        store.fail_log_appends(true);
        let (_, triage) = services(&store);

        let err = triage.process_claim(owner, claim.id).await.unwrap_err();
        assert!(matches!(err, ClaimError::Port(_)));
        assert!(store.logs().await.is_empty());
    }
}
