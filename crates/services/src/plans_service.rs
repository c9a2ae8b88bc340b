//! Persistence for user-authored study plans, stored as one JSON array
//! under a well-known key.

use std::sync::Arc;

use tracing::warn;

use prep_core::model::{PlanId, PlanStatus, StudyPlan, StudyPlanDraft};
use prep_core::time::Clock;
use storage::repository::KeyValueStore;

use crate::error::PlansServiceError;

/// Store key for the study-plan list.
pub const PLANS_KEY: &str = "study_plans";

/// CRUD over the persisted study-plan list.
#[derive(Clone)]
pub struct PlansService {
    store: Arc<dyn KeyValueStore>,
    clock: Clock,
}

impl PlansService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            clock: Clock::default(),
        }
    }

    /// Override the clock (usually for deterministic testing).
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// All stored plans; missing or malformed data reads as an empty list.
    pub async fn list(&self) -> Vec<StudyPlan> {
        let raw = match self.store.get(PLANS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(error) => {
                warn!(%error, "study-plan store unreadable; starting from empty");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|error| {
            warn!(%error, "stored study plans malformed; starting from empty");
            Vec::new()
        })
    }

    /// Validate and persist a new plan, returning it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `PlansServiceError` if the draft is invalid or the list
    /// cannot be written.
    pub async fn add(&self, draft: StudyPlanDraft) -> Result<StudyPlan, PlansServiceError> {
        let plan = draft.validate(PlanId::new(), self.clock.now())?;

        let mut plans = self.list().await;
        plans.push(plan.clone());
        self.persist(&plans).await?;

        Ok(plan)
    }

    /// Move a plan to a new status.
    ///
    /// # Errors
    ///
    /// Returns `PlansServiceError::NotFound` if no plan has the given id,
    /// or a storage error if the list cannot be written.
    pub async fn update_status(
        &self,
        id: PlanId,
        status: PlanStatus,
    ) -> Result<StudyPlan, PlansServiceError> {
        let mut plans = self.list().await;
        let Some(plan) = plans.iter_mut().find(|p| p.id == id) else {
            return Err(PlansServiceError::NotFound { id });
        };

        plan.status = status;
        let updated = plan.clone();
        self.persist(&plans).await?;

        Ok(updated)
    }

    /// Remove a plan.
    ///
    /// # Errors
    ///
    /// Returns `PlansServiceError::NotFound` if no plan has the given id,
    /// or a storage error if the list cannot be written.
    pub async fn delete(&self, id: PlanId) -> Result<(), PlansServiceError> {
        let mut plans = self.list().await;
        let before = plans.len();
        plans.retain(|p| p.id != id);
        if plans.len() == before {
            return Err(PlansServiceError::NotFound { id });
        }

        self.persist(&plans).await
    }

    async fn persist(&self, plans: &[StudyPlan]) -> Result<(), PlansServiceError> {
        let serialized = serde_json::to_string(plans)?;
        self.store.set(PLANS_KEY, &serialized).await?;
        Ok(())
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use prep_core::model::{BandScore, PlanKind};
    use prep_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryStore;

    fn service() -> PlansService {
        PlansService::new(Arc::new(InMemoryStore::new())).with_clock(fixed_clock())
    }

    fn draft(title: &str) -> StudyPlanDraft {
        StudyPlanDraft {
            title: title.to_string(),
            description: "Two full mocks".to_string(),
            target_date: fixed_now() + Duration::days(14),
            target_score: Some(BandScore::try_from(7.0).unwrap()),
            kind: PlanKind::Exam,
        }
    }

    #[tokio::test]
    async fn empty_store_lists_no_plans() {
        assert!(service().list().await.is_empty());
    }

    #[tokio::test]
    async fn added_plans_round_trip() {
        let svc = service();
        let plan = svc.add(draft("Exam sprint")).await.unwrap();
        assert_eq!(plan.status, PlanStatus::Upcoming);
        assert_eq!(plan.created_at, fixed_now());

        let listed = svc.list().await;
        assert_eq!(listed, vec![plan]);
    }

    #[tokio::test]
    async fn invalid_drafts_are_rejected() {
        let err = service().add(draft("   ")).await.unwrap_err();
        assert!(matches!(err, PlansServiceError::Plan(_)));
    }

    #[tokio::test]
    async fn status_updates_persist() {
        let svc = service();
        let plan = svc.add(draft("Exam sprint")).await.unwrap();

        let updated = svc
            .update_status(plan.id, PlanStatus::Completed)
            .await
            .unwrap();
        assert_eq!(updated.status, PlanStatus::Completed);
        assert_eq!(svc.list().await[0].status, PlanStatus::Completed);
    }

    #[tokio::test]
    async fn unknown_ids_report_not_found() {
        let svc = service();
        let err = svc
            .update_status(PlanId::new(), PlanStatus::Failed)
            .await
            .unwrap_err();
        assert!(matches!(err, PlansServiceError::NotFound { .. }));

        let err = svc.delete(PlanId::new()).await.unwrap_err();
        assert!(matches!(err, PlansServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn deleted_plans_disappear() {
        let svc = service();
        let keep = svc.add(draft("Keep")).await.unwrap();
        let drop = svc.add(draft("Drop")).await.unwrap();

        svc.delete(drop.id).await.unwrap();
        let listed = svc.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep.id);
    }

    #[tokio::test]
    async fn malformed_list_reads_as_empty() {
        let store = Arc::new(InMemoryStore::new());
        store.set(PLANS_KEY, "oops").await.unwrap();

        let svc = PlansService::new(store).with_clock(fixed_clock());
        assert!(svc.list().await.is_empty());
    }
}
