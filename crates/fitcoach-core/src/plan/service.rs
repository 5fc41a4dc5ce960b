//! Plan service.
//!
//! The full plan is read from the session cache when the chat just produced
//! one, otherwise fetched and cached. A cached plan is only trusted when
//! both its nutrition and training halves are present.

use fitcoach_types::auth::UserId;
use fitcoach_types::error::PlanError;
use fitcoach_types::plan::{
    DemoPlan, FullPlan, PlanHistory, PlanTab, ReplaceMealRequest, WeeklyNutritionPlan,
};
use fitcoach_types::storage::StorageKey;
use tracing::{debug, info, warn};

use super::PlanApi;
use crate::storage::{KvStore, get_json, set_json};

/// The guest demo menu and whether it is the built-in sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoPlanView {
    pub plan: DemoPlan,
    pub is_sample: bool,
}

pub struct PlanService<P: PlanApi, S: KvStore, C: KvStore> {
    api: P,
    store: S,
    session_cache: C,
}

impl<P: PlanApi, S: KvStore, C: KvStore> PlanService<P, S, C> {
    pub fn new(api: P, store: S, session_cache: C) -> Self {
        Self {
            api,
            store,
            session_cache,
        }
    }

    pub async fn load_full_plan(&self, user_id: Option<UserId>) -> Result<FullPlan, PlanError> {
        match get_json::<FullPlan, _>(&self.session_cache, StorageKey::FullPlan).await {
            Ok(Some(plan)) if plan.is_complete() => {
                debug!("Using cached full plan");
                return Ok(plan);
            }
            Ok(Some(_)) | Err(_) => {
                debug!("Discarding incomplete cached plan");
                self.session_cache.delete(StorageKey::FullPlan).await?;
            }
            Ok(None) => {}
        }

        let user_id = user_id.ok_or(PlanError::NotSignedIn)?;
        let plan = self.api.full_plan(user_id).await?;
        if !plan.is_complete() {
            return Err(PlanError::NotGenerated);
        }

        if let Err(e) = set_json(&self.session_cache, StorageKey::FullPlan, &plan).await {
            warn!("Failed to cache full plan: {e}");
        }
        Ok(plan)
    }

    pub async fn weekly(&self, user_id: UserId) -> Result<WeeklyNutritionPlan, PlanError> {
        Ok(self.api.weekly_plan(user_id).await?)
    }

    pub async fn generate_weekly(&self, user_id: UserId) -> Result<WeeklyNutritionPlan, PlanError> {
        let plan = self.api.generate_weekly_plan(user_id).await?;
        info!(user_id, plan_id = ?plan.id, "Generated weekly plan");
        Ok(plan)
    }

    /// Swap a meal of a weekly plan for another recipe; returns the updated plan.
    pub async fn replace_meal(
        &self,
        plan_id: i64,
        original_meal_id: i64,
        substitute_recipe_id: &str,
    ) -> Result<WeeklyNutritionPlan, PlanError> {
        let request = ReplaceMealRequest {
            original_meal_id,
            substitute_recipe_id: substitute_recipe_id.trim().to_string(),
        };
        let plan = self.api.replace_meal(plan_id, &request).await?;
        info!(plan_id, original_meal_id, "Replaced meal");
        Ok(plan)
    }

    pub async fn history(&self, user_id: Option<UserId>) -> Result<PlanHistory, PlanError> {
        if user_id.is_none() {
            return Err(PlanError::NotSignedIn);
        }
        Ok(self.api.history().await?)
    }

    /// The demo plan the chat produced, or the built-in sample.
    pub async fn demo_plan(&self) -> DemoPlanView {
        match get_json::<DemoPlan, _>(&self.session_cache, StorageKey::DemoPlan).await {
            Ok(Some(plan)) => DemoPlanView {
                plan,
                is_sample: false,
            },
            Ok(None) => DemoPlanView {
                plan: DemoPlan::sample(),
                is_sample: true,
            },
            Err(e) => {
                debug!("Cached demo plan unusable: {e}");
                DemoPlanView {
                    plan: DemoPlan::sample(),
                    is_sample: true,
                }
            }
        }
    }

    pub async fn active_tab(&self) -> PlanTab {
        match self.store.get(StorageKey::ActiveTab).await {
            Ok(Some(raw)) => raw.parse().unwrap_or_default(),
            Ok(None) => PlanTab::default(),
            Err(e) => {
                warn!("Failed to read active tab: {e}");
                PlanTab::default()
            }
        }
    }

    pub async fn set_active_tab(&self, tab: PlanTab) -> Result<(), PlanError> {
        self.store
            .set(StorageKey::ActiveTab, &tab.to_string())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKvStore;
    use fitcoach_types::error::ApiError;
    use fitcoach_types::plan::{PlanMeal, TrainingSession};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakePlanApi {
        full: Option<FullPlan>,
        fail: bool,
        full_calls: AtomicUsize,
        replaced: Mutex<Vec<(i64, ReplaceMealRequest)>>,
    }

    fn error() -> ApiError {
        ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        }
    }

    impl PlanApi for FakePlanApi {
        async fn full_plan(&self, _user_id: UserId) -> Result<FullPlan, ApiError> {
            self.full_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(error());
            }
            Ok(self.full.clone().unwrap_or_default())
        }

        async fn weekly_plan(&self, _user_id: UserId) -> Result<WeeklyNutritionPlan, ApiError> {
            Ok(WeeklyNutritionPlan {
                id: Some(3),
                daily_plans: Vec::new(),
            })
        }

        async fn generate_weekly_plan(&self, _user_id: UserId) -> Result<WeeklyNutritionPlan, ApiError> {
            Ok(WeeklyNutritionPlan {
                id: Some(4),
                daily_plans: Vec::new(),
            })
        }

        async fn replace_meal(
            &self,
            plan_id: i64,
            request: &ReplaceMealRequest,
        ) -> Result<WeeklyNutritionPlan, ApiError> {
            self.replaced
                .lock()
                .unwrap()
                .push((plan_id, request.clone()));
            Ok(WeeklyNutritionPlan {
                id: Some(plan_id),
                daily_plans: Vec::new(),
            })
        }

        async fn history(&self) -> Result<PlanHistory, ApiError> {
            if self.fail { Err(error()) } else { Ok(PlanHistory::default()) }
        }
    }

    fn complete_plan() -> FullPlan {
        FullPlan {
            nutrition_plan_id: Some(1),
            meals: vec![PlanMeal::default()],
            training_plan_id: Some(2),
            training_sessions: vec![TrainingSession::default()],
            ..Default::default()
        }
    }

    fn service(api: FakePlanApi) -> PlanService<FakePlanApi, MemoryKvStore, MemoryKvStore> {
        PlanService::new(api, MemoryKvStore::new(), MemoryKvStore::new())
    }

    #[tokio::test]
    async fn test_cached_complete_plan_skips_backend() {
        let svc = service(FakePlanApi::default());
        set_json(&svc.session_cache, StorageKey::FullPlan, &complete_plan())
            .await
            .unwrap();

        let plan = svc.load_full_plan(None).await.unwrap();
        assert!(plan.is_complete());
        assert_eq!(svc.api.full_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_incomplete_cache_is_dropped_and_fetched() {
        let svc = service(FakePlanApi {
            full: Some(complete_plan()),
            ..Default::default()
        });
        svc.session_cache
            .set(StorageKey::FullPlan, r#"{"nutritionPlanId": 1, "meals": []}"#)
            .await
            .unwrap();

        let plan = svc.load_full_plan(Some(8)).await.unwrap();
        assert_eq!(plan, complete_plan());
        assert_eq!(svc.api.full_calls.load(Ordering::SeqCst), 1);

        let cached: Option<FullPlan> = get_json(&svc.session_cache, StorageKey::FullPlan).await.unwrap();
        assert_eq!(cached, Some(complete_plan()));
    }

    #[tokio::test]
    async fn test_malformed_cache_is_dropped() {
        let svc = service(FakePlanApi::default());
        svc.session_cache
            .set(StorageKey::FullPlan, "not json")
            .await
            .unwrap();
        assert!(matches!(svc.load_full_plan(None).await, Err(PlanError::NotSignedIn)));
        assert!(svc.session_cache.is_empty());
    }

    #[tokio::test]
    async fn test_backend_without_plan_is_not_generated() {
        let svc = service(FakePlanApi::default());
        assert!(matches!(svc.load_full_plan(Some(8)).await, Err(PlanError::NotGenerated)));
        assert!(svc.session_cache.is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_is_load_error() {
        let svc = service(FakePlanApi {
            fail: true,
            ..Default::default()
        });
        assert!(matches!(svc.load_full_plan(Some(8)).await, Err(PlanError::Api(_))));
    }

    #[tokio::test]
    async fn test_history_requires_user() {
        let svc = service(FakePlanApi::default());
        assert!(matches!(svc.history(None).await, Err(PlanError::NotSignedIn)));
        assert!(svc.history(Some(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_meal_request() {
        let svc = service(FakePlanApi::default());
        let plan = svc.replace_meal(3, 40, " 17 ").await.unwrap();
        assert_eq!(plan.id, Some(3));

        let sent = svc.api.replaced.lock().unwrap().clone();
        assert_eq!(sent[0].0, 3);
        assert_eq!(sent[0].1.original_meal_id, 40);
        assert_eq!(sent[0].1.substitute_recipe_id, "17");
    }

    #[tokio::test]
    async fn test_demo_plan_fallback_and_cache() {
        let svc = service(FakePlanApi::default());
        let sample = svc.demo_plan().await;
        assert!(sample.is_sample);
        assert_eq!(sample.plan, DemoPlan::sample());

        svc.session_cache
            .set(
                StorageKey::DemoPlan,
                r#"{"day": "Вторник", "meals": [{"meal": "Обяд", "description": "Леща"}]}"#,
            )
            .await
            .unwrap();
        let cached = svc.demo_plan().await;
        assert!(!cached.is_sample);
        assert_eq!(cached.plan.day, "Вторник");

        svc.session_cache
            .set(StorageKey::DemoPlan, r#"{"unexpected": true}"#)
            .await
            .unwrap();
        assert!(svc.demo_plan().await.is_sample);
    }

    #[tokio::test]
    async fn test_active_tab_persistence() {
        let svc = service(FakePlanApi::default());
        assert_eq!(svc.active_tab().await, PlanTab::Nutrition);

        svc.set_active_tab(PlanTab::Weekly).await.unwrap();
        assert_eq!(svc.active_tab().await, PlanTab::Weekly);

        svc.store.set(StorageKey::ActiveTab, "bogus").await.unwrap();
        assert_eq!(svc.active_tab().await, PlanTab::Nutrition);
    }
}
