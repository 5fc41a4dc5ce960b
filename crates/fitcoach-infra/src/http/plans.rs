use fitcoach_core::plan::PlanApi;
use fitcoach_core::storage::KvStore;
use fitcoach_types::auth::UserId;
use fitcoach_types::error::ApiError;
use fitcoach_types::plan::{FullPlan, PlanHistory, ReplaceMealRequest, WeeklyNutritionPlan};
use reqwest::Method;

use super::client::{ApiClient, decode};

impl<S: KvStore> PlanApi for ApiClient<S> {
    async fn full_plan(&self, user_id: UserId) -> Result<FullPlan, ApiError> {
        let builder = self
            .request(Method::GET, "/nutrition-plans/full")
            .await
            .query(&[("userId", user_id)]);
        decode(self.execute(builder).await?).await
    }

    async fn weekly_plan(&self, user_id: UserId) -> Result<WeeklyNutritionPlan, ApiError> {
        self.get_json(&format!("/nutrition-plans/weekly/{user_id}"))
            .await
    }

    async fn generate_weekly_plan(&self, user_id: UserId) -> Result<WeeklyNutritionPlan, ApiError> {
        let builder = self
            .request(Method::POST, &format!("/nutrition-plans/generate-weekly/{user_id}"))
            .await;
        decode(self.execute(builder).await?).await
    }

    async fn replace_meal(
        &self,
        plan_id: i64,
        request: &ReplaceMealRequest,
    ) -> Result<WeeklyNutritionPlan, ApiError> {
        self.send_json(
            Method::PUT,
            &format!("/nutrition-plans/{plan_id}/replace-meal"),
            request,
        )
        .await
    }

    async fn history(&self) -> Result<PlanHistory, ApiError> {
        self.get_json("/plans/history").await
    }
}
