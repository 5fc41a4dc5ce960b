//! Generated plans: loading, caching and weekly-plan edits.

pub mod service;

use std::future::Future;

use fitcoach_types::auth::UserId;
use fitcoach_types::error::ApiError;
use fitcoach_types::plan::{
    FullPlan, PlanHistory, ReplaceMealRequest, TrainingSession, WeeklyNutritionPlan,
};

pub use service::{DemoPlanView, PlanService};

/// Backend plan endpoints.
pub trait PlanApi: Send + Sync {
    fn full_plan(&self, user_id: UserId) -> impl Future<Output = Result<FullPlan, ApiError>> + Send;

    fn weekly_plan(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<WeeklyNutritionPlan, ApiError>> + Send;

    fn generate_weekly_plan(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<WeeklyNutritionPlan, ApiError>> + Send;

    fn replace_meal(
        &self,
        plan_id: i64,
        request: &ReplaceMealRequest,
    ) -> impl Future<Output = Result<WeeklyNutritionPlan, ApiError>> + Send;

    fn history(&self) -> impl Future<Output = Result<PlanHistory, ApiError>> + Send;
}

/// Training sessions in Monday-to-Sunday order; unrecognized days go last.
pub fn training_week(sessions: &[TrainingSession]) -> Vec<&TrainingSession> {
    let mut ordered: Vec<&TrainingSession> = sessions.iter().collect();
    ordered.sort_by_key(|s| s.day().map_or(u8::MAX, |d| d as u8));
    ordered
}
