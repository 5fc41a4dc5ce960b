//! Keys of the client's local key-value storage.
//!
//! Durable keys survive restarts (auth state, chat session id, plan view
//! tab, progress entries). Session keys only live for one run of the client
//! and hold the last generated plan.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Token,
    UserId,
    UserEmail,
    UserRoles,
    NutritionPlanId,
    TrainingPlanId,
    Role,
    ChatbotSessionId,
    /// Member id the stored chat session was created for.
    ChatbotSessionOwner,
    ActiveTab,
    ProgressEntries,
    FullPlan,
    DemoPlan,
}

impl StorageKey {
    /// Keys removed on logout.
    pub const AUTH: [StorageKey; 7] = [
        StorageKey::Token,
        StorageKey::UserId,
        StorageKey::UserEmail,
        StorageKey::UserRoles,
        StorageKey::NutritionPlanId,
        StorageKey::TrainingPlanId,
        StorageKey::Role,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Token => "token",
            StorageKey::UserId => "userId",
            StorageKey::UserEmail => "userEmail",
            StorageKey::UserRoles => "userRoles",
            StorageKey::NutritionPlanId => "nutritionPlanId",
            StorageKey::TrainingPlanId => "trainingPlanId",
            StorageKey::Role => "role",
            StorageKey::ChatbotSessionId => "chatbotSessionId",
            StorageKey::ChatbotSessionOwner => "chatbotSessionOwner",
            StorageKey::ActiveTab => "activeTab",
            StorageKey::ProgressEntries => "progressEntries",
            StorageKey::FullPlan => "fullPlan",
            StorageKey::DemoPlan => "demoPlan",
        }
    }

    /// Whether the key belongs in per-run session storage rather than the durable store.
    pub fn is_session_scoped(&self) -> bool {
        matches!(self, StorageKey::FullPlan | StorageKey::DemoPlan)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
