//! Auth session.
//!
//! Holds the signed-in user for the lifetime of the client and mirrors it
//! field by field into the durable store, so the next run starts signed in.

use fitcoach_types::auth::{
    AccountInfo, AuthUser, ForgotPasswordRequest, LoginRequest, RegisterRequest, UserId,
};
use fitcoach_types::error::{AuthError, StoreError};
use fitcoach_types::storage::StorageKey;
use tracing::{info, warn};

use super::AuthApi;
use crate::storage::KvStore;

pub const MIN_PASSWORD_LEN: usize = 6;

pub struct AuthSession<A: AuthApi, S: KvStore> {
    api: A,
    store: S,
    user: Option<AuthUser>,
}

impl<A: AuthApi, S: KvStore> AuthSession<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            user: None,
        }
    }

    /// Restore the user from the durable store. No token means signed out.
    pub async fn init(&mut self) -> Result<Option<&AuthUser>, AuthError> {
        let Some(token) = self.store.get(StorageKey::Token).await? else {
            self.user = None;
            return Ok(None);
        };

        let roles = match self.store.get(StorageKey::UserRoles).await? {
            Some(raw) if raw != "undefined" => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed stored roles: {e}");
                Vec::new()
            }),
            _ => Vec::new(),
        };

        self.user = Some(AuthUser {
            access_token: token,
            id: self.get_number(StorageKey::UserId).await?,
            email: self.store.get(StorageKey::UserEmail).await?,
            roles,
            nutrition_plan_id: self.get_number(StorageKey::NutritionPlanId).await?,
            training_plan_id: self.get_number(StorageKey::TrainingPlanId).await?,
        });
        Ok(self.user.as_ref())
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&AuthUser, AuthError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await?;
        let user = AuthUser::from_login(response);
        info!(user_id = ?user.id, "Signed in");
        self.save(user).await
    }

    /// Sign in as a backend-issued guest.
    ///
    /// Any stored user is cleared first; on failure the store is cleared
    /// again and the error is returned.
    pub async fn guest_login(&mut self) -> Result<&AuthUser, AuthError> {
        self.clear().await?;
        match self.api.guest_login().await {
            Ok(response) => {
                let user = AuthUser::from_guest(response);
                info!(user_id = ?user.id, "Signed in as guest");
                self.save(user).await
            }
            Err(e) => {
                warn!("Guest sign-in failed: {e}");
                self.clear().await?;
                Err(e.into())
            }
        }
    }

    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(
                "Паролата трябва да е поне 6 символа.".to_string(),
            ));
        }
        if password != confirm_password {
            return Err(AuthError::Validation("Паролите не съвпадат.".to_string()));
        }

        let request = RegisterRequest {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.api.register(&request).await?;
        info!("Registered new account");
        Ok(())
    }

    pub async fn logout(&mut self) -> Result<(), AuthError> {
        self.clear().await?;
        info!("Signed out");
        Ok(())
    }

    pub async fn forgot_password(&self, email: &str) -> Result<String, AuthError> {
        let request = ForgotPasswordRequest {
            email: email.trim().to_string(),
        };
        Ok(self.api.forgot_password(&request).await?)
    }

    /// Account details of the signed-in user as the backend sees them.
    pub async fn account(&self) -> Result<AccountInfo, AuthError> {
        if self.user.is_none() {
            return Err(AuthError::NotSignedIn);
        }
        Ok(self.api.me().await?)
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_role(role))
    }

    /// Id sent with chat requests: signed-in members only, never guests.
    pub fn chat_user_id(&self) -> Option<UserId> {
        self.user.as_ref().and_then(AuthUser::member_id)
    }

    async fn save(&mut self, user: AuthUser) -> Result<&AuthUser, AuthError> {
        self.store.set(StorageKey::Token, &user.access_token).await?;
        match user.id {
            Some(id) => self.store.set(StorageKey::UserId, &id.to_string()).await?,
            None => self.store.delete(StorageKey::UserId).await?,
        }
        match &user.email {
            Some(email) => self.store.set(StorageKey::UserEmail, email).await?,
            None => self.store.delete(StorageKey::UserEmail).await?,
        }
        let roles = serde_json::to_string(&user.roles)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(StorageKey::UserRoles, &roles).await?;
        self.put_optional(StorageKey::NutritionPlanId, user.nutrition_plan_id)
            .await?;
        self.put_optional(StorageKey::TrainingPlanId, user.training_plan_id)
            .await?;

        Ok(&*self.user.insert(user))
    }

    async fn clear(&mut self) -> Result<(), StoreError> {
        for key in StorageKey::AUTH {
            self.store.delete(key).await?;
        }
        self.user = None;
        Ok(())
    }

    async fn put_optional(&self, key: StorageKey, value: Option<i64>) -> Result<(), StoreError> {
        match value {
            Some(v) => self.store.set(key, &v.to_string()).await,
            None => self.store.delete(key).await,
        }
    }

    async fn get_number(&self, key: StorageKey) -> Result<Option<i64>, StoreError> {
        Ok(self
            .store
            .get(key)
            .await?
            .and_then(|raw| raw.trim().parse().ok()))
    }
}
