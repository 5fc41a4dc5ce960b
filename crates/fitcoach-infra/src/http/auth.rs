use fitcoach_core::auth::AuthApi;
use fitcoach_core::storage::KvStore;
use fitcoach_types::auth::{
    AccountInfo, ForgotPasswordRequest, GuestLoginResponse, LoginRequest, LoginResponse,
    RegisterRequest,
};
use fitcoach_types::error::ApiError;
use reqwest::Method;

use super::client::{ApiClient, body_message, decode};

impl<S: KvStore> AuthApi for ApiClient<S> {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.send_json(Method::POST, "/auth/login", request).await
    }

    async fn guest_login(&self) -> Result<GuestLoginResponse, ApiError> {
        let builder = self.request(Method::POST, "/auth/guest").await;
        decode(self.execute(builder).await?).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, "/auth/register").await.json(request);
        self.execute(builder).await?;
        Ok(())
    }

    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<String, ApiError> {
        let builder = self
            .request(Method::POST, "/auth/forgot-password")
            .await
            .json(request);
        let body = self
            .execute(builder)
            .await?
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(body_message(&body))
    }

    async fn me(&self) -> Result<AccountInfo, ApiError> {
        self.get_json("/auth/me").await
    }
}
