//! Sign-in, registration and the signed-in user.

pub mod session;

use std::future::Future;

use fitcoach_types::auth::{
    AccountInfo, ForgotPasswordRequest, GuestLoginResponse, LoginRequest, LoginResponse,
    RegisterRequest,
};
use fitcoach_types::error::ApiError;

pub use session::AuthSession;

/// Backend `/auth/*` endpoints.
pub trait AuthApi: Send + Sync {
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;

    fn guest_login(&self) -> impl Future<Output = Result<GuestLoginResponse, ApiError>> + Send;

    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Returns the backend's confirmation text.
    fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> impl Future<Output = Result<String, ApiError>> + Send;

    fn me(&self) -> impl Future<Output = Result<AccountInfo, ApiError>> + Send;
}
