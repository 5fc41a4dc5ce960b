//! Profile service.

use fitcoach_types::error::ProfileError;
use fitcoach_types::profile::{ProfileUpdate, UserProfile};
use tracing::info;

use super::ProfileApi;
use crate::auth::AuthApi;

/// What the profile view shows: the account email and body metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileOverview {
    pub email: String,
    pub profile: UserProfile,
}

pub struct ProfileService<P: ProfileApi + AuthApi> {
    api: P,
}

impl<P: ProfileApi + AuthApi> ProfileService<P> {
    pub fn new(api: P) -> Self {
        Self { api }
    }

    /// Fetch the profile and the account email concurrently.
    pub async fn overview(&self) -> Result<ProfileOverview, ProfileError> {
        let (profile, account) = tokio::join!(self.api.profile(), self.api.me());
        Ok(ProfileOverview {
            email: account?.email,
            profile: profile?,
        })
    }

    /// Apply `update` on top of the stored profile and save the result.
    pub async fn update(&self, update: ProfileUpdate) -> Result<UserProfile, ProfileError> {
        let mut profile = self.api.profile().await?;
        profile.apply(update);
        self.api.update_profile(&profile).await?;
        info!("Profile saved");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_types::auth::{
        AccountInfo, ForgotPasswordRequest, GuestLoginResponse, LoginRequest, LoginResponse,
        RegisterRequest,
    };
    use fitcoach_types::error::ApiError;
    use fitcoach_types::profile::Gender;
    use std::sync::Mutex;

    struct FakeApi {
        stored: Mutex<UserProfile>,
    }

    impl ProfileApi for FakeApi {
        async fn profile(&self) -> Result<UserProfile, ApiError> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn update_profile(&self, profile: &UserProfile) -> Result<(), ApiError> {
            *self.stored.lock().unwrap() = profile.clone();
            Ok(())
        }
    }

    impl AuthApi for FakeApi {
        async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, ApiError> {
            Err(ApiError::Unauthorized)
        }

        async fn guest_login(&self) -> Result<GuestLoginResponse, ApiError> {
            Err(ApiError::Unauthorized)
        }

        async fn register(&self, _request: &RegisterRequest) -> Result<(), ApiError> {
            Ok(())
        }

        async fn forgot_password(&self, _request: &ForgotPasswordRequest) -> Result<String, ApiError> {
            Ok(String::new())
        }

        async fn me(&self) -> Result<AccountInfo, ApiError> {
            Ok(AccountInfo {
                email: "ana@example.com".to_string(),
                ..Default::default()
            })
        }
    }

    fn service() -> ProfileService<FakeApi> {
        ProfileService::new(FakeApi {
            stored: Mutex::new(UserProfile {
                weight: Some(70.0),
                height: Some(168.0),
                age: Some(29),
                gender: Some(Gender::Female),
            }),
        })
    }

    #[tokio::test]
    async fn test_overview_combines_profile_and_email() {
        let overview = service().overview().await.unwrap();
        assert_eq!(overview.email, "ana@example.com");
        assert_eq!(overview.profile.age, Some(29));
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let svc = service();
        let saved = svc
            .update(ProfileUpdate {
                weight: Some(68.5),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(saved.weight, Some(68.5));
        assert_eq!(saved.height, Some(168.0));
        assert_eq!(svc.api.stored.lock().unwrap().weight, Some(68.5));
    }
}
