use fitcoach_core::profile::ProfileApi;
use fitcoach_core::storage::KvStore;
use fitcoach_types::error::ApiError;
use fitcoach_types::profile::UserProfile;
use reqwest::Method;

use super::client::ApiClient;

const PROFILE_PATH: &str = "/users/me/profile";

impl<S: KvStore> ProfileApi for ApiClient<S> {
    async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json(PROFILE_PATH).await
    }

    async fn update_profile(&self, profile: &UserProfile) -> Result<(), ApiError> {
        let builder = self.request(Method::PUT, PROFILE_PATH).await.json(profile);
        self.execute(builder).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use fitcoach_core::profile::ProfileService;
    use fitcoach_core::storage::MemoryKvStore;
    use fitcoach_types::profile::{Gender, ProfileUpdate};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_update_merges_and_saves() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/me/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "weight": 80.0,
                "height": 180.0,
                "age": 30,
                "gender": "MALE"
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/users/me/profile"))
            .and(body_partial_json(json!({"weight": 78.5, "height": 180.0})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(
            format!("{}/api", server.uri()),
            Duration::from_secs(5),
            Arc::new(MemoryKvStore::new()),
        )
        .unwrap();
        let service = ProfileService::new(api);

        let saved = service
            .update(ProfileUpdate {
                weight: Some(78.5),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(saved.weight, Some(78.5));
        assert_eq!(saved.gender, Some(Gender::Male));
    }
}
