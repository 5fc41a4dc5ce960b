//! Authentication payloads and the signed-in user.
//!
//! Wire types mirror the backend's `/auth/*` endpoints (camelCase JSON).
//! `AuthUser` is the client-side view of whoever is signed in, restored
//! from the durable store on start-up.

use serde::{Deserialize, Deserializer, Serialize};

use std::fmt;

/// Backend user identifier.
pub type UserId = i64;

/// Role name the backend assigns to anonymous demo identities.
pub const GUEST_ROLE: &str = "GUEST";

/// Role sent with every chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChatRole {
    User,
    Guest,
}

impl ChatRole {
    /// `User` when an authenticated (non-guest) user id is known, else `Guest`.
    pub fn for_user(user_id: Option<UserId>) -> Self {
        if user_id.is_some() {
            ChatRole::User
        } else {
            ChatRole::Guest
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "USER"),
            ChatRole::Guest => write!(f, "GUEST"),
        }
    }
}

/// `POST /auth/register` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// `POST /auth/login` body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/forgot-password` body.
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// `POST /auth/login` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(deserialize_with = "deserialize_user_id")]
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub nutrition_plan_id: Option<i64>,
    #[serde(default)]
    pub training_plan_id: Option<i64>,
}

/// `POST /auth/guest` response. The backend sends every field as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestLoginResponse {
    pub token: String,
    #[serde(deserialize_with = "deserialize_user_id")]
    pub user_id: UserId,
    pub role: String,
}

/// `GET /auth/me` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// The signed-in user as the client knows it.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub access_token: String,
    pub id: Option<UserId>,
    pub email: Option<String>,
    pub roles: Vec<String>,
    pub nutrition_plan_id: Option<i64>,
    pub training_plan_id: Option<i64>,
}

impl AuthUser {
    pub fn from_login(resp: LoginResponse) -> Self {
        Self {
            access_token: resp.access_token,
            id: Some(resp.id),
            email: Some(resp.email),
            roles: resp.roles,
            nutrition_plan_id: resp.nutrition_plan_id,
            training_plan_id: resp.training_plan_id,
        }
    }

    /// Build the user for a backend-issued guest identity.
    ///
    /// The guest endpoint returns no email, so a synthetic one is derived
    /// from the user id.
    pub fn from_guest(resp: GuestLoginResponse) -> Self {
        Self {
            access_token: resp.token,
            id: Some(resp.user_id),
            email: Some(format!("guest_{}@fitnessapp.local", resp.user_id)),
            roles: vec![resp.role],
            nutrition_plan_id: None,
            training_plan_id: None,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_guest(&self) -> bool {
        self.has_role(GUEST_ROLE)
    }

    /// The id of an authenticated, non-guest user.
    pub fn member_id(&self) -> Option<UserId> {
        if self.is_guest() { None } else { self.id }
    }
}

// The access token never appears in Debug output.
impl fmt::Debug for AuthUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthUser")
            .field("access_token", &"[redacted]")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("roles", &self.roles)
            .field("nutrition_plan_id", &self.nutrition_plan_id)
            .field("training_plan_id", &self.training_plan_id)
            .finish()
    }
}

/// Accept a user id sent either as a JSON number or as a numeric string.
pub fn deserialize_user_id<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid user id '{s}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_camel_case() {
        let resp: LoginResponse = serde_json::from_value(json!({
            "accessToken": "jwt",
            "id": 7,
            "email": "ana@example.com",
            "roles": ["USER"],
            "nutritionPlanId": 12
        }))
        .unwrap();
        assert_eq!(resp.id, 7);
        assert_eq!(resp.nutrition_plan_id, Some(12));
        assert_eq!(resp.training_plan_id, None);
    }

    #[test]
    fn test_guest_response_string_id() {
        let resp: GuestLoginResponse = serde_json::from_value(json!({
            "token": "guest-jwt",
            "userId": "42",
            "role": "GUEST"
        }))
        .unwrap();
        assert_eq!(resp.user_id, 42);

        let user = AuthUser::from_guest(resp);
        assert_eq!(user.email.as_deref(), Some("guest_42@fitnessapp.local"));
        assert!(user.is_guest());
        assert_eq!(user.member_id(), None);
    }

    #[test]
    fn test_guest_response_rejects_garbage_id() {
        let result: Result<GuestLoginResponse, _> = serde_json::from_value(json!({
            "token": "t",
            "userId": "abc",
            "role": "GUEST"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_member_id_for_regular_user() {
        let user = AuthUser {
            access_token: "t".to_string(),
            id: Some(3),
            email: None,
            roles: vec!["USER".to_string()],
            nutrition_plan_id: None,
            training_plan_id: None,
        };
        assert_eq!(user.member_id(), Some(3));
        assert!(user.has_role("USER"));
        assert!(!user.has_role("ADMIN"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let user = AuthUser {
            access_token: "super-secret".to_string(),
            id: Some(1),
            email: None,
            roles: Vec::new(),
            nutrition_plan_id: None,
            training_plan_id: None,
        };
        let debug = format!("{user:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_chat_role() {
        assert_eq!(ChatRole::for_user(Some(1)), ChatRole::User);
        assert_eq!(ChatRole::for_user(None), ChatRole::Guest);
        assert_eq!(serde_json::to_string(&ChatRole::Guest).unwrap(), "\"GUEST\"");
    }

    #[test]
    fn test_register_request_serializes_full_name() {
        let req = RegisterRequest {
            full_name: "Иван Петров".to_string(),
            email: "ivan@example.com".to_string(),
            password: "secret1".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["fullName"], "Иван Петров");
    }
}
