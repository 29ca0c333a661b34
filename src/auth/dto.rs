use serde::{Deserialize, Serialize};

use crate::users::dto::UserResponse;

/// Body of `POST /login`. Optional fields so absence becomes a validation
/// message rather than a deserialization rejection.
#[derive(Debug, Deserialize, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub access_token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_serialization() {
        let response = LoginResponse {
            status: "success",
            access_token: "abc.def.ghi".into(),
            user: UserResponse {
                id: 1,
                name: "Test User".into(),
                email: "test@example.com".into(),
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("access_token"));
        assert!(!json.contains("password"));
    }
}
