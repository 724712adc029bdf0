//! Authentication records.

use relic_arcade_core::Password;
use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Password,
}

/// Token issued on login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken")]
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: Password,
    pub cpf: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Registration result. The backend may log the new user in directly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterResponse {
    #[serde(default, alias = "accessToken")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Password reset with the token mailed by the forgot-password flow.
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: Password,
}

/// Acknowledgement with an optional human-readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_accepts_both_spellings() {
        let snake: LoginResponse = serde_json::from_str(r#"{"access_token":"a"}"#).unwrap();
        let camel: LoginResponse = serde_json::from_str(r#"{"accessToken":"b"}"#).unwrap();
        assert_eq!(snake.access_token, "a");
        assert_eq!(camel.access_token, "b");
    }

    #[test]
    fn test_register_response_may_be_empty() {
        let response: RegisterResponse = serde_json::from_str("{}").unwrap();
        assert!(response.access_token.is_none());
        assert!(response.user.is_none());
    }

    #[test]
    fn test_login_request_debug_redacts_password() {
        let request = LoginRequest {
            email: "player1@example.com".to_string(),
            password: Password::from("Secret123"),
        };
        assert!(!format!("{request:?}").contains("Secret123"));
        assert_eq!(serde_json::to_value(&request).unwrap()["password"], "Secret123");
    }
}
