use serde::{Deserialize, Serialize};

use crate::session::SessionUser;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user: SessionUser,
}

impl AuthResponse {
    /// Session record with the token folded in.
    pub fn into_session_user(self) -> SessionUser {
        let mut user = self.user;
        if user.token.is_none() {
            user.token = self.token;
        }
        user
    }
}

/// Booking as returned by the server. Fields the server may omit default.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteBooking {
    pub id: String,
    pub device: String,
    pub issue: String,
    pub status: String,
    pub date: String,
    pub cost: String,
    pub rating: Option<u8>,
}

impl Default for RemoteBooking {
    fn default() -> Self {
        Self {
            id: String::new(),
            device: String::new(),
            issue: String::new(),
            status: "Pending".to_string(),
            date: String::new(),
            cost: String::new(),
            rating: None,
        }
    }
}

impl RemoteBooking {
    /// Only finished repairs without a rating can be rated.
    pub fn is_rateable(&self) -> bool {
        self.status.eq_ignore_ascii_case("completed") && self.rating.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RateRequest {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}
