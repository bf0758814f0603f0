use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use super::types::{
    AuthResponse, LoginRequest, RateRequest, RegisterRequest, RemoteBooking,
};
use crate::error::{RepairError, Result};

/// JSON client for the user API. Stateless apart from the base URL.
#[derive(Debug, Clone)]
pub struct UserApi {
    client: reqwest::Client,
    base_url: String,
}

impl UserApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| RepairError::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/user/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `POST /user/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        info!("Logging in {}", email);
        self.post(
            "/user/login",
            &LoginRequest {
                email: email.trim().to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    /// `POST /user/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        info!("Registering {}", request.email);
        self.post("/user/register", request).await
    }

    /// `GET /user/bookings/:user_id`
    pub async fn user_bookings(&self, user_id: &str) -> Result<Vec<RemoteBooking>> {
        self.get(&format!("/user/bookings/{}", encode_segment(user_id)))
            .await
    }

    /// `GET /user/booking/:booking_id`
    pub async fn booking(&self, booking_id: &str) -> Result<RemoteBooking> {
        self.get(&format!("/user/booking/{}", encode_segment(booking_id)))
            .await
    }

    /// `POST /user/bookings/:booking_id/rate`
    pub async fn rate_booking(
        &self,
        booking_id: &str,
        rating: u8,
        review: Option<String>,
    ) -> Result<RemoteBooking> {
        validate_rating(rating)?;
        self.post(
            &format!("/user/bookings/{}/rate", encode_segment(booking_id)),
            &RateRequest { rating, review },
        )
        .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.get(self.endpoint(path)).send().await?;
        Self::decode(path, response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("{} returned {}: {}", path, status, message);
            return Err(RepairError::Api {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| RepairError::Network(format!("Failed to parse {} response: {}", path, e)))
    }
}

pub fn validate_rating(rating: u8) -> Result<()> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(RepairError::Validation(format!(
            "Rating must be between 1 and 5, got {}",
            rating
        )))
    }
}

fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_slashes() {
        let api = UserApi::new("http://localhost:3000/api/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:3000/api");
        assert_eq!(api.endpoint("/user/login"), "http://localhost:3000/api/user/login");
        assert_eq!(api.endpoint("user/login"), "http://localhost:3000/api/user/login");
    }

    #[test]
    fn test_rejects_invalid_base() {
        assert!(matches!(UserApi::new("localhost"), Err(RepairError::Config(_))));
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(encode_segment("BK-123456"), "BK-123456");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
    }

    #[test]
    fn test_auth_response_token_folds_into_user() {
        let json = r#"{"token":"abc","user":{"id":"7","name":"Asha","email":"a@x.in"}}"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        let user = auth.into_session_user();
        assert_eq!(user.token.as_deref(), Some("abc"));
        assert_eq!(user.id, "7");
    }

    #[test]
    fn test_remote_booking_defaults() {
        let booking: RemoteBooking = serde_json::from_str(r#"{"id":"BK-1"}"#).unwrap();
        assert_eq!(booking.status, "Pending");
        assert!(booking.rating.is_none());
    }

    #[test]
    fn test_only_completed_unrated_bookings_are_rateable() {
        let completed: RemoteBooking =
            serde_json::from_str(r#"{"id":"BK-1","status":"Completed"}"#).unwrap();
        assert!(completed.is_rateable());

        let rated = RemoteBooking {
            rating: Some(4),
            ..completed.clone()
        };
        assert!(!rated.is_rateable());

        let pending: RemoteBooking = serde_json::from_str(r#"{"id":"BK-2"}"#).unwrap();
        assert!(!pending.is_rateable());
    }
}
