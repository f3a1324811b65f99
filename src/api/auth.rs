use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{BusinessDetails, User};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_details: Option<BusinessDetails>,
}

#[derive(Debug, Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    otp: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

impl ApiClient {
    /// Signs in and stores the issued token for subsequent requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let auth: AuthResponse = self
            .post("/auth/login", &LoginRequest { email, password })
            .await?;
        self.session().set_token(auth.token);
        info!("signed in as {}", auth.user.email);
        Ok(auth.user)
    }

    /// Registration triggers an OTP mail; the session stays unauthenticated
    /// until [`ApiClient::verify_otp`] succeeds.
    pub async fn register(&self, registration: &Registration) -> Result<Option<String>, ApiError> {
        let response: MessageResponse = self.post("/auth/register", registration).await?;
        Ok(response.message)
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<User, ApiError> {
        let auth: AuthResponse = self
            .post("/auth/verify-otp", &OtpRequest { email, otp })
            .await?;
        self.session().set_token(auth.token);
        Ok(auth.user)
    }

    pub async fn resend_otp(&self, email: &str) -> Result<(), ApiError> {
        let _: Value = self
            .post("/auth/resend-otp", &serde_json::json!({ "email": email }))
            .await?;
        Ok(())
    }

    /// Rehydrates the signed-in user from a stored token. A stale token
    /// comes back as a 401, which clears the session.
    pub async fn me(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.get("/auth/me").await?;
        Ok(envelope.user)
    }

    pub fn logout(&self) {
        self.session().clear();
    }
}
