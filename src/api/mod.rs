//! Thin typed layer over the backend REST collaborator.
//!
//! One [`ApiClient`] is shared by every view. It attaches the bearer token
//! from the [`Session`] to every request, maps backend refusals into
//! [`ApiError::Rejected`] with the server's own message, and treats any 401
//! as session-invalid by clearing the stored credentials.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::Session;

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod events;
pub mod payments;
pub mod stalls;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Session) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let response = req.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("backend answered 401, clearing stored credentials");
            self.session.clear();
            return Err(ApiError::SessionExpired);
        }

        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(ApiError::Decode)
    }

    async fn error_message(response: reqwest::Response) -> String {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: String,
        }
        match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => "Request failed".to_string(),
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::DELETE, path)).await
    }
}
