//! Login, registration, and the current user.

use dv_core::entities::{User, UserCreate};
use dv_core::responses::TokenResponse;
use reqwest::Method;
use reqwest::multipart::Form;

use crate::error::ClientError;
use crate::{ApiClient, http};

impl ApiClient {
    /// Exchange credentials for a bearer token (`POST /token`).
    ///
    /// Credentials are sent as form fields. The returned token is not stored
    /// on the client; call [`set_token`](Self::set_token) once it is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] for bad credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ClientError> {
        let form = Form::new()
            .text("username", username.to_string())
            .text("password", password.to_string());
        let resp = self
            .send(self.request(Method::POST, "/token").multipart(form))
            .await?;
        self.checked(resp, "token_response").await
    }

    /// Create an account (`POST /register`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with the service's reason (e.g. a taken
    /// username).
    pub async fn register(&self, user: &UserCreate) -> Result<User, ClientError> {
        let resp = self
            .send(self.request(Method::POST, "/register").json(user))
            .await?;
        http::decode(resp).await
    }

    /// The account the current token belongs to (`GET /me`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] if the token is missing or rejected.
    pub async fn me(&self) -> Result<User, ClientError> {
        let resp = self.send(self.request(Method::GET, "/me")).await?;
        self.checked(resp, "user").await
    }
}
