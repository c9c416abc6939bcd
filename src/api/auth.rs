use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{error::Result, timed};

use super::FeedClient;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
}

impl FeedClient {
    /// Exchange credentials for a bearer token. The server expects an
    /// OAuth2 password form, so the email travels as `username`.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let request = self
            .request(Method::POST, "auth/jwt/login")?
            .form(&[("username", email), ("password", password)]);
        let response: TokenResponse = timed!("login", self.fetch(request).await)?;
        Ok(response.access_token)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<RegisteredUser> {
        let request = self
            .request(Method::POST, "auth/register")?
            .json(&serde_json::json!({ "email": email, "password": password }));
        timed!("register", self.fetch(request).await)
    }
}
