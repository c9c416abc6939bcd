pub mod auth;
pub mod posts;

use std::time::Duration;

use log::{debug, log_enabled, trace};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    auth::Session,
    config::Config,
    error::{Error, Result},
};

pub use posts::PostApi;

const USER_AGENT: &str = concat!("instafeed/", env!("CARGO_PKG_VERSION"));

/// Every call to the server goes through here: it owns the base url and
/// attaches the session token to outgoing requests.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl FeedClient {
    pub fn new(mut base: Url, timeout: Duration) -> Result<Self> {
        // join() replaces the last segment unless the path ends with a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base,
            token: None,
        })
    }

    pub fn from_config(config: &Config, session: &Session) -> Result<Self> {
        Ok(Self::new(config.server().clone(), config.timeout())?.with_session(session))
    }

    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = session.token().map(str::to_string);
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    fn wrap_request(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        debug!("{} {}", method, url);
        Ok(self.wrap_request(self.client.request(method, url)))
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = read_body(response).await?;

        if !status.is_success() {
            return Err(Error::Api {
                status,
                detail: error_detail(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string()),
            });
        }

        if body.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn read_body(response: Response) -> Result<Vec<u8>> {
    let body = response.bytes().await?.to_vec();
    if log_enabled!(log::Level::Trace) {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => trace!("{}", serde_json::to_string_pretty(&value)?),
            Err(_) => trace!("{}", String::from_utf8_lossy(&body)),
        }
    }
    Ok(body)
}

/// Pull a readable message out of an error body. The server reports
/// failures as `{"detail": ...}` where detail is a string or a list.
fn error_detail(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        return match value.get("detail") {
            Some(Value::String(detail)) => Some(detail.clone()),
            Some(detail) => Some(detail.to_string()),
            None => Some(value.to_string()),
        };
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}
