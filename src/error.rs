use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (connect, timeout, body read)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server responded {status}: {detail}")]
    Api { status: StatusCode, detail: String },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("login required (run `instafeed login` first)")]
    LoginRequired,
}

pub type Result<T> = std::result::Result<T, Error>;
