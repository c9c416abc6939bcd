use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dotenv::dotenv;
use url::Url;

use crate::router;

#[derive(Debug, Clone, Parser)]
#[command(name = "instafeed", version, about = "Share photos and videos from the terminal")]
pub struct Config {
    /// Base url of the feed server
    #[arg(long, env = "INSTAFEED_URL", default_value = "http://localhost:8000")]
    server: Url,
    /// Bearer token, used instead of the saved session
    #[arg(long, env = "INSTAFEED_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Where the session is kept between runs
    #[arg(long, env = "INSTAFEED_SESSION", default_value = "./.instafeed-session.json")]
    session_file: PathBuf,
    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Log in and keep the session
    Login {
        #[arg(long, env = "INSTAFEED_EMAIL")]
        email: String,
        #[arg(long, env = "INSTAFEED_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long, env = "INSTAFEED_EMAIL")]
        email: String,
        #[arg(long, env = "INSTAFEED_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the feed
    Feed,
    /// Publish an image or video. Several files are handled as a drop: only
    /// the first is used
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long, default_value = "")]
        caption: String,
    },
    /// Delete one of your posts
    Delete { id: String },
}

impl Command {
    /// Client route the command lives on.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login { .. } => router::LOGIN,
            Self::Register { .. } => router::REGISTER,
            Self::Logout | Self::Feed | Self::Upload { .. } | Self::Delete { .. } => router::FEED,
        }
    }
}

impl Config {
    /// Parse the configuration from the environment and command line arguments
    pub fn parse() -> Self {
        dotenv().ok();
        <Self as Parser>::parse()
    }
    /// Create a logger with the configured verbosity level
    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.verbose.log_level_filter())
            .format_target(false)
            .init();
    }
    pub const fn server(&self) -> &Url {
        &self.server
    }
    pub fn token(&self) -> Option<String> {
        self.token.clone()
    }
    pub fn session_file(&self) -> PathBuf {
        self.session_file.clone()
    }
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
    pub const fn assume_yes(&self) -> bool {
        self.yes
    }
    pub const fn command(&self) -> &Command {
        &self.command
    }
}
