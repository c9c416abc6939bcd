mod api;
mod app;
mod auth;
mod config;
mod error;
mod media;
mod pages;
mod post;
mod router;
mod utils;
mod view;

use std::process::ExitCode;

use app::App;
use config::Config;
use log::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    config.init_logger();
    debug!("Server: {}", config.server());

    match run(config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> error::Result<bool> {
    App::new(config)?.run().await
}
