mod command;
mod config;
mod errors;
mod session;
mod shell;
mod store;

use std::process::ExitCode;

use env_logger::Env;
use paleta_client::HttpColorService;

use crate::config::AppConfig;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        },
    };
    log::info!("using color API at {}", config.api_base());

    let service = match HttpColorService::new(config.api_base().clone()) {
        Ok(service) => service,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        },
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            log::error!("failed to start async runtime: {err}");
            return ExitCode::FAILURE;
        },
    };

    match runtime.block_on(shell::run(service)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("terminal i/o failed: {err}");
            ExitCode::FAILURE
        },
    }
}
