use std::process::ExitCode;

use configs::AppConfig;
use tracing::{error, info};

fn main() -> ExitCode {
    // .env 先于日志加载，RUST_LOG / LOG_FORMAT 才能生效
    dotenvy::dotenv().ok();
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => common::utils::logging::init_logging_json(),
        _ => common::utils::logging::init_logging_default(),
    }

    std::panic::set_hook(Box::new(|panic| {
        error!(event = "panic", pid = std::process::id(), %panic, "student manager panicked");
    }));

    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = %e, "cannot load configuration");
            return ExitCode::FAILURE;
        }
    };

    let threads = cfg.server.worker_threads.unwrap_or(4);
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(threads)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "cannot start tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        version = env!("CARGO_PKG_VERSION"),
        threads,
        bind = %cfg.server.bind_addr(),
        "student manager starting"
    );

    match runtime.block_on(server::serve(cfg, server::shutdown_signal())) {
        Ok(()) => {
            info!(event = "stop", "student manager stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(event = "run_failed", error = %e, "student manager exited with error");
            ExitCode::FAILURE
        }
    }
}
