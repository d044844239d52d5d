mod app_state;
mod cli;
mod config;
mod controller;

use std::process::ExitCode;

use mata_common::errors::ShellError;
use mata_webview::StaticServer;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use app_state::{MataApp, ShellEvent};
use config::ShellConfig;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("mata panicked: {info}");
        default_hook(info);
    }));
}

/// Log to stderr. The filter is fixed at build time; the environment is not
/// consulted.
fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    install_panic_hook();

    // Unrecognized first argument: leave without a word
    let Some(args) = cli::parse() else {
        return ExitCode::SUCCESS;
    };
    let config = ShellConfig::from_args(args);

    init_logging(config.log_directive());
    tracing::info!("mata v{} starting...", env!("CARGO_PKG_VERSION"));

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("mata-content")
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to build tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let server = match StaticServer::start(runtime.handle(), config.content_root.clone()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start content server: {e}");
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::<ShellEvent>::with_user_event()
        .build()
        .map_err(|e| ShellError::EventLoop(e.to_string()))
    {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to start: {e}");
            return ExitCode::FAILURE;
        }
    };

    let sink = app_state::proxy_sink(event_loop.create_proxy());
    let mut app = MataApp::new(config, sink, server, runtime);

    tracing::info!("Entering event loop");
    let result = event_loop
        .run_app(&mut app)
        .map_err(|e| ShellError::EventLoop(e.to_string()));
    app.shutdown();
    if let Err(e) = result {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    app.exit_code()
}
