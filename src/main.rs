//! Task-tracking gateway server.
//!
//! Configuration is read from the environment (see
//! [`AppConfig`](todo_gateway::infrastructure::AppConfig)); log verbosity is
//! controlled through `RUST_LOG`, and `LOG_FORMAT=json` switches to
//! structured output.

use std::env;

use todo_gateway::api::{AppState, create_router};
use todo_gateway::infrastructure::AppConfig;
use todo_gateway::server::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting todo gateway");

    let config = load_config();
    tracing::info!(
        address = %config.bind_address(),
        admin_role = %config.admin_role,
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "Configuration loaded"
    );

    let server = Server::from_config(&config);
    let state = AppState::in_memory(config)?;
    let router = create_router(state);

    server.run(router).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("todo_gateway=debug,tower_http=debug,info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

fn load_config() -> AppConfig {
    AppConfig::from_env().unwrap_or_else(|error| {
        tracing::warn!(%error, "Invalid configuration, falling back to defaults");
        AppConfig::default()
    })
}
