//! studiofs host process.
//!
//! Serves newline-delimited JSON requests from stdin and writes replies to
//! stdout. Logs go to stderr so they never mix with replies.

mod config;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

use studiofs_bridge::{LineServer, ServerConfig};
use studiofs_service::{ProjectsRoot, StudioService, TreeOptions};

use config::HostConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging is up before the config is read so its warnings are kept.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let env_set = env_filter.is_some();
    let (filter, filter_handle) = reload::Layer::new(
        env_filter.unwrap_or_else(|| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match HostConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("failed to load config, using defaults: {e:#}");
            HostConfig::default()
        }
    };
    apply_log_filter(&filter_handle, env_set, &config);

    tracing::info!(
        projects_root = %config.projects_root.display(),
        max_tree_depth = config.max_tree_depth,
        "starting studiofs"
    );

    let service = StudioService::new(
        ProjectsRoot::new(&config.projects_root),
        TreeOptions {
            max_depth: config.max_tree_depth,
        },
    );
    let server = LineServer::new(ServerConfig::default(), service);

    let cancel = server.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received");
            cancel.cancel();
        }
    });

    server.run(tokio::io::stdin(), tokio::io::stdout()).await?;

    tracing::info!("studiofs stopped");
    Ok(())
}

/// Switches to the configured filter unless `RUST_LOG` already chose one.
fn apply_log_filter(
    handle: &reload::Handle<EnvFilter, Registry>,
    env_set: bool,
    config: &HostConfig,
) {
    let Some(filter) = configured_filter(env_set, config) else {
        return;
    };
    if let Err(e) = handle.reload(filter) {
        tracing::warn!("failed to apply configured log filter: {e}");
    }
}

fn configured_filter(env_set: bool, config: &HostConfig) -> Option<EnvFilter> {
    if env_set || config.log_filter == config::DEFAULT_LOG_FILTER {
        return None;
    }
    Some(EnvFilter::new(&config.log_filter))
}
