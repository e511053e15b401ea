//! Runs the HTTP server.

use crate::{
    db::db::Db,
    libs::{
        config::{parse_port, Config},
        messages::Message,
    },
    msg_info, msg_success,
    web::{router, AppState},
};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Interface to bind (overrides config and TODO_SITE_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config and TODO_SITE_PORT)
    #[arg(short, long, value_parser = parse_port_arg)]
    port: Option<u16>,

    /// SQLite database file (overrides config and TODO_SITE_DB)
    #[arg(long)]
    db: Option<PathBuf>,
}

fn parse_port_arg(value: &str) -> Result<u16, String> {
    parse_port(value).map_err(|e| e.to_string())
}

impl ServeArgs {
    /// Command-line flags take precedence over everything in `config`.
    pub fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(db) = self.db {
            config.database.path = Some(db);
        }
    }
}

pub async fn cmd(args: ServeArgs, mut config: Config) -> Result<()> {
    args.apply(&mut config);

    let db_path = config.database_path()?;
    let db = Db::open(&db_path)?;
    tracing::info!(path = %db_path.display(), "{}", Message::DatabaseOpened(db_path.display().to_string()));

    let app = router(AppState::new(db));

    let addr = config.server.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| Message::ServerBindFailed(addr.clone()))?;

    msg_success!(Message::ServerListening(listener.local_addr()?.to_string()));

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    msg_info!(Message::ServerShuttingDown);
}
