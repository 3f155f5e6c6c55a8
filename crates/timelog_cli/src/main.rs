//! `timelog` server executable.
//!
//! # Responsibility
//! - Read `TIMELOG_*` configuration and start logging.
//! - Refuse to start without the Bulma stylesheet every page links to.
//! - Migrate the database once, then serve HTTP until the process exits.

use log::{error, info};
use std::error::Error;
use timelog_web::{router, AppState, ServerConfig};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!("event=server_exit module=cli status=error error={err}");
        eprintln!("timelog: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;

    let level = config
        .log_level
        .as_deref()
        .unwrap_or_else(|| timelog_core::default_log_level());
    timelog_core::init_logging(level, config.log_dir.as_deref())?;

    let bulma = config.bulma_css_path();
    if !bulma.is_file() {
        return Err(format!(
            "{} not found; install Bulma under the static directory",
            bulma.display()
        )
        .into());
    }

    let db_path = config.db_path.clone();
    tokio::task::spawn_blocking(move || timelog_core::db::open_db(db_path)).await??;

    let addr = config.addr;
    let app = router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "event=server_start module=cli status=ok addr={addr} version={}",
        timelog_core::core_version()
    );
    axum::serve(listener, app).await?;
    Ok(())
}
