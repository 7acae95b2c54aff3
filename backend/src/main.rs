//! Server entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use worklog::inbound::http::health::HealthState;
use worklog::inbound::http::session_config::{
    BuildMode, fingerprint::key_fingerprint, session_settings_from_env,
};
use worklog::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use worklog::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let mut config = ServerConfig::new(session, settings.bind_addr());
    if let Some(url) = settings.database_url.as_deref() {
        apply_migrations(url)
            .await
            .wrap_err("failed to apply database migrations")?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    info!(addr = %config.bind_addr(), "starting server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?
        .await
        .wrap_err("server terminated unexpectedly")
}
