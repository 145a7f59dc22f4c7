use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::session::{file::FileSessionStore, SessionStore};
use service::storage::{fs::FsFileStorage, FileStorage};

use crate::routes::{self, auth};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load config.toml if usable; otherwise fall back to env vars and defaults
fn load_config() -> configs::AppConfig {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config.toml not usable; falling back to env/defaults");
            let mut cfg = configs::AppConfig::default();
            // 数据库 URL 留空时由 models::db::connect() 读取 DATABASE_URL
            cfg.auth.normalize_from_env();
            cfg
        }
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config();

    common::env::ensure_env("data", &cfg.storage.root_dir).await?;

    // DB connection
    let db = if cfg.database.url.trim().is_empty() {
        models::db::connect().await?
    } else {
        models::db::connect_with_config(&cfg.database).await?
    };

    // 对象存储（上传图片落盘）与会话缓存（刷新令牌）
    let storage: Arc<dyn FileStorage> =
        Arc::new(FsFileStorage::new(&cfg.storage.root_dir, &cfg.storage.public_base_url).await?);
    let sessions: Arc<dyn SessionStore> = FileSessionStore::new(&cfg.auth.refresh_store_path).await?;

    // JWT secret
    let jwt_secret = if cfg.auth.jwt_secret.trim().is_empty() {
        std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string())
    } else {
        cfg.auth.jwt_secret.clone()
    };
    let state = auth::ServerState {
        db,
        auth: auth::ServerAuthConfig { jwt_secret, access_token_mins: cfg.auth.access_token_mins },
        storage,
        sessions,
    };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting petsquad server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}
