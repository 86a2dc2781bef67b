use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use media_player::config::{AppConfig, Cli};
use media_player::player::MediaLibrary;
use media_player::storage::{ObjectStore, S3Store};
use media_player::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_player=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting media player v{} (built {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_TIME")
    );

    // Bucket and credentials are required / 存储桶和凭证为必填项
    let app_config = match AppConfig::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    // 凭证字段不参与序列化
    if let Ok(json) = serde_json::to_string(&app_config) {
        tracing::debug!("Configuration: {}", json);
    }

    let store = match S3Store::new(app_config.storage.clone()) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Using {} endpoint {} bucket {}",
        store.name(),
        app_config.storage.endpoint_url(),
        app_config.storage.bucket
    );

    let library = MediaLibrary::new(Arc::new(store), app_config.storage.bucket.clone());
    let bind_addr = app_config.get_bind_address().to_string();
    let state = Arc::new(AppState::new(app_config, library));

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Starting media player, please visit your browser at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
