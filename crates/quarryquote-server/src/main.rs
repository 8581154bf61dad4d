mod api;
mod middleware;

use anyhow::Context;
use quarryquote_core::{catalog_from_config, Product};
use quarryquote_pricing::{read_price_sheet, HaulRates, PriceNormalizer};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = quarryquote_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let normalizer = PriceNormalizer::new(config.surcharge)?;
    let catalog = normalizer.normalize_catalog(&catalog_from_config(&config)?);

    let price_sheet: Vec<Product> = match config.price_sheet_path.as_deref() {
        Some(path) => read_price_sheet(path, &normalizer)
            .with_context(|| format!("loading price sheet {}", path.display()))?,
        None => Vec::new(),
    };

    tracing::info!(
        env = %config.env,
        materials = catalog.materials.len(),
        destinations = catalog.routes.destinations().len(),
        price_sheet_products = price_sheet.len(),
        "catalog loaded"
    );

    let state = AppState::new(catalog, price_sheet, HaulRates::from_app_config(&config));
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
