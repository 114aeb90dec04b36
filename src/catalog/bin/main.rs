use std::error::Error;
use bookshelf::catalog::controller::create_router;
use bookshelf::catalog::factory::create_catalog_service;
use bookshelf::core::controller::AppState;
use bookshelf::core::domain::Configuration;
use bookshelf::utils::logging::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Configuration::from_env()?;
    setup_tracing(&config);

    let catalog_service = create_catalog_service(&config)?;
    let app = create_router(AppState::new(catalog_service));

    tracing::info!(
        bind_addr = %config.bind_addr,
        catalog_path = %config.catalog_path.display(),
        store = ?config.store,
        "catalog service listening"
    );
    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("catalog service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
