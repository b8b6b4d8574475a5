use lending_console::{
    adapters::http::{
        AuthGatewayAdapter, BackendClient, BookCatalogAdapter, TransactionRepositoryAdapter,
        UserDirectoryAdapter,
    },
    api::{handlers::AppState, router::create_router},
    application::lending::ServiceDependencies,
    session::SessionStore,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lending_console=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Upstream lending backend base URL
    let backend_base_url = std::env::var("BACKEND_BASE_URL")
        .unwrap_or_else(|_| "https://rlaijbartary1.onrender.com/api".into());

    tracing::info!("Backend base URL: {}", backend_base_url);

    // Session store - written at login, read by every backend call
    let session_store = Arc::new(SessionStore::new());

    // Initialize adapters over the shared backend client
    let backend_client = BackendClient::new(backend_base_url, session_store.clone());
    let transaction_repository = Arc::new(TransactionRepositoryAdapter::new(backend_client.clone()));
    let user_directory = Arc::new(UserDirectoryAdapter::new(backend_client.clone()));
    let book_catalog = Arc::new(BookCatalogAdapter::new(backend_client.clone()));
    let auth_gateway = Arc::new(AuthGatewayAdapter::new(backend_client));

    // Create service dependencies
    let service_deps = ServiceDependencies {
        transaction_repository,
        user_directory,
        book_catalog,
    };

    // Create application state
    let app_state = Arc::new(AppState {
        service_deps,
        session_store,
        auth_gateway,
    });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Console listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
