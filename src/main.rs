mod envelope;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let config = services::backend::BackendConfig::from_env();
    tracing::info!(base_url = %config.base_url, "using rifa backend");

    let backend = services::backend::BackendClient::new(config).expect("backend client build failed");
    let state = state::AppState::new(backend);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "rifaboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
