use market_news_proxy::{
    AppState,
    api::routes::create_router,
    config::{API_KEY_VAR, Config},
    error::AppError,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(AppError::ConfigError(msg)) if msg.starts_with(API_KEY_VAR) => {
            eprintln!("Error: {msg}");
            eprintln!("Please set it in your .env file");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!("Check the server settings in your environment or .env file");
            std::process::exit(1);
        }
    };
    let server_addr = config.server_addr;
    info!(
        upstream = %config.grok_api_url,
        model = %config.grok_model,
        cache_ttl = ?config.cache_ttl,
        public_dir = %config.public_dir.display(),
        "configuration loaded"
    );

    let app = create_router(AppState::from_config(config));

    let listener = TcpListener::bind(server_addr).await?;

    println!("Server running at http://localhost:{}", server_addr.port());
    axum::serve(listener, app).await?;

    Ok(())
}
