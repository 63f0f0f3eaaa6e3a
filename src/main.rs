//! Server binary: env configuration, tracing, bind + serve.

use std::env;
use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tabserve::service::TabularService;

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabserve=info,tower_http=info".into()),
        )
        .init();

    let root = env::var("TABSERVE_ROOT")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| env::current_dir().expect("cannot determine working directory"));

    let app = tabserve::http::router(TabularService::new(&root));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()
        .expect("PORT must be a valid number");
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid HOST:PORT configuration");

    tracing::info!(
        "tabserve v{} serving {} on {}",
        env!("CARGO_PKG_VERSION"),
        root.display(),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app).await.expect("server error");
}
