/// Static file server for the built browser bundle
///
/// Serves `robots.txt` and, in production mode, the `dist/` directory
/// produced by the web build. Configured through environment variables
/// (`PORT`, `APP_ENV`), optionally loaded from a `.env` file.

use anyhow::Result;
use axum::Router;
use std::path::PathBuf;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct ServerConfig {
    port: u16,
    production: bool,
    bundle_dir: PathBuf,
    robots_path: PathBuf,
}

impl ServerConfig {
    fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let production = std::env::var("APP_ENV")
            .map(|env| env == "production")
            .unwrap_or(false);

        Self {
            port,
            production,
            bundle_dir: PathBuf::from("dist"),
            robots_path: PathBuf::from("robots.txt"),
        }
    }
}

fn build_router(config: &ServerConfig) -> Router {
    let mut router =
        Router::new().route_service("/robots.txt", ServeFile::new(&config.robots_path));

    // The bundle only exists after a production build; in development the
    // dev server owns the assets.
    if config.production {
        router = router.fallback_service(ServeDir::new(&config.bundle_dir));
    } else {
        info!("running in development mode; bundle directory not mounted");
    }

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new()),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("loopline_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let app = build_router(&config);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("serving on http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_config(production: bool, root: &std::path::Path) -> ServerConfig {
        ServerConfig {
            port: 0,
            production,
            bundle_dir: root.join("dist"),
            robots_path: root.join("robots.txt"),
        }
    }

    #[tokio::test]
    async fn test_robots_txt_is_always_served() {
        let root = std::env::temp_dir().join("loopline-server-robots-test");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("robots.txt"), "User-agent: *\nAllow: /\n").unwrap();

        let router = build_router(&test_config(false, &root));
        let response = router
            .oneshot(Request::builder().uri("/robots.txt").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_development_mode_does_not_mount_the_bundle() {
        let root = std::env::temp_dir().join("loopline-server-dev-test");
        std::fs::create_dir_all(root.join("dist")).unwrap();
        std::fs::write(root.join("dist/index.html"), "<html></html>").unwrap();

        let router = build_router(&test_config(false, &root));
        let response = router
            .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_production_mode_serves_the_bundle() {
        let root = std::env::temp_dir().join("loopline-server-prod-test");
        std::fs::create_dir_all(root.join("dist")).unwrap();
        std::fs::write(root.join("dist/index.html"), "<html></html>").unwrap();

        let router = build_router(&test_config(true, &root));
        let response = router
            .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
