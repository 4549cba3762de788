mod api;
mod cache;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::cache::FeedCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(flylady_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = flylady_feed::FeedClient::new(
        config.feed_url.clone(),
        config.feed_timeout_secs,
        &config.feed_user_agent,
    )?;
    let cache = Arc::new(FeedCache::new(
        client,
        Duration::from_secs(config.feed_revalidate_secs),
    ));

    let posts = flylady_blog::load_posts(&config.blog_dir)?;
    tracing::info!(
        posts = posts.len(),
        dir = %config.blog_dir.display(),
        "loaded blog posts"
    );

    let app = build_app(AppState {
        cache,
        posts: Arc::new(posts),
        config: Arc::clone(&config),
    });

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
