use anyhow::Context;

use foodiet::config::AppConfig;
use foodiet::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();
    config.validate()?;

    eprintln!("🥗 Foodiet v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api", config.port);
    eprintln!("   Submitting to: {}", config.submission.submit_url());
    eprintln!(
        "   Proxy: http://0.0.0.0:{}/api/create_profile → {}",
        config.port,
        config.submission.upstream_url()
    );
    eprintln!(
        "   Step transition delay: {}ms\n",
        config.transition_delay.as_millis()
    );

    let app = server::app(&config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, "Foodiet server started");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
