use color_namer::api::{self, AppState};
use color_namer::config::Config;
use color_namer::{build_palette, AppError};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run(Config::from_env()).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    // Build the palette index once, shared read-only by every request
    let colors = config.palette.load()?;
    let palette = build_palette(colors)?;
    tracing::info!(
        "Loaded {} reference colors from {} palette",
        palette.len(),
        config.palette
    );

    let app = api::router(AppState::new(palette));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
