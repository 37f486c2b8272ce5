use swimbuddz_api::{build_router, state::AppState};
use swimbuddz_config::Settings;
use swimbuddz_db::{connect, indexes::ensure_indexes};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "swimbuddz_api=debug,swimbuddz_services=debug,swimbuddz_db=debug,tower_http=debug"
                .into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load()?;
    info!("Starting SwimBuddz readiness API on {}:{}", settings.app.host, settings.app.port);
    info!(
        backend = %settings.backend.base_url,
        member_path = %settings.backend.member_path,
        timeout_secs = settings.backend.timeout_secs,
        "Members API config"
    );

    let db = connect(&settings.database).await?;
    ensure_indexes(&db).await?;

    let app_state = AppState::new(db, settings.clone())?;
    let app = build_router(app_state);

    let addr = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
