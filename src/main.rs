use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursebuddy::chat::{ChatConfig, ChatService, ScriptedEngine};
use coursebuddy::courses::CourseDirectory;
use coursebuddy::routes::router;
use coursebuddy::state::AppState;
use coursebuddy::timetable::{HttpTimetableApi, Timetable, TimetableConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "coursebuddy=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://coursebuddy.db".to_string());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let directory = Arc::new(CourseDirectory::from_embedded()?);
    info!("loaded {} course identities", directory.len());

    let api = Arc::new(HttpTimetableApi::new(TimetableConfig::new_from_env())?);
    let timetable = Timetable::new(api, directory.clone());
    let engine = Arc::new(ScriptedEngine::from_embedded()?);

    let chat = Arc::new(ChatService::new(
        pool.clone(),
        engine,
        timetable,
        directory.clone(),
        ChatConfig::new_from_env(),
    ));

    let state = AppState {
        db: pool,
        chat,
        directory,
    };

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
