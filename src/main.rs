// src/main.rs

use dotenvy::dotenv;
use gradebook::config::Config;
use gradebook::db;
use gradebook::error::AppError;
use gradebook::models::user::UpsertUserRequest;
use gradebook::repositories::{exercises, users};
use sqlx::SqlitePool;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load .env file (if present)
    dotenv().ok();

    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "gradebook.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let pool = db::connect(&config).await?;
    tracing::info!("Database connected...");

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;
    tracing::info!("Migrations applied successfully.");

    if let Err(e) = seed_admin_user(&pool, &config).await {
        tracing::error!("Failed to seed admin user: {:?}", e);
    }

    let exercises = exercises::load_exercises(&pool).await?;
    tracing::info!(count = exercises.len(), "Gradebook ready");

    pool.close().await;
    Ok(())
}

async fn seed_admin_user(pool: &SqlitePool, config: &Config) -> Result<(), AppError> {
    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        let request = UpsertUserRequest {
            username: username.clone(),
            firstname: "Admin".to_string(),
            lastname: String::new(),
            password: password.clone(),
        };

        if let Some(user_id) = users::ensure_user(pool, &request).await? {
            tracing::info!(user_id, "Admin user {} created successfully.", username);
        }
    }
    Ok(())
}
