use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use user_guard_bot::{bot, config, errors::Result};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env file first so RUST_LOG from it applies
    let dotenv_result = dotenv(); // Non-fatal, env vars can be set externally

    // 2. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match dotenv_result {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => info!("No .env file loaded: {}", e),
    }

    // 3. Load configuration
    let bot_config = config::load_bot_config()
        .inspect_err(|e| error!("Critical error loading configuration: {}", e))?;
    info!("Successfully processed bot configuration.");

    // 4. Run the bot
    bot::run_bot(bot_config).await?;

    Ok(())
}
