//! Chat game bot server.
//!
//! Serves the command webhook over HTTP, or drives a single chat from the
//! console with `--console`.

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Error;
use cg_server::{api, config::ServerConfig, console, logging};
use chat_games::{
    Dispatcher, HttpScoreService, MessageContext, NoopScoreService, ScoreService,
    records::JsonFileUserStore,
};
use pico_args::Arguments;
use tracing::{info, warn};

const HELP: &str = "\
Run the chat game bot (tic-tac-toe, slot machine, blackjack, wheel of fortune)

USAGE:
  cg_server [OPTIONS]
  cg_server --console [--chat N] [--user NAME] [--user-id N]

OPTIONS:
  --bind       IP:PORT     HTTP bind address           [default: env SERVER_BIND or 127.0.0.1:8080]
  --data-dir   PATH        User record directory       [default: env DATA_DIR or ./data]
  --chat       N           Console chat id             [default: 1]
  --user       NAME        Console username            [default: console]
  --user-id    N           Console user id             [default: 1]

FLAGS:
  --console                Read commands from stdin instead of serving HTTP
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              HTTP bind address (e.g., 0.0.0.0:8080)
  DATA_DIR                 User record directory
  BOT_USERNAME             Bot username accepted as /command@NAME suffix
  BOT_ADMIN                Username allowed to run /delete
  SCORE_SERVICE_URL        Score service base URL (scores are only logged when unset)
  SCORE_SERVICE_SECRET     Shared secret for the score service
  (See .env.example for all configuration options)
";

struct Args {
    bind: Option<SocketAddr>,
    data_dir: Option<PathBuf>,
    console: bool,
    chat: i64,
    user: String,
    user_id: i64,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        data_dir: pargs.opt_value_from_str("--data-dir")?,
        console: pargs.contains("--console"),
        chat: pargs.opt_value_from_str("--chat")?.unwrap_or(1),
        user: pargs
            .opt_value_from_str("--user")?
            .unwrap_or_else(|| "console".to_string()),
        user_id: pargs.opt_value_from_str("--user-id")?.unwrap_or(1),
    };

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.data_dir.clone())?;
    config.validate()?;

    let store = JsonFileUserStore::open(&config.data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open data directory: {}", e))?;

    let scores: Arc<dyn ScoreService> = match &config.score_service {
        Some(score) => {
            let service = HttpScoreService::new(
                &score.url,
                score.secret.clone(),
                Duration::from_secs(score.timeout_secs),
            )?;
            info!("Reporting scores to {}", service.endpoint());
            Arc::new(service)
        }
        None => {
            warn!("SCORE_SERVICE_URL not set, score changes will only be logged");
            Arc::new(NoopScoreService)
        }
    };

    let dispatcher = Dispatcher::new(config.dispatcher_config(), Arc::new(store), scores);

    if args.console {
        let ctx = MessageContext::new(args.chat, args.user_id, Some(&args.user));
        info!("Console mode as @{} in chat {}", args.user, args.chat);
        console::run(Arc::new(dispatcher), ctx).await?;
        return Ok(());
    }

    let app = api::create_router(api::AppState::new(dispatcher));

    info!("Starting HTTP server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for CTRL+C: {}", e);
        std::future::pending::<()>().await;
    }
}
