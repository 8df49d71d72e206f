//! Arena terminal client.
//!
//! Every stdin line is `<user> <action> [args..]`, for example
//! `alice grow` or `bob accept fight_alice_1700000000_0`. `quit` exits.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use arena_client::{ClientConfig, Request, Session, dirs, logging};
use arena_runtime::{Arena, ArenaConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let client_config = ClientConfig::from_env();
    let mut arena_config = ArenaConfig::from_env();
    if arena_config.data_file.is_none() {
        arena_config.data_file = Some(dirs::data_file());
    }

    // 2. Setup logging
    let log_dir = client_config.log_dir.clone().unwrap_or_else(dirs::log_dir);
    logging::setup_logging(&log_dir)?;

    tracing::info!("Starting arena client");
    tracing::info!("Roster file: {:?}", arena_config.data_file);

    // 3. Start the arena worker
    let arena = Arena::start(arena_config).await?;
    let mut session = Session::new(arena.handle(), client_config);

    println!("⚔ Arena ready. Type `<user> help` for commands, `quit` to leave.");

    // 4. Serve input lines until EOF or `quit`
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") {
            break;
        }

        let request = match Request::parse(line) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(err) => {
                println!("{}", err.render());
                continue;
            }
        };

        match session.execute(request).await {
            Ok(text) => println!("{text}\n"),
            Err(err) => {
                tracing::error!("Command failed: {err:#}");
                println!("❌ Something went wrong: {err}\n");
            }
        }
    }

    tracing::info!("Shutting down");
    arena.shutdown().await?;

    Ok(())
}
