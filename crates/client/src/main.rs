//! Headless line-oriented client.
//!
//! Composition root: loads content, opens the save directory, builds the
//! runtime and then reads commands from stdin, printing a text snapshot
//! after every change. Logs go to a file so stdout stays readable.

mod config;
mod input;
mod logging;
mod render;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use config::ClientConfig;
use game_content::{ConfigLoader, ContentFactory, ContentPack};
use game_core::Action;
use input::Command;
use runtime::{
    Event, FileStateRepository, GameStateEvent, OracleManager, Runtime, RuntimeError,
    RuntimeHandle, Topic,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&config.log_dir)?;

    let pack = load_content(&config)?;
    let repository = FileStateRepository::new(&config.save_data_dir).with_context(|| {
        format!("opening save directory {}", config.save_data_dir.display())
    })?;

    let runtime = Runtime::builder()
        .config(config.runtime_config())
        .oracles(OracleManager::from_pack(pack.clone()))
        .repository(Arc::new(repository))
        .build()
        .await?;

    tracing::info!(
        seed = config.game_seed,
        slot = %config.save_slot,
        save_dir = %config.save_data_dir.display(),
        "Session started"
    );

    let result = run(&runtime.handle(), &pack).await;
    runtime.shutdown().await?;
    tracing::info!("Client shutdown complete");
    result
}

fn load_content(config: &ClientConfig) -> Result<ContentPack> {
    let mut pack = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir)
            .load_pack()
            .with_context(|| format!("loading content from {}", dir.display()))?,
        None => ContentPack::builtin(),
    };

    if let Some(path) = &config.game_config {
        pack.config = ConfigLoader::load(path)
            .with_context(|| format!("loading game config {}", path.display()))?;
    }

    Ok(pack)
}

async fn run(handle: &RuntimeHandle, pack: &ContentPack) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut events = handle.subscribe(Topic::GameState);

    print_snapshot(handle, pack).await?;
    println!("Type `help` for commands.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match input::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => dispatch(handle, pack, command).await?,
                    Err(message) => println!("? {message}"),
                }
            }
            event = events.recv() => match event {
                Ok(Event::GameState(GameStateEvent::ContinuationFired { .. })) => {
                    print_snapshot(handle, pack).await?;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event stream lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    Ok(())
}

async fn dispatch(handle: &RuntimeHandle, pack: &ContentPack, command: Command) -> Result<()> {
    let outcome = match command {
        Command::Submit(action) => handle.execute_action(action).await.map(|_| ()),
        Command::Choose(index) => {
            let state = handle.query_state().await?;
            let next = state.mode.dialogue().and_then(|dialogue| {
                pack.dialogues
                    .iter()
                    .find(|tree| tree.id == dialogue.tree)
                    .and_then(|tree| tree.node(&dialogue.node))
                    .and_then(|node| node.options.get(index))
                    .map(|option| option.next.clone())
            });
            match next {
                Some(next) => handle
                    .execute_action(Action::select_option(next))
                    .await
                    .map(|_| ()),
                None => {
                    println!("? no option {}", index + 1);
                    return Ok(());
                }
            }
        }
        Command::Save => handle.save().await.map(|()| println!("Saved.")),
        Command::Load => handle.load().await,
        Command::Reset => handle.reset().await,
        Command::Look => Ok(()),
        Command::Help => {
            println!("{}", input::HELP);
            return Ok(());
        }
        Command::Quit => return Ok(()),
    };

    match outcome {
        Ok(()) => {}
        Err(
            error @ (RuntimeError::CommandChannelClosed
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_)),
        ) => return Err(error.into()),
        Err(error) => println!("! {error}"),
    }

    print_snapshot(handle, pack).await
}

async fn print_snapshot(handle: &RuntimeHandle, pack: &ContentPack) -> Result<()> {
    let state = handle.query_state().await?;
    println!("{}", render::snapshot(&state, pack));
    Ok(())
}
