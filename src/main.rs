mod app;
mod cli;
mod command;
mod config;
mod consts;
mod game;
mod leaderboard;
mod logging;
mod menu;
mod options;
mod sprites;
mod util;
mod warning;
use crate::app::App;
use crate::cli::{Arguments, Invocation};
use crate::config::Config;
use crate::leaderboard::ScoreStore;
use crate::sprites::SpriteSheet;
use crate::util::Globals;
use crate::warning::{error_chain, Warning};
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use crossterm::execute;
use std::io::{self, ErrorKind};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match Invocation::from_env() {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Help) => {
            print!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Ok(Invocation::Version) => {
            println!("paddlesnake {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("paddlesnake: {e}\n\n{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };
    if let Err(e) = logging::init(args.log_file.as_deref()) {
        eprintln!("paddlesnake: logging disabled: {}", error_chain(&e).join(": "));
    }
    let (globals, warnings) = match startup(args) {
        Ok(r) => r,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("paddlesnake: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableFocusChange)
        .and_then(|()| App::new(globals, warnings).run(terminal));
    // Restore the terminal even if the game failed
    if let Err(e) = execute!(io::stdout(), DisableFocusChange) {
        log::warn!("Failed to disable focus change events: {e}");
    }
    ratatui::restore();
    io_exit(r)
}

/// Load everything the game needs before the terminal is taken over.
/// Problems that the game can carry on from are returned as warnings to show
/// on the main menu.
fn startup(args: Arguments) -> anyhow::Result<(Globals, Vec<Warning>)> {
    let (config_path, allow_missing) = if let Some(path) = args.config {
        (path, false)
    } else {
        (Config::default_path()?, true)
    };
    let config = Config::load(&config_path, allow_missing).with_context(|| {
        format!(
            "failed to load configuration from {}",
            config_path.display()
        )
    })?;
    let sprites = SpriteSheet::with_foods(config.food.clone())
        .context("invalid food sprite in configuration")?;

    let mut warnings = Vec::new();
    let mut options = config.load_options().unwrap_or_else(|e| {
        let msgs = error_chain(&e);
        log::warn!("{}", msgs.join(": "));
        warnings.push(Warning::from_error_messages(msgs));
        config.options
    });
    if let Some(speed) = args.speed {
        options.speed = speed;
    }
    let leaderboard = config.load_leaderboard().unwrap_or_else(|e| {
        let msgs = error_chain(&e);
        log::warn!("{}", msgs.join(": "));
        warnings.push(Warning::from_error_messages(msgs));
        ScoreStore::in_memory()
    });
    let player_name = args.name.unwrap_or_else(|| config.player_name.clone());
    log::info!(
        "Starting paddlesnake {} as {player_name:?}",
        env!("CARGO_PKG_VERSION")
    );
    let globals = Globals {
        config,
        options,
        leaderboard,
        sprites,
        player_name,
    };
    Ok((globals, warnings))
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("I/O error: {e}");
            eprintln!("paddlesnake: {e}");
            ExitCode::from(2)
        }
    }
}
