use std::io::{self, IsTerminal, Read};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wordle_golf_core::{format_strokes, parse_share_text, term_for, SubmitError};

use crate::config::{config_file_path, Config, ConfigError, ConfigFile, Overrides};
use crate::net::{HttpScoreStore, ScoreStore};
use crate::report;
use crate::tracker::Tracker;

#[derive(Debug, Parser)]
#[command(name = "wordle-golf", version, about = "Score shared Wordle results as golf")]
pub struct Cli {
    /// Your player name
    #[arg(long, global = true, env = "WORDLE_GOLF_PLAYER")]
    pub player: Option<String>,

    /// Score store endpoint
    #[arg(long, global = true, env = "WORDLE_GOLF_SERVER_URL")]
    pub server_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            player_name: self.player.clone(),
            server_url: self.server_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a result from pasted share text (read from stdin when omitted)
    Add { text: Option<String> },
    /// Everyone ranked by total strokes
    Leaderboard,
    /// The last 18 puzzles, one row per player
    Scorecard,
    /// Statistics for a player (yourself by default)
    Stats { player: Option<String> },
    /// Your results, newest first
    History,
    /// How guesses map to golf terms
    Legend,
    /// Save --player, --server-url and --timeout-secs to the config file
    Init,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match &cli.command {
        Command::Legend => {
            print!("{}", report::legend());
            return Ok(());
        }
        Command::Init => {
            let path = config_file_path();
            let file = ConfigFile::load(&path)?
                .unwrap_or_default()
                .merged(&cli.overrides());
            if file.player_name.is_none() {
                return Err(ConfigError::MissingPlayer.into());
            }
            file.save(&path)?;
            println!("Saved config to {}", path.display());
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load(cli.overrides())?;
    let command = match cli.command {
        Command::Add { text: None } => Command::Add {
            text: Some(read_stdin()?),
        },
        other => other,
    };

    let store = HttpScoreStore::new(&config.server_url, config.timeout)
        .context("could not build HTTP client")?;
    let rt = tokio::runtime::Runtime::new()?;
    let output = rt.block_on(async {
        let mut tracker = Tracker::new(store, config.player_name);
        execute(&mut tracker, command).await
    })?;
    print!("{}", output);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_stdin() -> anyhow::Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Paste your Wordle share text, then press Ctrl-D:");
    }
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("could not read share text from stdin")?;
    Ok(text)
}

/// Run one store-backed command and return what it prints.
///
/// Starts from a fresh reload, so a store that cannot be reached fails the
/// command. Share text for `Add` is parsed before the store is contacted.
/// `Legend` and `Init` never touch the store.
pub async fn execute<S: ScoreStore>(
    tracker: &mut Tracker<S>,
    command: Command,
) -> Result<String, SubmitError> {
    let share = match &command {
        Command::Legend => return Ok(report::legend()),
        Command::Init => return Ok(String::new()),
        Command::Add { text } => Some(parse_share_text(text.as_deref().unwrap_or_default())?),
        _ => None,
    };

    tracker.reload().await?;
    let me = tracker.player_name().to_string();

    let output = match (command, share) {
        (Command::Add { .. }, Some(share)) => {
            let record = tracker.submit_share(share).await?;
            let mut out = format!(
                "Added Wordle {}: {}, {} ({})\n\n",
                record.puzzle_number,
                record.result_label(),
                term_for(record.guesses),
                format_strokes(record.strokes())
            );
            out.push_str(&report::scorecard(&tracker.scorecard(), &me));
            if tracker.is_stale() {
                out.push_str("\nScore saved, but the refresh failed; the card may be out of date.\n");
            }
            out
        }
        (Command::Leaderboard, _) => report::leaderboard(&tracker.leaderboard(), &me),
        (Command::Scorecard, _) => report::scorecard(&tracker.scorecard(), &me),
        (Command::Stats { player }, _) => {
            let name = player.unwrap_or(me);
            report::statistics(&name, &tracker.stats_for(&name))
        }
        (Command::History, _) => report::history(&tracker.my_history()),
        (Command::Add { .. } | Command::Legend | Command::Init, _) => String::new(),
    };
    Ok(output)
}
