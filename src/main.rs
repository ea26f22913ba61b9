use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four_tui::config::{AppConfig, StatsConfig};
use connect_four_tui::feedback::{Feedback, Silent, TerminalBell};
use connect_four_tui::game::{Board, GameSession, Player};
use connect_four_tui::logging;
use connect_four_tui::stats::{FileStatsStore, StatsStore, UnavailableStatsStore};
use connect_four_tui::ui::App;

/// Play two-player Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override where win statistics are stored
    #[arg(long)]
    stats_file: Option<PathBuf>,

    /// Keep statistics for this session only
    #[arg(long)]
    no_persist: bool,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Disable the drop animation
    #[arg(long)]
    no_animation: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Print the stored statistics and exit
    #[arg(long)]
    show_stats: bool,

    /// Reset the stored statistics to zero and exit
    #[arg(long)]
    reset_stats: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(path) = cli.stats_file {
        config.stats.path = path;
    }
    if cli.no_persist {
        config.stats.enabled = false;
    }
    if cli.mute {
        config.feedback.sound = false;
    }
    if cli.no_animation {
        config.feedback.animation = false;
    }
    config.validate().context("validating configuration")?;

    if let Err(err) = logging::init(&config.logging) {
        eprintln!("Warning: {err}, continuing without a log file");
    }

    let mut store = open_store(&config.stats);
    if cli.show_stats || cli.reset_stats {
        if cli.reset_stats {
            store.clear();
            info!("stored stats reset");
        }
        let stats = store.load();
        println!(
            "Red: {}  Yellow: {}  Draws: {}  ({} games)",
            stats.wins(Player::Red),
            stats.wins(Player::Yellow),
            stats.draws,
            stats.games()
        );
        return Ok(());
    }

    let board = Board::with_dimensions(config.board.width, config.board.height);
    let session = GameSession::with_board(board, config.rules.precedence, store);
    info!("terminal precedence {:?}", session.precedence());

    let feedback: Box<dyn Feedback> = if config.feedback.sound {
        Box::new(TerminalBell::new(io::stdout()))
    } else {
        Box::new(Silent)
    };
    let animation_step = config
        .feedback
        .animation
        .then(|| Duration::from_millis(config.feedback.animation_step_ms));

    let mut app = App::new(session, feedback, animation_step);
    run(&mut app).context("running terminal UI")?;
    info!("session ended with stats {:?}", app.session().stats());
    Ok(())
}

fn open_store(config: &StatsConfig) -> Box<dyn StatsStore> {
    if config.enabled {
        Box::new(FileStatsStore::with_key(&config.path, &config.key))
    } else {
        Box::new(UnavailableStatsStore)
    }
}

fn run<S: StatsStore>(app: &mut App<S>) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal even if the app failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
