use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use snake_board::game::GameConfig;
use snake_board::modes::HumanMode;
use snake_board::score::{BestScoreStore, FileBestScoreStore, MemoryBestScoreStore};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_board")]
#[command(version, about = "Grid snake: eat the stones, don't hit the walls")]
struct Cli {
    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid columns
    #[arg(long)]
    columns: Option<usize>,

    /// Grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Milliseconds between simulation ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Milliseconds between obstacle spawns
    #[arg(long)]
    spawn_ms: Option<u64>,

    /// Milliseconds between frames
    #[arg(long)]
    render_ms: Option<u64>,

    /// Seed for obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where the best score is kept between sessions
    #[arg(long, default_value = ".snake_board_best.json")]
    best_score_file: PathBuf,

    /// Keep the best score for this session only
    #[arg(long)]
    no_persist: bool,

    /// Log file; the terminal itself is taken by the game
    #[arg(long, default_value = "snake_board.log")]
    log_file: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => GameConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }
        if let Some(ms) = self.spawn_ms {
            config.spawn_interval_ms = ms;
        }
        if let Some(ms) = self.render_ms {
            config.render_interval_ms = ms;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;

    let store: Box<dyn BestScoreStore> = if cli.no_persist {
        Box::new(MemoryBestScoreStore::new())
    } else {
        Box::new(FileBestScoreStore::new(&cli.best_score_file))
    };

    info!("Starting snake_board with {:?}", config);

    let mut human_mode = HumanMode::new(config, store, cli.seed)?;
    human_mode.run().await?;

    Ok(())
}
