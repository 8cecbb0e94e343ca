use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ordbench::{
    clock::MonotonicClock,
    config::{ConfigLoader, TimingConfig},
    timer::Timer,
    BenchConfig, Registry, Runner,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Ordered map micro-benchmark runner")]
struct Cli {
    /// Case names to run; every discoverable case when omitted
    cases: Vec<String>,

    /// Path to a YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override body executions per trial
    #[arg(long)]
    loops: Option<usize>,

    /// Override trials per measurement
    #[arg(long)]
    repeat: Option<usize>,

    /// Ten loops, one trial
    #[arg(long)]
    quick: bool,

    /// Print discoverable case names and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::new(".").load(path)?,
        None => BenchConfig::default(),
    };
    init_tracing(&config.logging.level);

    if cli.quick {
        config.timing = TimingConfig::quick();
    }
    if let Some(loops) = cli.loops {
        config.timing.loops = loops;
    }
    if let Some(repeat) = cli.repeat {
        config.timing.repeat = repeat;
    }
    config.validate()?;

    let registry = Registry::builtin();
    if cli.list {
        for name in registry.discover(&config.discovery.prefix) {
            println!("{name}");
        }
        return Ok(());
    }

    let timer = Timer::new(
        MonotonicClock::new(),
        config.timing.loops,
        config.timing.repeat,
    )?;
    let runner = Runner::new(&registry, timer, config.discovery, cli.cases)?;
    let stdout = io::stdout();
    runner.execute(&mut stdout.lock())?;
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
