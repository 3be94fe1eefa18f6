use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use iss_o_mat::config::Config;
use iss_o_mat::store::{SampleStore, SqliteStore};
use iss_o_mat::{tracker, web};

#[derive(Parser)]
#[command(name = "iss-o-mat")]
#[command(about = "Records the ISS position and its ground-track speed")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Sample store URI, e.g. sqlite:///var/lib/iss-o-mat/samples.db
    #[arg(long, global = true)]
    store: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one sample
    Run,
    /// Record a sample on a fixed interval until interrupted
    Watch {
        #[arg(long, value_parser = humantime::parse_duration)]
        interval: Option<Duration>,
    },
    /// Print the most recent samples, newest first
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = match Config::resolve(cli.config.as_deref(), cli.store.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Run => run(&config).await,
        Commands::Watch { interval } => {
            let interval = interval.unwrap_or(config.watch.interval);
            watch(&config, interval).await
        }
        Commands::History { limit } => history(&config, limit),
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.web.bind = bind;
            }
            serve(config).await
        }
    }
}

async fn run(config: &Config) -> ExitCode {
    match tracker::run(config).await {
        Ok(sample) => match serde_json::to_string_pretty(&sample) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error encoding sample: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("Run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn watch(config: &Config, interval: Duration) -> ExitCode {
    if interval.is_zero() {
        eprintln!("Interval must be greater than zero");
        return ExitCode::FAILURE;
    }

    match tracker::watch(config, interval).await {
        Ok(recorded) => {
            println!("Recorded {} samples", recorded);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Watch failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn history(config: &Config, limit: usize) -> ExitCode {
    let store = match SqliteStore::connect(&config.store.uri) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error opening sample store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let samples = match store.recent(limit) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading samples: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for sample in samples {
        match serde_json::to_string(&sample) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("Error encoding sample: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

async fn serve(config: Config) -> ExitCode {
    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
