//! CLI for echomap — live 2D mapping dashboard for an ultrasonic rover.

mod commands;
mod tui;

use clap::{Parser, Subcommand};

/// Default rover endpoint: the ESP32 access point's WebSocket server.
const DEFAULT_URL: &str = "ws://192.168.4.1:81/";

#[derive(Parser)]
#[command(name = "echomap")]
#[command(about = "echomap — live 2D mapping dashboard for an ultrasonic rover")]
#[command(version = echomap_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live interactive mapping dashboard (TUI)
    Dashboard {
        /// WebSocket endpoint of the rover
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,

        /// Delay before retrying a dropped connection, in milliseconds
        #[arg(long, default_value = "1000")]
        reconnect_ms: u64,

        /// Initial movement speed
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(0..=5))]
        speed: u8,
    },

    /// Print telemetry frames to stdout (pipe-friendly)
    Watch {
        /// WebSocket endpoint of the rover
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,

        /// Delay before retrying a dropped connection, in milliseconds
        #[arg(long, default_value = "1000")]
        reconnect_ms: u64,

        /// Stop after this many frames (0 = run forever)
        #[arg(long, default_value = "0")]
        frames: usize,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Dashboard {
            url,
            reconnect_ms,
            speed,
        } => commands::dashboard::run(&url, reconnect_ms, speed),
        Commands::Watch {
            url,
            reconnect_ms,
            frames,
        } => commands::watch::run(&url, reconnect_ms, frames),
    }
}
