//! Command-line interface implementation

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::animation::{Animation, HeadlessSurface, SpriteSnapshot};
use crate::codec::{decode_value, encode_value};
use crate::config::{load_config, merge_cli_overrides, CliOverrides, Config};

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// emojirain - URL-safe JSON tokens and a headless emoji rain
#[derive(Parser)]
#[command(name = "emojirain")]
#[command(about = "URL-safe JSON tokens and a headless emoji rain")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this config file instead of discovering emojirain.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode JSON into a URL-safe token
    Encode {
        /// JSON file to read; stdin when omitted
        input: Option<PathBuf>,
    },
    /// Decode a token back into JSON
    Decode {
        /// Token to decode; read from stdin when omitted
        token: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Run the emoji rain without a display and report where sprites end up
    Simulate {
        /// Number of frames to run
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        frames: Option<u32>,

        /// Simulated milliseconds per frame
        #[arg(long)]
        frame_ms: Option<f64>,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Print every sprite as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode { input } => run_encode(input.as_deref()),
        Commands::Decode { token, pretty } => {
            let overrides = CliOverrides { pretty: pretty.then_some(true), ..Default::default() };
            match resolve_config(cli.config.as_deref(), &overrides) {
                Ok(config) => run_decode(token.as_deref(), config.codec.pretty),
                Err(code) => code,
            }
        }
        Commands::Simulate { frames, frame_ms, seed, json } => {
            let overrides = CliOverrides { pretty: None, frames, frame_ms, seed };
            match resolve_config(cli.config.as_deref(), &overrides) {
                Ok(config) => run_simulate(&config, json),
                Err(code) => code,
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn resolve_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<Config, ExitCode> {
    let config = load_config(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;

    let config = merge_cli_overrides(config, overrides);
    let errors = config.validate();
    if !errors.is_empty() {
        for error in errors {
            eprintln!("Error: {}", error);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }

    Ok(config)
}

/// Read a file, or stdin when no path is given
fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn input_name(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_else(|| "<stdin>".to_string())
}

/// Execute the encode command
fn run_encode(input: Option<&Path>) -> ExitCode {
    let text = match read_input(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", input_name(input), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: '{}' is not valid JSON: {}", input_name(input), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match encode_value(&value) {
        Ok(token) => {
            println!("{}", token);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the decode command
fn run_decode(token: Option<&str>, pretty: bool) -> ExitCode {
    let token = match token {
        Some(t) => t.to_string(),
        None => match read_input(None) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        },
    };

    let value = match decode_value(&token) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let output =
        if pretty { serde_json::to_string_pretty(&value) } else { serde_json::to_string(&value) };
    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Result of a headless run, as printed with `--json`
#[derive(Debug, Serialize)]
struct SimulationReport {
    frames: u32,
    frame_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    scheduled: usize,
    active: usize,
    pending: usize,
    resets: u64,
    sprites: Vec<SpriteSnapshot>,
}

fn simulate(config: &Config) -> SimulationReport {
    let settings = &config.simulate;
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut animation = Animation::start(HeadlessSurface::new(), rng);
    for frame in 0..settings.frames {
        animation.advance(f64::from(frame) * settings.frame_ms);
    }
    animation.stop();

    let sprites = animation.snapshot();
    SimulationReport {
        frames: settings.frames,
        frame_ms: settings.frame_ms,
        seed: settings.seed,
        scheduled: animation.scheduled_total(),
        active: animation.active_count(),
        pending: animation.pending_count(),
        resets: sprites.iter().map(|s| u64::from(s.resets)).sum(),
        sprites,
    }
}

/// Execute the simulate command
fn run_simulate(config: &Config, json: bool) -> ExitCode {
    let report = simulate(config);

    if json {
        return match serde_json::to_string_pretty(&report) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    let elapsed = f64::from(report.frames.saturating_sub(1)) * report.frame_ms;
    println!("Simulated {} frames ({:.0} ms)", report.frames, elapsed);
    println!("Sprites: {} active, {} pending, {} scheduled", report.active, report.pending, report.scheduled);
    println!("Wrapped to top: {} times", report.resets);
    let glyphs: String = report.sprites.iter().map(|s| s.glyph).collect();
    if !glyphs.is_empty() {
        println!("{}", glyphs);
    }
    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::SPRITE_COUNT;

    fn config_with(frames: u32, seed: Option<u64>) -> Config {
        let mut config = Config::default();
        config.simulate.frames = frames;
        config.simulate.seed = seed;
        config
    }

    #[test]
    fn test_cli_parses_simulate() {
        let cli = Cli::try_parse_from(["emojirain", "-vv", "simulate", "--frames", "10", "--seed", "3"])
            .expect("should parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Simulate { frames, seed, json, frame_ms } => {
                assert_eq!(frames, Some(10));
                assert_eq!(seed, Some(3));
                assert_eq!(frame_ms, None);
                assert!(!json);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_cli_rejects_zero_frames() {
        assert!(Cli::try_parse_from(["emojirain", "simulate", "--frames", "0"]).is_err());
    }

    #[test]
    fn test_simulate_short_run() {
        let report = simulate(&config_with(1, Some(1)));
        assert_eq!(report.active, 8);
        assert_eq!(report.pending, SPRITE_COUNT - 8);
        assert_eq!(report.scheduled, SPRITE_COUNT);
        assert_eq!(report.resets, 0);
    }

    #[test]
    fn test_simulate_long_run_wraps() {
        let report = simulate(&config_with(1200, Some(2)));
        assert_eq!(report.active, SPRITE_COUNT);
        assert_eq!(report.pending, 0);
        assert!(report.resets > 0);
        assert!(report.sprites.iter().all(|s| s.y <= 800.0 + s.velocity.y));
    }

    #[test]
    fn test_simulate_seeded_is_reproducible() {
        let a = simulate(&config_with(300, Some(9)));
        let b = simulate(&config_with(300, Some(9)));
        assert_eq!(a.sprites, b.sprites);
    }
}
