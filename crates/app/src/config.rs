//! Resolved configuration for a huffstring run.
//!
//! Turns parsed command-line arguments into a complete configuration,
//! filling unspecified values with defaults. Randomized defaults come from a
//! seeded RNG and the seed is always printed, so runs are reproducible.

use crate::cli::{Cli, Commands, InputArgs};
use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// Where input text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Text(String),
    Stdin,
}

impl InputSource {
    fn from_args(args: InputArgs) -> Self {
        match (args.input, args.text) {
            (Some(path), _) => InputSource::File(path),
            (None, Some(text)) => InputSource::Text(text),
            (None, None) => InputSource::Stdin,
        }
    }

    /// Read the whole input.
    pub fn read(&self) -> Result<String> {
        match self {
            InputSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read input {}", path.display())),
            InputSource::Text(text) => Ok(text.clone()),
            InputSource::Stdin => {
                std::io::read_to_string(std::io::stdin()).context("failed to read stdin")
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Text(text) => format!("literal ({} symbols)", text.chars().count()),
            InputSource::Stdin => "stdin".to_string(),
        }
    }
}

/// The operation to run, with every option resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Compress {
        input: InputSource,
        output: Option<PathBuf>,
        stats: bool,
    },
    Decompress {
        payload: PathBuf,
        output: Option<PathBuf>,
    },
    Dictionary {
        payload: PathBuf,
    },
    Stats {
        input: InputSource,
    },
    Demo {
        seed: u64,
        size_symbols: usize,
    },
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub operation: Operation,

    /// Log filter directive for the tracing subscriber
    pub log_filter: String,

    /// Whether to print the resolved configuration
    pub print_config: bool,
}

impl Config {
    /// Resolve parsed arguments into a configuration.
    ///
    /// `rust_log` is the value of RUST_LOG, consulted only with `--verbose`.
    pub fn from_cli(cli: Cli, rust_log: Option<String>) -> Result<Self> {
        let log_filter = if cli.quiet {
            "off".to_string()
        } else if cli.verbose {
            rust_log.unwrap_or_else(|| "info".to_string())
        } else {
            "warn".to_string()
        };

        let operation = match cli.command {
            Commands::Compress { input, out, stats } => Operation::Compress {
                input: InputSource::from_args(input),
                output: out,
                stats,
            },
            Commands::Decompress { payload, out } => Operation::Decompress {
                payload,
                output: out,
            },
            Commands::Dictionary { payload } => Operation::Dictionary { payload },
            Commands::Stats { input } => Operation::Stats {
                input: InputSource::from_args(input),
            },
            Commands::Demo { seed, size } => {
                let seed = match seed {
                    Some(seed) => seed,
                    None => time_seed()?,
                };
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                Operation::Demo {
                    seed,
                    size_symbols: size.unwrap_or_else(|| rng.gen_range(2_000..=20_000)),
                }
            }
        };

        Ok(Config {
            operation,
            log_filter,
            print_config: cli.print_config,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Log filter: {}", self.log_filter);
        match &self.operation {
            Operation::Compress { input, output, stats } => {
                println!("Operation: compress");
                println!("Input: {}", input.describe());
                println!("Output: {}", describe_output(output));
                println!("Statistics: {}", stats);
            }
            Operation::Decompress { payload, output } => {
                println!("Operation: decompress");
                println!("Payload: {}", payload.display());
                println!("Output: {}", describe_output(output));
            }
            Operation::Dictionary { payload } => {
                println!("Operation: dictionary");
                println!("Payload: {}", payload.display());
            }
            Operation::Stats { input } => {
                println!("Operation: stats");
                println!("Input: {}", input.describe());
            }
            Operation::Demo { seed, size_symbols } => {
                println!("Operation: demo");
                println!("Seed: {}", seed);
                println!("Sample size: {} symbols", size_symbols);
            }
        }
        println!();
    }
}

fn describe_output(output: &Option<PathBuf>) -> String {
    output
        .as_ref()
        .map_or_else(|| "stdout".to_string(), |path| path.display().to_string())
}

fn time_seed() -> Result<u64> {
    use std::time::{SystemTime, UNIX_EPOCH};
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?;
    Ok(elapsed.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn resolve(args: &[&str]) -> Config {
        let cli = Cli::try_parse_from(args).unwrap();
        Config::from_cli(cli, None).unwrap()
    }

    #[test]
    fn test_compress_with_text() {
        let config = resolve(&["huffstring", "compress", "--text", "hello"]);
        assert_eq!(
            config.operation,
            Operation::Compress {
                input: InputSource::Text("hello".to_string()),
                output: None,
                stats: false,
            }
        );
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_default_input_is_stdin() {
        let config = resolve(&["huffstring", "stats"]);
        assert_eq!(config.operation, Operation::Stats { input: InputSource::Stdin });
    }

    #[test]
    fn test_input_flags_conflict() {
        let result = Cli::try_parse_from(["huffstring", "stats", "--in", "a.txt", "--text", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_filters() {
        assert_eq!(resolve(&["huffstring", "-q", "stats"]).log_filter, "off");
        assert_eq!(resolve(&["huffstring", "-v", "stats"]).log_filter, "info");

        let cli = Cli::try_parse_from(["huffstring", "--verbose", "stats"]).unwrap();
        let config = Config::from_cli(cli, Some("huffstring_core=trace".to_string())).unwrap();
        assert_eq!(config.log_filter, "huffstring_core=trace");
    }

    #[test]
    fn test_demo_defaults_are_seeded() {
        let first = resolve(&["huffstring", "demo", "--seed", "42"]);
        let second = resolve(&["huffstring", "demo", "--seed", "42"]);
        assert_eq!(first.operation, second.operation);

        match first.operation {
            Operation::Demo { seed, size_symbols } => {
                assert_eq!(seed, 42);
                assert!((2_000..=20_000).contains(&size_symbols));
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_demo_explicit_size() {
        let config = resolve(&["huffstring", "demo", "--seed", "1", "--size", "50"]);
        assert_eq!(
            config.operation,
            Operation::Demo {
                seed: 1,
                size_symbols: 50
            }
        );
    }
}
