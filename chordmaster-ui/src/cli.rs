//! Command-line flags. Anything given here beats the config file.

use std::path::{Path, PathBuf};

use chordmaster_core::{AdvancePolicy, Config, KeyboardMode, ShellOptions};
use thiserror::Error;

pub const USAGE: &str = "\
usage: chordmaster [options]

  -v, --verbose        debug logging
      --wide           draw the chord's own span instead of one octave
      --uniform        allow the same chord twice in a row
      --mute           no audio
      --seed <n>       fixed shuffle seed
      --catalog <path> chord catalog (JSON) to use instead of the built-in one
      --list           print the catalog and exit
  -h, --help           show this help";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub verbose: bool,
    pub wide: bool,
    pub uniform: bool,
    pub mute: bool,
    pub list: bool,
    pub help: bool,
    pub seed: Option<u64>,
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("{0} needs a value")]
    MissingValue(&'static str),
    #[error("invalid seed {0:?}")]
    InvalidSeed(String),
    #[error("unknown argument {0:?}")]
    UnknownArgument(String),
}

/// Parse everything after the program name.
pub fn parse_args<I>(args: I) -> Result<CliArgs, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--verbose" => parsed.verbose = true,
            "--wide" => parsed.wide = true,
            "--uniform" => parsed.uniform = true,
            "--mute" => parsed.mute = true,
            "--list" => parsed.list = true,
            "-h" | "--help" => parsed.help = true,
            "--seed" => {
                let value = args.next().ok_or(CliError::MissingValue("--seed"))?;
                let seed = value.parse().map_err(|_| CliError::InvalidSeed(value))?;
                parsed.seed = Some(seed);
            }
            "--catalog" => {
                let value = args.next().ok_or(CliError::MissingValue("--catalog"))?;
                parsed.catalog = Some(PathBuf::from(value));
            }
            _ => return Err(CliError::UnknownArgument(arg)),
        }
    }

    Ok(parsed)
}

impl CliArgs {
    pub fn shell_options(&self, config: &Config) -> ShellOptions {
        ShellOptions {
            policy: if self.uniform {
                AdvancePolicy::Uniform
            } else {
                config.advance_policy()
            },
            keyboard: if self.wide {
                KeyboardMode::Wide
            } else {
                config.keyboard_mode()
            },
            timing: config.timing(),
            seed: self.seed,
        }
    }

    pub fn catalog_path<'a>(&'a self, config: &'a Config) -> Option<&'a Path> {
        self.catalog.as_deref().or_else(|| config.catalog_path())
    }

    pub fn muted(&self, config: &Config) -> bool {
        self.mute || config.muted()
    }
}
