use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "xc")]
#[command(about = "Rich console output, prompts and spinners")]
#[command(version)]
pub struct Args {
    /// Show debug lines
    #[arg(long, global = true)]
    pub debug: bool,

    /// Tag printed in front of debug lines
    #[arg(long, value_name = "TAG", global = true)]
    pub debug_prefix: Option<String>,

    /// Output language code (ISO 639-1, e.g., es, fr, ja)
    #[arg(short = 'l', long, global = true)]
    pub language: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress status messages and logs
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ~/.config/x-console/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk through every console feature
    Demo {
        /// Answer prompts automatically
        #[arg(long)]
        non_interactive: bool,
    },
    /// Render one line of markup
    Echo {
        /// Template with color tokens and {name} placeholders
        template: String,

        /// Template parameter
        #[arg(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Output variant
        #[arg(short = 's', long, value_enum, default_value_t = EchoStyle::Echo)]
        style: EchoStyle,
    },
    /// Translate text through the configured providers
    Translate {
        /// Text to translate
        text: String,

        /// Target language code (ISO 639-1, e.g., ja, en, zh)
        #[arg(short = 't', long = "to")]
        to: String,

        /// Skip the online provider
        #[arg(long)]
        offline: bool,
    },
    /// Detect the language of a text
    Detect {
        /// Text to inspect
        text: String,
    },
    /// List supported language codes
    Languages,
}

/// Which console writer renders an `echo` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EchoStyle {
    Echo,
    Dim,
    Log,
    Debug,
    Warn,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))
}
