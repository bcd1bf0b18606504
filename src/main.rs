use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use x_console::cli::commands::{demo, echo, load_console, load_translation, translate};
use x_console::cli::{Args, Command};
use x_console::output::{self, OutputConfig};
use x_console::translation::{log_directives, print_languages, validate_language};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || OutputConfig::default().no_color,
    });

    match &args.command {
        Command::Languages => {
            print_languages();
        }
        Command::Demo { non_interactive } => {
            let console = load_console(&args)?;
            demo::run_demo(console, *non_interactive)?;
        }
        Command::Echo {
            template,
            params,
            style,
        } => {
            let console = load_console(&args)?;
            echo::run_echo(&console, template, params, *style)?;
        }
        Command::Translate { text, to, offline } => {
            validate_language(to)?;
            let service = load_translation(&args)?;
            translate::run_translate(&service, text, to, !offline)?;
        }
        Command::Detect { text } => {
            let service = load_translation(&args)?;
            translate::run_detect(&service, text)?;
        }
    }

    Ok(())
}

fn init_tracing(args: &Args) {
    if args.quiet {
        return;
    }

    let level = match args.verbose {
        0 => "warn",
        1 => "info,x_console=debug",
        2 => "debug,x_console=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        log_directives()
            .iter()
            .filter_map(|directive| directive.parse().ok())
            .fold(EnvFilter::new(level), EnvFilter::add_directive)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
