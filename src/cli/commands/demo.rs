//! A guided tour of every console feature.

use anyhow::Result;
use std::thread;
use std::time::Duration;

use crate::console::Console;
use crate::markup::DEFAULT_TOKENS;
use crate::params;
use crate::process::ProgressStep;
use crate::prompt::ScriptedPrompter;
use crate::ui::handle_prompt_cancellation;

const AUTO_NAME: &str = "Auto User";
const OPTIONS: [&str; 4] = ["Option A", "Option B", "Option C", "Option D"];
const ACTIONS: [&str; 4] = ["Processing", "Calculating", "Analyzing", "Validating"];

/// Runs the demo. In non-interactive mode prompts are answered from a
/// script: a fixed name, then the default option.
pub fn run_demo(console: Console, non_interactive: bool) -> Result<()> {
    let console = if non_interactive {
        console.with_prompter(ScriptedPrompter::new([AUTO_NAME, ""]))
    } else {
        console
    };

    handle_prompt_cancellation(|| walkthrough(&console, non_interactive))
}

fn walkthrough(console: &Console, non_interactive: bool) -> Result<()> {
    if non_interactive {
        console.echo("\n*Welcome to x-console (non-interactive)*\n", &params!())?;
        console.echo_dim("(Running without user input)", &params!())?;
    } else {
        console.echo("\n*Welcome to x-console*\n", &params!())?;
        console.echo_dim("Let's start with some basic formatting...", &params!())?;
    }

    console.echo("\n*Text Formatting:*", &params!())?;
    console.echo("  • Default: *yellow* text, _italic_ text, and |dim| text", &params!())?;

    console.echo("\n*Custom Color Tokens:*", &params!())?;
    console.set_color_tokens([
        ('*', "bold red"),
        ('#', "blue"),
        ('~', "green italic"),
        ('@', "cyan underline"),
    ]);
    console.echo("  • Custom: *red bold*, #blue#, ~green italic~ and @underlined@!", &params!())?;
    console.set_color_tokens(DEFAULT_TOKENS.iter().copied());

    console.echo("\n*User Input:*", &params!())?;
    let question = "What's your name?";
    let name = console.prompt(question, None)?;
    if non_interactive {
        console.echo(
            "{question} [auto-response: {name}]",
            &params! { "question" => question, "name" => &name },
        )?;
    }
    console.echo("Nice to meet you, *{name}*!", &params! { "name" => &name })?;

    console.echo("\n*Selection Menu:*", &params!())?;
    let question = "Please select an option:";
    let selected = console.select(question, &OPTIONS, Some(&OPTIONS[0]))?;
    if non_interactive {
        console.echo(
            "{question} [auto-selected: {option}]",
            &params! { "question" => question, "option" => selected },
        )?;
    }
    console.echo("You selected: *{option}*", &params! { "option" => selected })?;

    console.echo("\n*Debug and Warning Messages:*", &params!())?;
    console.debug(
        "This is a _debug_ message with parameter: {param}",
        &params! { "param" => "test-value" },
    )?;
    console.warn(
        "This is a _warning_ message with parameter: {param}",
        &params! { "param" => "caution" },
    )?;
    console.log("This is a regular log message", &params!())?;

    console.echo("\n*Processing with Spinner:*", &params!())?;
    let (total, delay) = if non_interactive {
        (3, Duration::from_millis(300))
    } else {
        (6, Duration::from_millis(800))
    };
    console.process(|| operation(total, delay), "Running example process")?;

    console.echo("\n*Translation Features:*", &params!())?;
    translation_tour(console)?;

    console.echo("\n*Summary:*", &params!())?;
    console.echo("All x-console features have been demonstrated.", &params!())?;
    console.echo("\n_Thank you for trying x-console!_\n", &params!())?;

    Ok(())
}

fn operation(
    total: usize,
    delay: Duration,
) -> impl Iterator<Item = anyhow::Result<ProgressStep>> {
    (1..=total)
        .map(move |step| {
            thread::sleep(delay);
            Ok::<_, anyhow::Error>(ProgressStep::new(
                "Step {step} of {total}: {action}...",
                params! {
                    "step" => step,
                    "total" => total,
                    "action" => ACTIONS[(step - 1) % ACTIONS.len()],
                },
            ))
        })
        .chain(std::iter::once(Ok(ProgressStep::done(
            "Operation completed successfully!",
        ))))
}

fn translation_tour(console: &Console) -> Result<()> {
    if !console.has_translator() {
        console.echo("Translation needs a configured provider.", &params!())?;
        console.echo_dim(
            "Add [translation] and [providers.<name>] to ~/.config/x-console/config.toml",
            &params!(),
        )?;
        return Ok(());
    }

    let previous = console.language();

    if let Some(language) = console.setup_language(Some("Hola mundo"), None)? {
        console.debug("Detected language: {language}", &params! { "language" => &language })?;
    }
    console.echo("Language detection active. This should be translated to Spanish.", &params!())?;

    console.setup_language(None, Some("en"))?;
    console.echo("Back to English now.", &params!())?;

    let english = console.translate("Bonjour le monde", "en", true);
    console.echo(
        "French 'Bonjour le monde' translated to English: *{text}*",
        &params! { "text" => english },
    )?;

    console.setup_language(None, previous.as_deref())?;
    Ok(())
}
