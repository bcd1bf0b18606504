use anyhow::Result;

use crate::cli::EchoStyle;
use crate::console::Console;
use crate::markup::Params;

/// Renders `template` once with the chosen writer.
pub fn run_echo(
    console: &Console,
    template: &str,
    params: &[(String, String)],
    style: EchoStyle,
) -> Result<()> {
    let params: Params = params
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    match style {
        EchoStyle::Echo => console.echo(template, &params)?,
        EchoStyle::Dim => console.echo_dim(template, &params)?,
        EchoStyle::Log => console.log(template, &params)?,
        EchoStyle::Debug => console.debug(template, &params)?,
        EchoStyle::Warn => console.warn(template, &params)?,
    }

    Ok(())
}
