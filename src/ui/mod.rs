use inquire::InquireError;

mod spinner;
mod style;

pub use spinner::{Spinner, failure_line, success_line};
pub use style::{DIM_SPEC, Style, WARNING_SPEC};

use crate::error::ConsoleError;

/// Check if the inquire error is a user cancellation/interruption.
pub const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Check if the inquire error means no interactive input can be read.
pub const fn is_input_closed(err: &InquireError) -> bool {
    is_prompt_cancelled(err) || matches!(err, InquireError::NotTTY | InquireError::IO(_))
}

/// Wraps an interactive flow and treats a closed input stream as a clean exit.
///
/// If the user cancels a prompt (Ctrl+C or Escape) and no default can stand
/// in, this prints a newline to clean up the terminal and returns `Ok(())`
/// instead of propagating the error.
pub fn handle_prompt_cancellation<F>(f: F) -> anyhow::Result<()>
where
    F: FnOnce() -> anyhow::Result<()>,
{
    match f() {
        Ok(()) => Ok(()),
        Err(e)
            if e.downcast_ref::<ConsoleError>()
                .is_some_and(|err| matches!(err, ConsoleError::InputUnavailable)) =>
        {
            println!();
            Ok(())
        }
        Err(e) => Err(e),
    }
}
