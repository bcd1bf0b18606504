//! Spinner-driven process runner.
//!
//! A progress source is a factory returning a lazy sequence of
//! [`ProgressStep`]s. The runner pulls steps one at a time on the calling
//! thread and forwards each rendered line to a [`ProgressDisplay`]; the
//! display owns the animation and never pulls from the source itself.

use tracing::debug;

use crate::error::{ConsoleError, FormatError};
use crate::markup::Params;

/// One status update reported by a progress source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStep {
    pub message: String,
    pub params: Params,
}

impl ProgressStep {
    pub fn new(message: impl Into<String>, params: Params) -> Self {
        Self {
            message: message.into(),
            params,
        }
    }

    /// The completion marker: a final message with no parameters.
    pub fn done(message: impl Into<String>) -> Self {
        Self::new(message, Params::new())
    }

    /// A step with no parameters ends the run.
    pub fn is_completion(&self) -> bool {
        self.params.is_empty()
    }
}

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// The live status line shown while a process runs.
///
/// `succeed` and `fail` must not return until any animation has stopped.
pub trait ProgressDisplay {
    /// Replaces the status text.
    fn update(&mut self, line: &str);
    /// Finalizes the line as successful. `None` keeps only the label.
    fn succeed(&mut self, line: Option<&str>);
    /// Finalizes the line as failed with an error description.
    fn fail(&mut self, reason: &str);
}

/// Drives a progress source to completion.
#[derive(Debug)]
pub struct ProcessRunner {
    label: String,
    state: ProcessState,
    steps: usize,
}

impl ProcessRunner {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: ProcessState::Idle,
            steps: 0,
        }
    }

    pub const fn state(&self) -> ProcessState {
        self.state
    }

    /// Number of steps pulled from the source so far.
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Runs a fresh sequence from `source`, rendering each step with `render`.
    ///
    /// Iteration stops at the first completion marker, at exhaustion, or at
    /// the first error. On error the display is finalized as failed before
    /// the error is returned.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::ProcessSource`] carries the source's own error;
    /// [`ConsoleError::Format`] is returned if a step fails to render.
    pub fn run<F, I, R>(
        &mut self,
        source: F,
        display: &mut dyn ProgressDisplay,
        mut render: R,
    ) -> Result<(), ConsoleError>
    where
        F: Fn() -> I,
        I: IntoIterator<Item = anyhow::Result<ProgressStep>>,
        R: FnMut(&ProgressStep) -> Result<String, FormatError>,
    {
        self.state = ProcessState::Running;
        self.steps = 0;
        debug!(label = %self.label, "process started");

        for item in source() {
            self.steps += 1;

            let step = match item {
                Ok(step) => step,
                Err(err) => {
                    display.fail(&err.to_string());
                    self.finish(ProcessState::Failed);
                    return Err(ConsoleError::ProcessSource(err));
                }
            };

            let line = match render(&step) {
                Ok(line) => line,
                Err(err) => {
                    display.fail(&err.to_string());
                    self.finish(ProcessState::Failed);
                    return Err(err.into());
                }
            };

            if step.is_completion() {
                display.succeed(Some(&line));
                self.finish(ProcessState::Completed);
                return Ok(());
            }

            display.update(&line);
        }

        display.succeed(None);
        self.finish(ProcessState::Completed);
        Ok(())
    }

    fn finish(&mut self, state: ProcessState) {
        self.state = state;
        debug!(label = %self.label, steps = self.steps, ?state, "process finished");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::markup::substitute;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Update(String),
        Succeed(Option<String>),
        Fail(String),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl ProgressDisplay for Recorder {
        fn update(&mut self, line: &str) {
            self.events.push(Event::Update(line.to_string()));
        }

        fn succeed(&mut self, line: Option<&str>) {
            self.events.push(Event::Succeed(line.map(str::to_string)));
        }

        fn fail(&mut self, reason: &str) {
            self.events.push(Event::Fail(reason.to_string()));
        }
    }

    fn render(step: &ProgressStep) -> Result<String, FormatError> {
        substitute(&step.message, &step.params)
    }

    fn three_steps() -> Vec<anyhow::Result<ProgressStep>> {
        let mut steps: Vec<_> = (1..=3)
            .map(|i| {
                Ok(ProgressStep::new(
                    "Step {step} of {total}",
                    Params::new().with("step", i).with("total", 3),
                ))
            })
            .collect();
        steps.push(Ok(ProgressStep::done("All done")));
        steps
    }

    #[test]
    fn test_completion_marker() {
        assert!(ProgressStep::done("ok").is_completion());
        assert!(!ProgressStep::new("x", Params::new().with("a", 1)).is_completion());
    }

    #[test]
    fn test_new_runner_is_idle() {
        let runner = ProcessRunner::new("label");
        assert_eq!(runner.state(), ProcessState::Idle);
        assert_eq!(runner.steps(), 0);
    }

    #[test]
    fn test_run_to_completion() {
        let mut runner = ProcessRunner::new("Working");
        let mut display = Recorder::default();
        let mut renders = 0;

        runner
            .run(three_steps, &mut display, |step| {
                renders += 1;
                render(step)
            })
            .unwrap();

        assert_eq!(renders, 4);
        assert_eq!(runner.state(), ProcessState::Completed);
        assert_eq!(
            display.events,
            vec![
                Event::Update("Step 1 of 3".to_string()),
                Event::Update("Step 2 of 3".to_string()),
                Event::Update("Step 3 of 3".to_string()),
                Event::Succeed(Some("All done".to_string())),
            ]
        );
    }

    #[test]
    fn test_steps_after_marker_are_not_pulled() {
        let mut runner = ProcessRunner::new("Working");
        let mut display = Recorder::default();

        let source = || {
            vec![
                Ok(ProgressStep::done("finished early")),
                Err(anyhow::anyhow!("must not be reached")),
            ]
        };

        runner.run(source, &mut display, render).unwrap();
        assert_eq!(runner.steps(), 1);
        assert_eq!(runner.state(), ProcessState::Completed);
    }

    #[test]
    fn test_exhaustion_without_marker_succeeds() {
        let mut runner = ProcessRunner::new("Working");
        let mut display = Recorder::default();

        let source = || vec![Ok::<_, anyhow::Error>(ProgressStep::new("{n}", Params::new().with("n", 1)))];
        runner.run(source, &mut display, render).unwrap();

        assert_eq!(display.events.last(), Some(&Event::Succeed(None)));
    }

    #[test]
    fn test_source_error_fails_display_then_returns() {
        let mut runner = ProcessRunner::new("Working");
        let mut display = Recorder::default();

        let source = || {
            vec![
                Ok(ProgressStep::new("{n}", Params::new().with("n", 1))),
                Err(anyhow::anyhow!("connection reset")),
            ]
        };

        let err = runner.run(source, &mut display, render).unwrap_err();

        assert!(matches!(err, ConsoleError::ProcessSource(_)));
        assert_eq!(err.source_error().unwrap().to_string(), "connection reset");
        assert_eq!(runner.state(), ProcessState::Failed);
        assert_eq!(
            display.events.last(),
            Some(&Event::Fail("connection reset".to_string()))
        );
    }

    #[test]
    fn test_render_error_fails_display() {
        let mut runner = ProcessRunner::new("Working");
        let mut display = Recorder::default();

        let source = || vec![Ok::<_, anyhow::Error>(ProgressStep::new("{missing}", Params::new().with("a", 1)))];
        let err = runner.run(source, &mut display, render).unwrap_err();

        assert!(matches!(err, ConsoleError::Format(_)));
        assert_eq!(runner.state(), ProcessState::Failed);
        assert!(matches!(display.events.last(), Some(Event::Fail(_))));
    }

    #[test]
    fn test_factory_can_be_run_twice() {
        let mut runner = ProcessRunner::new("Working");

        for _ in 0..2 {
            let mut display = Recorder::default();
            runner.run(three_steps, &mut display, render).unwrap();
            assert_eq!(display.events.len(), 4);
            assert_eq!(runner.steps(), 4);
        }
    }
}
