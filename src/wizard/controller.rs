use std::fmt;

use crate::errors::{Precondition, WizardError};
use crate::wizard::copy::{ConfirmPrompt, Notice, WizardCopy};
use crate::wizard::step::{StepDescriptor, StepView};
use crate::wizard::submission::{CreatedEntity, SubmissionCoordinator, Submitter};

/// Lifecycle of a wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    NotStarted,
    Editing,
    Submitting,
    /// Created remotely; waiting for the user to dismiss the success notice.
    AwaitingAcknowledgement,
    Finished,
    Cancelled,
}

impl WizardPhase {
    pub fn is_closed(self) -> bool {
        matches!(self, WizardPhase::Finished | WizardPhase::Cancelled)
    }
}

/// Read-only snapshot of the navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardState {
    pub current_step: usize,
    pub total_steps: usize,
    pub is_submitting: bool,
}

/// Value handed to the presenter when the session ends.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion<D> {
    Created(D),
    Cancelled,
}

impl<D> Completion<D> {
    pub fn success(&self) -> bool {
        matches!(self, Completion::Created(_))
    }

    pub fn into_data(self) -> Option<D> {
        match self {
            Completion::Created(data) => Some(data),
            Completion::Cancelled => None,
        }
    }
}

/// Successful result of [`WizardController::go_next`].
#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome<E> {
    Advanced { from: usize, to: usize },
    Created { entity: E, notice: Notice },
}

type CompletionCallback<D> = Box<dyn FnOnce(Completion<D>) + Send>;

/// Owns the form data and drives step navigation for one wizard session.
///
/// Edits go through [`WizardController::update`]; steps only ever see the
/// form by reference. The completion callback fires exactly once, either on
/// [`WizardController::cancel`] or on [`WizardController::acknowledge`] after
/// a successful submission. Sessions built without a callback keep the
/// completion until [`WizardController::take_completion`] claims it, so the
/// outcome is delivered exactly once either way.
pub struct WizardController<S: Submitter> {
    steps: Vec<StepDescriptor<S::Form>>,
    data: Option<S::Form>,
    current: usize,
    phase: WizardPhase,
    visible: Option<StepView>,
    coordinator: SubmissionCoordinator<S>,
    copy: WizardCopy,
    on_completion: Option<CompletionCallback<S::Form>>,
    unclaimed: Option<Completion<S::Form>>,
}

impl<S: Submitter> WizardController<S> {
    pub fn new(
        steps: Vec<StepDescriptor<S::Form>>,
        data: S::Form,
        submitter: S,
        copy: WizardCopy,
    ) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(index, mut step)| {
                step.index = index;
                step
            })
            .collect();

        Ok(Self {
            steps,
            data: Some(data),
            current: 0,
            phase: WizardPhase::NotStarted,
            visible: None,
            coordinator: SubmissionCoordinator::new(submitter),
            copy,
            on_completion: None,
            unclaimed: None,
        })
    }

    /// Registers the callback invoked when the session ends.
    pub fn with_completion<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(Completion<S::Form>) + Send + 'static,
    {
        self.on_completion = Some(Box::new(callback));
        self
    }

    /// Shows step 0. Calling it again while editing returns to the first step
    /// without touching the form data.
    pub fn start(&mut self) -> Result<(), WizardError> {
        self.recover_abandoned_submission();
        match self.phase {
            WizardPhase::NotStarted | WizardPhase::Editing => {}
            _ => return Err(self.violation()),
        }
        tracing::info!(wizard = %self.copy.title, steps = self.steps.len(), "starting wizard");
        self.phase = WizardPhase::Editing;
        self.show_step(0);
        Ok(())
    }

    /// Validates the current step and advances, or submits from the terminal step.
    pub async fn go_next(&mut self) -> Result<NextOutcome<S::Entity>, WizardError> {
        self.recover_abandoned_submission();
        self.ensure_editing()?;

        let from = self.current;
        let data = self
            .data
            .as_ref()
            .ok_or(WizardError::PreconditionViolated(Precondition::SessionClosed))?;
        if let Err(reason) = self.steps[from].validator.check(data) {
            tracing::debug!(step = from, field = reason.field, "step validation failed");
            return Err(WizardError::ValidationFailed { step: from, reason });
        }

        if from + 1 < self.steps.len() {
            self.show_step(from + 1);
            return Ok(NextOutcome::Advanced { from, to: from + 1 });
        }
        self.submit().await
    }

    /// Returns to the previous step. Going back never validates.
    pub fn go_back(&mut self) -> Result<usize, WizardError> {
        self.recover_abandoned_submission();
        self.ensure_editing()?;
        if self.current == 0 {
            return Err(WizardError::PreconditionViolated(Precondition::AtFirstStep));
        }
        let to = self.current - 1;
        self.show_step(to);
        Ok(to)
    }

    /// Discards the session after the user confirmed [`Self::cancel_prompt`].
    pub fn cancel(&mut self) -> Result<(), WizardError> {
        self.recover_abandoned_submission();
        match self.phase {
            WizardPhase::NotStarted | WizardPhase::Editing => {}
            _ => return Err(self.violation()),
        }
        tracing::info!(wizard = %self.copy.title, step = self.current, "wizard cancelled");
        self.data = None;
        self.visible = None;
        self.phase = WizardPhase::Cancelled;
        self.complete(Completion::Cancelled);
        Ok(())
    }

    /// Dismisses the success notice and hands the form data to the presenter.
    pub fn acknowledge(&mut self) -> Result<(), WizardError> {
        if self.phase != WizardPhase::AwaitingAcknowledgement {
            return Err(self.violation());
        }
        let data = self
            .data
            .take()
            .ok_or(WizardError::PreconditionViolated(Precondition::SessionClosed))?;
        self.visible = None;
        self.phase = WizardPhase::Finished;
        tracing::info!(wizard = %self.copy.title, "wizard finished");
        self.complete(Completion::Created(data));
        Ok(())
    }

    /// Applies an edit to the shared form and reports whether the current
    /// step now validates.
    pub fn update<F>(&mut self, edit: F) -> Result<bool, WizardError>
    where
        F: FnOnce(&mut S::Form),
    {
        self.recover_abandoned_submission();
        match self.phase {
            WizardPhase::NotStarted | WizardPhase::Editing => {}
            _ => return Err(self.violation()),
        }
        let data = self
            .data
            .as_mut()
            .ok_or(WizardError::PreconditionViolated(Precondition::SessionClosed))?;
        edit(data);

        if self.phase == WizardPhase::Editing {
            self.show_step(self.current);
        }
        Ok(self.current_step_is_valid())
    }

    /// Hands out the session outcome when no callback was registered.
    pub fn take_completion(&mut self) -> Option<Completion<S::Form>> {
        self.unclaimed.take()
    }

    pub fn data(&self) -> Option<&S::Form> {
        self.data.as_ref()
    }

    /// Current phase. A submission whose future was dropped no longer counts
    /// as submitting.
    pub fn phase(&self) -> WizardPhase {
        if self.phase == WizardPhase::Submitting && !self.coordinator.is_submitting() {
            WizardPhase::Editing
        } else {
            self.phase
        }
    }

    pub fn state(&self) -> WizardState {
        WizardState {
            current_step: self.current,
            total_steps: self.steps.len(),
            is_submitting: self.phase() == WizardPhase::Submitting,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn visible_step(&self) -> Option<&StepView> {
        self.visible.as_ref()
    }

    pub fn coordinator(&self) -> &SubmissionCoordinator<S> {
        &self.coordinator
    }

    pub fn copy(&self) -> &WizardCopy {
        &self.copy
    }

    /// Human-facing position, e.g. `Step 2 of 4`.
    pub fn step_label(&self) -> String {
        format!("Step {} of {}", self.current + 1, self.steps.len())
    }

    /// Position of the current step with the last step as 100%.
    pub fn progress(&self) -> f32 {
        let total = self.steps.len();
        if total <= 1 {
            return 1.0;
        }
        (self.current as f32 / (total - 1) as f32).clamp(0.0, 1.0)
    }

    pub fn is_terminal_step(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    pub fn next_label(&self) -> &str {
        if self.is_terminal_step() {
            &self.copy.terminal_action
        } else {
            &self.copy.next_action
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.phase() == WizardPhase::Editing && self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.phase() == WizardPhase::Editing && self.current_step_is_valid()
    }

    pub fn cancel_prompt(&self) -> &ConfirmPrompt {
        &self.copy.cancel_prompt
    }

    fn current_step_is_valid(&self) -> bool {
        self.data
            .as_ref()
            .is_some_and(|data| self.steps[self.current].validator.is_valid(data))
    }

    async fn submit(&mut self) -> Result<NextOutcome<S::Entity>, WizardError> {
        let Some(data) = self.data.as_ref() else {
            return Err(WizardError::PreconditionViolated(Precondition::SessionClosed));
        };
        self.phase = WizardPhase::Submitting;
        let result = self.coordinator.submit(data).await;

        match result {
            Ok(entity) => {
                let notice = self.copy.success_notice(entity.display_name());
                self.phase = WizardPhase::AwaitingAcknowledgement;
                Ok(NextOutcome::Created { entity, notice })
            }
            Err(source) => {
                self.phase = WizardPhase::Editing;
                Err(WizardError::SubmissionFailed {
                    notice: self.copy.failure.clone(),
                    source,
                })
            }
        }
    }

    fn show_step(&mut self, index: usize) {
        let Some(data) = self.data.as_ref() else {
            return;
        };
        // The previous view is replaced, never stacked.
        self.visible = Some(self.steps[index].render(data));
        if self.current != index {
            tracing::debug!(from = self.current, to = index, "showing step {}", index + 1);
        }
        self.current = index;
    }

    fn complete(&mut self, completion: Completion<S::Form>) {
        match self.on_completion.take() {
            Some(callback) => callback(completion),
            None => {
                tracing::debug!("no completion callback registered, holding the outcome");
                self.unclaimed = Some(completion);
            }
        }
    }

    fn ensure_editing(&self) -> Result<(), WizardError> {
        if self.phase == WizardPhase::Editing {
            Ok(())
        } else {
            Err(self.violation())
        }
    }

    fn violation(&self) -> WizardError {
        let precondition = match self.phase {
            WizardPhase::NotStarted => Precondition::NotStarted,
            WizardPhase::Editing => Precondition::NotAwaitingAcknowledgement,
            WizardPhase::Submitting => Precondition::Submitting,
            WizardPhase::AwaitingAcknowledgement => Precondition::AwaitingAcknowledgement,
            WizardPhase::Finished | WizardPhase::Cancelled => Precondition::SessionClosed,
        };
        WizardError::PreconditionViolated(precondition)
    }

    /// A `go_next` future dropped mid-submission leaves the phase behind.
    fn recover_abandoned_submission(&mut self) {
        if self.phase == WizardPhase::Submitting && !self.coordinator.is_submitting() {
            tracing::warn!("previous submission was abandoned, returning to editing");
            self.phase = WizardPhase::Editing;
        }
    }
}

impl<S: Submitter> fmt::Debug for WizardController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardController")
            .field("title", &self.copy.title)
            .field("current", &self.current)
            .field("total", &self.steps.len())
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::errors::SubmissionError;
    use crate::remote::RemoteError;
    use crate::wizard::step::ValidationError;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Draft {
        title: String,
        tags: Vec<String>,
    }

    #[derive(Debug, PartialEq)]
    struct Saved(String);

    impl CreatedEntity for Saved {
        fn display_name(&self) -> &str {
            &self.0
        }
    }

    /// Replies with queued results; succeeds once the queue is empty.
    #[derive(Default)]
    struct ScriptedSubmitter {
        failures: Mutex<VecDeque<String>>,
        calls: Arc<Mutex<usize>>,
    }

    #[async_trait]
    impl Submitter for ScriptedSubmitter {
        type Form = Draft;
        type Entity = Saved;

        async fn submit(&self, form: &Draft) -> Result<Saved, SubmissionError> {
            *self.calls.lock().unwrap() += 1;
            match self.failures.lock().unwrap().pop_front() {
                Some(reason) => Err(RemoteError::Unavailable(reason).into()),
                None => Ok(Saved(form.title.clone())),
            }
        }
    }

    fn steps() -> Vec<StepDescriptor<Draft>> {
        vec![
            StepDescriptor::new("title", "Title").with_validator(|draft: &Draft| {
                if draft.title.trim().is_empty() {
                    Err(ValidationError::new("title", "Title is required"))
                } else {
                    Ok(())
                }
            }),
            StepDescriptor::new("tags", "Tags").with_validator(|draft: &Draft| {
                if draft.tags.is_empty() {
                    Err(ValidationError::new("tags", "Pick a tag"))
                } else {
                    Ok(())
                }
            }),
            StepDescriptor::new("review", "Review")
                .with_renderer(|draft: &Draft| vec![format!("Title: {}", draft.title)]),
        ]
    }

    type Log = Arc<Mutex<Vec<Completion<Draft>>>>;

    fn controller(submitter: ScriptedSubmitter) -> (WizardController<ScriptedSubmitter>, Log) {
        let log: Log = Arc::default();
        let sink = Arc::clone(&log);
        let wizard = WizardController::new(
            steps(),
            Draft::default(),
            submitter,
            WizardCopy::for_entity("note", "Note"),
        )
        .unwrap()
        .with_completion(move |completion| sink.lock().unwrap().push(completion));
        (wizard, log)
    }

    async fn walk_to_review(wizard: &mut WizardController<ScriptedSubmitter>) {
        wizard.start().unwrap();
        wizard.update(|d| d.title = "Weekly".into()).unwrap();
        wizard.go_next().await.unwrap();
        wizard.update(|d| d.tags.push("run".into())).unwrap();
        wizard.go_next().await.unwrap();
    }

    #[test]
    fn empty_step_list_is_rejected() {
        let result = WizardController::new(
            Vec::new(),
            Draft::default(),
            ScriptedSubmitter::default(),
            WizardCopy::for_entity("note", "Note"),
        );
        assert!(matches!(result, Err(WizardError::NoSteps)));
    }

    #[tokio::test]
    async fn navigation_requires_start() {
        let (mut wizard, _) = controller(ScriptedSubmitter::default());
        let err = wizard.go_next().await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::PreconditionViolated(Precondition::NotStarted)
        ));
    }

    #[tokio::test]
    async fn start_renders_only_the_first_step() {
        let (mut wizard, _) = controller(ScriptedSubmitter::default());
        wizard.start().unwrap();

        let view = wizard.visible_step().unwrap();
        assert_eq!(view.index, 0);
        assert_eq!(view.key, "title");
        assert_eq!(wizard.step_label(), "Step 1 of 3");
        assert_eq!(wizard.progress(), 0.0);
        assert!(!wizard.can_go_back());
        assert_eq!(wizard.next_label(), "Next");
    }

    #[tokio::test]
    async fn update_reports_step_validity() {
        let (mut wizard, _) = controller(ScriptedSubmitter::default());
        wizard.start().unwrap();

        assert!(!wizard.update(|d| d.title = "  ".into()).unwrap());
        assert!(!wizard.can_go_next());
        assert!(wizard.update(|d| d.title = "Weekly".into()).unwrap());
        assert!(wizard.can_go_next());
    }

    #[tokio::test]
    async fn blocked_transition_names_the_step_and_reason() {
        let (mut wizard, _) = controller(ScriptedSubmitter::default());
        wizard.start().unwrap();

        match wizard.go_next().await {
            Err(WizardError::ValidationFailed { step, reason }) => {
                assert_eq!(step, 0);
                assert_eq!(reason.field, "title");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(wizard.current_step(), 0);
    }

    #[tokio::test]
    async fn back_skips_validation_and_stops_at_zero() {
        let (mut wizard, _) = controller(ScriptedSubmitter::default());
        wizard.start().unwrap();
        wizard.update(|d| d.title = "Weekly".into()).unwrap();
        wizard.go_next().await.unwrap();

        wizard.update(|d| d.title.clear()).unwrap();
        assert_eq!(wizard.go_back().unwrap(), 0);
        assert!(matches!(
            wizard.go_back(),
            Err(WizardError::PreconditionViolated(Precondition::AtFirstStep))
        ));
        assert_eq!(wizard.current_step(), 0);
    }

    #[tokio::test]
    async fn review_step_sees_earlier_edits() {
        let (mut wizard, _) = controller(ScriptedSubmitter::default());
        walk_to_review(&mut wizard).await;

        let view = wizard.visible_step().unwrap();
        assert_eq!(view.key, "review");
        assert_eq!(view.lines, vec!["Title: Weekly".to_string()]);
        assert_eq!(wizard.progress(), 1.0);
        assert_eq!(wizard.next_label(), "Create Note");
    }

    #[tokio::test]
    async fn success_waits_for_acknowledgement() {
        let (mut wizard, log) = controller(ScriptedSubmitter::default());
        walk_to_review(&mut wizard).await;

        match wizard.go_next().await.unwrap() {
            NextOutcome::Created { entity, notice } => {
                assert_eq!(entity, Saved("Weekly".into()));
                assert_eq!(notice.title, "Note Created!");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(wizard.phase(), WizardPhase::AwaitingAcknowledgement);
        assert!(log.lock().unwrap().is_empty());
        assert!(wizard.cancel().is_err());

        wizard.acknowledge().unwrap();
        assert_eq!(wizard.current_step(), 2);
        let completions = log.lock().unwrap();
        assert_eq!(completions.len(), 1);
        assert!(completions[0].success());
        assert!(wizard.acknowledge().is_err());
    }

    #[tokio::test]
    async fn failure_keeps_state_and_allows_retry() {
        let submitter = ScriptedSubmitter::default();
        submitter
            .failures
            .lock()
            .unwrap()
            .push_back("offline".into());
        let calls = Arc::clone(&submitter.calls);
        let (mut wizard, log) = controller(submitter);
        walk_to_review(&mut wizard).await;

        let err = wizard.go_next().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "Note Creation Failed");
        assert!(!wizard.state().is_submitting);
        assert_eq!(wizard.current_step(), 2);
        assert_eq!(wizard.data().unwrap().title, "Weekly");
        assert!(log.lock().unwrap().is_empty());

        assert!(matches!(
            wizard.go_next().await.unwrap(),
            NextOutcome::Created { .. }
        ));
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn cancel_fires_once_and_closes_session() {
        let (mut wizard, log) = controller(ScriptedSubmitter::default());
        wizard.start().unwrap();
        wizard.cancel().unwrap();

        assert!(wizard.data().is_none());
        assert!(wizard.visible_step().is_none());
        assert!(matches!(
            wizard.cancel(),
            Err(WizardError::PreconditionViolated(Precondition::SessionClosed))
        ));
        assert!(wizard.go_back().is_err());
        assert!(wizard.go_next().await.is_err());
        assert_eq!(*log.lock().unwrap(), vec![Completion::Cancelled]);
    }

    #[test]
    fn single_step_wizard_reports_full_progress() {
        let wizard = WizardController::new(
            vec![StepDescriptor::new("only", "Only")],
            Draft::default(),
            ScriptedSubmitter::default(),
            WizardCopy::for_entity("note", "Note"),
        )
        .unwrap();
        assert_eq!(wizard.progress(), 1.0);
        assert!(wizard.is_terminal_step());
    }

    #[tokio::test]
    async fn outcome_is_held_when_no_callback_is_registered() {
        let mut wizard = WizardController::new(
            steps(),
            Draft::default(),
            ScriptedSubmitter::default(),
            WizardCopy::for_entity("note", "Note"),
        )
        .unwrap();
        wizard.start().unwrap();
        wizard.update(|d| d.title = "Weekly".into()).unwrap();
        wizard.go_next().await.unwrap();
        assert!(wizard.take_completion().is_none());

        wizard.cancel().unwrap();
        assert_eq!(wizard.take_completion(), Some(Completion::Cancelled));
        assert!(wizard.take_completion().is_none());
    }

    #[tokio::test]
    async fn registered_callback_leaves_nothing_to_take() {
        let (mut wizard, log) = controller(ScriptedSubmitter::default());
        walk_to_review(&mut wizard).await;
        wizard.go_next().await.unwrap();
        wizard.acknowledge().unwrap();

        assert!(wizard.take_completion().is_none());
        assert_eq!(log.lock().unwrap().len(), 1);
    }
}
