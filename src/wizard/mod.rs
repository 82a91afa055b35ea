//! Stepped form wizard with validation gating and async submission.
//!
//! A wizard is an ordered list of [`StepDescriptor`]s sharing one form value
//! owned by the [`WizardController`]. Advancing is gated by the current step's
//! [`StepValidator`]; advancing from the terminal step hands the form to a
//! [`SubmissionCoordinator`] instead of moving the index.

pub mod controller;
pub mod copy;
pub mod step;
pub mod submission;

pub use controller::{Completion, NextOutcome, WizardController, WizardPhase, WizardState};
pub use copy::{ConfirmPrompt, Notice, WizardCopy};
pub use step::{StepDescriptor, StepValidator, StepView, ValidationError};
pub use submission::{CreatedEntity, SubmissionCoordinator, Submitter};
