use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;
use crate::status::{Decision, SubmissionStatus};
use crate::workflow::{Workflow, WorkflowStep};

/// Recorded outcome of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDecision {
    pub step: u32,
    pub decision: Decision,
    #[serde(default)]
    pub comments: String,
}

/// A student's submission moving through its template's workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub template_id: u64,
    pub submitter_id: u64,
    pub status: SubmissionStatus,
    /// Order of the step awaiting a decision; 0 when none is.
    pub current_step: u32,
    /// Bumped every time the submission is returned for changes.
    pub version: u32,
    #[serde(default)]
    pub history: Vec<StepDecision>,
}

impl Submission {
    pub fn new(template_id: u64, submitter_id: u64) -> Self {
        Self {
            template_id,
            submitter_id,
            status: SubmissionStatus::Draft,
            current_step: 0,
            version: 1,
            history: Vec::new(),
        }
    }

    /// Draft or returned submissions enter the first step as pending.
    pub fn submit(&mut self, workflow: &Workflow) -> Result<(), WorkflowError> {
        match self.status {
            SubmissionStatus::Draft | SubmissionStatus::Returned => {
                self.status = SubmissionStatus::Pending;
                self.current_step = workflow.first().order;
                tracing::debug!(
                    template = self.template_id,
                    step = self.current_step,
                    version = self.version,
                    "submission pending"
                );
                Ok(())
            }
            other => Err(WorkflowError::CannotSubmit(other)),
        }
    }

    pub fn current<'a>(&self, workflow: &'a Workflow) -> Option<&'a WorkflowStep> {
        if self.status != SubmissionStatus::Pending {
            return None;
        }
        workflow.step(self.current_step)
    }

    /// Applies a decision to the current step and returns the new status.
    ///
    /// Approval advances to the next step or finishes the submission.
    /// Rejection requires comments.
    pub fn record(
        &mut self,
        workflow: &Workflow,
        decision: Decision,
        comments: &str,
    ) -> Result<SubmissionStatus, WorkflowError> {
        if self.status != SubmissionStatus::Pending {
            return Err(WorkflowError::NotPending(self.status));
        }
        if workflow.step(self.current_step).is_none() {
            return Err(WorkflowError::UnknownStep(self.current_step));
        }
        if decision == Decision::Rejected && comments.trim().is_empty() {
            return Err(WorkflowError::CommentsRequired);
        }

        self.history.push(StepDecision {
            step: self.current_step,
            decision,
            comments: comments.to_string(),
        });

        match decision {
            Decision::Approved => self.advance(workflow),
            Decision::Rejected => {
                self.status = SubmissionStatus::Rejected;
            }
            Decision::Returned => {
                self.status = SubmissionStatus::Returned;
                self.current_step = 0;
                self.version += 1;
            }
        }
        tracing::info!(
            template = self.template_id,
            decision = %decision,
            status = %self.status,
            step = self.current_step,
            "recorded approval decision"
        );
        Ok(self.status)
    }

    /// Moves past the current step without a decision. Only optional steps
    /// may be skipped.
    pub fn skip_step(&mut self, workflow: &Workflow) -> Result<SubmissionStatus, WorkflowError> {
        if self.status != SubmissionStatus::Pending {
            return Err(WorkflowError::NotPending(self.status));
        }
        let step = workflow
            .step(self.current_step)
            .ok_or(WorkflowError::UnknownStep(self.current_step))?;
        if step.required {
            return Err(WorkflowError::StepRequired(step.order));
        }
        self.advance(workflow);
        Ok(self.status)
    }

    fn advance(&mut self, workflow: &Workflow) {
        match workflow.next_after(self.current_step) {
            Some(next) => {
                self.current_step = next.order;
            }
            None => {
                self.status = SubmissionStatus::Approved;
                self.current_step = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::builtin_workflow;

    #[test]
    fn single_step_approval() {
        let workflow = builtin_workflow("Term Withdrawal Form");
        let mut submission = Submission::new(2, 10);
        submission.submit(&workflow).unwrap();
        assert_eq!(submission.current_step, 1);
        assert_eq!(
            submission.record(&workflow, Decision::Approved, "").unwrap(),
            SubmissionStatus::Approved
        );
        assert_eq!(
            submission.record(&workflow, Decision::Approved, ""),
            Err(WorkflowError::NotPending(SubmissionStatus::Approved))
        );
    }

    #[test]
    fn rejection_needs_comments() {
        let workflow = builtin_workflow("Term Withdrawal Form");
        let mut submission = Submission::new(2, 10);
        submission.submit(&workflow).unwrap();
        assert_eq!(
            submission.record(&workflow, Decision::Rejected, "  "),
            Err(WorkflowError::CommentsRequired)
        );
        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert!(submission.history.is_empty());
    }

    #[test]
    fn only_optional_steps_can_be_skipped() {
        let workflow = builtin_workflow("Graduate Petition Form");
        let mut submission = Submission::new(1, 10);
        submission.submit(&workflow).unwrap();
        assert_eq!(submission.skip_step(&workflow), Err(WorkflowError::StepRequired(1)));
        submission.record(&workflow, Decision::Approved, "").unwrap();
        submission.record(&workflow, Decision::Approved, "").unwrap();
        assert_eq!(submission.current_step, 3);
        submission.skip_step(&workflow).unwrap();
        assert_eq!(submission.current_step, 4);
    }
}
