use thiserror::Error;

use crate::status::SubmissionStatus;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("submission is {0}, only pending submissions can be decided")]
    NotPending(SubmissionStatus),
    #[error("submission is {0} and cannot be submitted")]
    CannotSubmit(SubmissionStatus),
    #[error("workflow has no approval steps")]
    EmptyWorkflow,
    #[error("workflow step orders start at 1")]
    ZeroStepOrder,
    #[error("duplicate workflow step order {0}")]
    DuplicateStep(u32),
    #[error("step {0} is not in the workflow")]
    UnknownStep(u32),
    #[error("step {0} is required and cannot be skipped")]
    StepRequired(u32),
    #[error("Comments are required when rejecting a form")]
    CommentsRequired,
    #[error("unknown organizational unit `{0}`")]
    UnknownUnit(String),
    #[error("organizational unit `{0}` is part of a parent cycle")]
    UnitCycle(String),
}
