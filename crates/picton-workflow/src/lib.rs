pub mod delegation;
pub mod error;
pub mod identifier;
pub mod org;
pub mod status;
pub mod submission;
pub mod workflow;

pub use delegation::{Assignment, Delegation, active_delegate, assign_approver, delegated_units};
pub use error::WorkflowError;
pub use identifier::{signed_pdf_name, submission_identifier};
pub use org::{OrgUnit, hierarchy_path};
pub use status::{Decision, SubmissionStatus};
pub use submission::{StepDecision, Submission};
pub use workflow::{ApproverRole, Workflow, WorkflowStep, builtin_workflow, signature_key};
