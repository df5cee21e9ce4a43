use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApproverRole {
    Staff,
    Admin,
}

impl ApproverRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApproverRole::Staff => "staff",
            ApproverRole::Admin => "admin",
        }
    }
}

/// One approval step of a template's workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub order: u32,
    pub approver_role: ApproverRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_position: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl WorkflowStep {
    pub fn new(order: u32, approver_role: ApproverRole) -> Self {
        Self {
            order,
            approver_role,
            approval_position: None,
            required: true,
        }
    }

    pub fn at_position(mut self, position: impl Into<String>) -> Self {
        self.approval_position = Some(position.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Placeholder prefix of this step's signature block, if it has one.
    pub fn signature_key(&self) -> Option<&'static str> {
        self.approval_position.as_deref().and_then(signature_key)
    }
}

/// Steps sorted by `order`; orders are unique and at least 1, since a
/// submission's `current_step` of 0 means no step is pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workflow {
    steps: Vec<WorkflowStep>,
}

impl Workflow {
    pub fn new(mut steps: Vec<WorkflowStep>) -> Result<Self, WorkflowError> {
        if steps.is_empty() {
            return Err(WorkflowError::EmptyWorkflow);
        }
        let mut seen = BTreeSet::new();
        for step in &steps {
            if step.order == 0 {
                return Err(WorkflowError::ZeroStepOrder);
            }
            if !seen.insert(step.order) {
                return Err(WorkflowError::DuplicateStep(step.order));
            }
        }
        steps.sort_by_key(|step| step.order);
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    pub fn first(&self) -> &WorkflowStep {
        // `new` rejects empty workflows.
        &self.steps[0]
    }

    pub fn step(&self, order: u32) -> Option<&WorkflowStep> {
        self.steps.iter().find(|step| step.order == order)
    }

    /// The step that follows `order`, if any.
    pub fn next_after(&self, order: u32) -> Option<&WorkflowStep> {
        self.steps.iter().find(|step| step.order > order)
    }
}

/// Maps an approval position to its signature placeholder prefix.
pub fn signature_key(position: &str) -> Option<&'static str> {
    match position {
        "Graduate Studies/Program Director" => Some("PROGRAM_DIRECTOR"),
        "Department Chair" => Some("DEPT_CHAIR"),
        "Associate/Assistant Dean for Graduate Studies" => Some("ASSOC_DEAN"),
        "Vice Provost/Dean of the Graduate School" => Some("VICE_PROVOST"),
        _ => None,
    }
}

/// The workflow configured for a built-in template. The graduate petition has
/// the five-step chain; every other template has a single staff approval.
pub fn builtin_workflow(template_name: &str) -> Workflow {
    let steps = if template_name == "Graduate Petition Form" {
        vec![
            WorkflowStep::new(1, ApproverRole::Staff)
                .at_position("Graduate Advisor/Committee Chair"),
            WorkflowStep::new(2, ApproverRole::Staff)
                .at_position("Graduate Studies/Program Director"),
            WorkflowStep::new(3, ApproverRole::Staff)
                .at_position("Department Chair")
                .optional(),
            WorkflowStep::new(4, ApproverRole::Staff)
                .at_position("Associate/Assistant Dean for Graduate Studies"),
            WorkflowStep::new(5, ApproverRole::Admin)
                .at_position("Vice Provost/Dean of the Graduate School"),
        ]
    } else {
        vec![WorkflowStep::new(1, ApproverRole::Staff)]
    };
    Workflow { steps }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_and_rejects_duplicates() {
        let workflow = Workflow::new(vec![
            WorkflowStep::new(3, ApproverRole::Admin),
            WorkflowStep::new(1, ApproverRole::Staff),
        ])
        .unwrap();
        assert_eq!(workflow.first().order, 1);
        assert_eq!(workflow.next_after(1).map(|step| step.order), Some(3));
        assert!(workflow.next_after(3).is_none());

        let err = Workflow::new(vec![
            WorkflowStep::new(1, ApproverRole::Staff),
            WorkflowStep::new(1, ApproverRole::Admin),
        ])
        .unwrap_err();
        assert_eq!(err, WorkflowError::DuplicateStep(1));
        assert_eq!(Workflow::new(Vec::new()).unwrap_err(), WorkflowError::EmptyWorkflow);
    }

    #[test]
    fn step_order_zero_is_rejected() {
        let err = Workflow::new(vec![
            WorkflowStep::new(0, ApproverRole::Staff),
            WorkflowStep::new(1, ApproverRole::Admin),
        ])
        .unwrap_err();
        assert_eq!(err, WorkflowError::ZeroStepOrder);
    }

    #[test]
    fn graduate_petition_chain() {
        let workflow = builtin_workflow("Graduate Petition Form");
        assert_eq!(workflow.steps().len(), 5);
        assert!(!workflow.step(3).unwrap().required);
        assert_eq!(workflow.step(5).unwrap().approver_role, ApproverRole::Admin);
        assert_eq!(workflow.step(1).unwrap().signature_key(), None);
        assert_eq!(workflow.step(4).unwrap().signature_key(), Some("ASSOC_DEAN"));
        assert_eq!(builtin_workflow("Term Withdrawal Form").steps().len(), 1);
    }
}
