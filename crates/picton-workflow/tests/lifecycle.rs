use picton_workflow::{
    Decision, Delegation, Submission, SubmissionStatus, WorkflowError, assign_approver,
    builtin_workflow, delegated_units,
};
use serde_json::json;
use time::macros::datetime;

#[test]
fn graduate_petition_runs_through_every_required_step() {
    let workflow = builtin_workflow("Graduate Petition Form");
    let mut submission = Submission::new(1, 77);
    submission.submit(&workflow).expect("submit");

    let mut visited = Vec::new();
    while submission.status == SubmissionStatus::Pending {
        let step = submission.current(&workflow).expect("current step").clone();
        visited.push(step.order);
        if step.required {
            submission
                .record(&workflow, Decision::Approved, "")
                .expect("approve");
        } else {
            submission.skip_step(&workflow).expect("skip");
        }
    }

    assert_eq!(visited, vec![1, 2, 3, 4, 5]);
    assert_eq!(submission.status, SubmissionStatus::Approved);
    assert_eq!(submission.history.len(), 4);
}

#[test]
fn returned_submission_bumps_version_and_restarts() {
    let workflow = builtin_workflow("Graduate Petition Form");
    let mut submission = Submission::new(1, 77);
    submission.submit(&workflow).expect("submit");
    submission
        .record(&workflow, Decision::Approved, "")
        .expect("approve");
    let status = submission
        .record(&workflow, Decision::Returned, "Missing transcript")
        .expect("return");

    assert_eq!(status, SubmissionStatus::Returned);
    assert_eq!(submission.version, 2);
    assert_eq!(
        submission.record(&workflow, Decision::Approved, ""),
        Err(WorkflowError::NotPending(SubmissionStatus::Returned))
    );

    submission.submit(&workflow).expect("resubmit");
    assert_eq!(submission.current_step, 1);
}

#[test]
fn rejected_submission_is_final() {
    let workflow = builtin_workflow("Term Withdrawal Form");
    let mut submission = Submission::new(2, 77);
    submission.submit(&workflow).expect("submit");
    submission
        .record(&workflow, Decision::Rejected, "Past the deadline")
        .expect("reject");
    assert!(submission.status.is_final());
    assert_eq!(
        submission.submit(&workflow),
        Err(WorkflowError::CannotSubmit(SubmissionStatus::Rejected))
    );
}

#[test]
fn delegations_deserialize_and_reassign() {
    let delegations: Vec<Delegation> = serde_json::from_value(json!([
        {
            "delegator": 5,
            "delegate": 6,
            "unit": "GRAD",
            "start": "2025-02-01T00:00:00Z",
            "end": "2025-02-28T23:59:59Z",
            "reason": "Conference travel"
        }
    ]))
    .expect("deserialize");

    let now = datetime!(2025-02-14 09:30 UTC);
    let assignment = assign_approver(5, Some("GRAD"), &delegations, now);
    assert_eq!(assignment.approver, 6);
    assert_eq!(assignment.delegated_by, Some(5));
    assert_eq!(delegated_units(&delegations, 6, now), vec!["GRAD"]);

    let later = datetime!(2025-03-01 00:00 UTC);
    assert_eq!(assign_approver(5, Some("GRAD"), &delegations, later).approver, 5);
}
