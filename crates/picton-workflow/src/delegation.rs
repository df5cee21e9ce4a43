use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Temporary hand-over of one approver's authority within a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub delegator: u64,
    pub delegate: u64,
    /// Organizational unit code.
    pub unit: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
    #[serde(default)]
    pub reason: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Delegation {
    /// Active and `start <= now <= end`.
    pub fn covers(&self, now: OffsetDateTime) -> bool {
        self.is_active && self.start <= now && now <= self.end
    }
}

/// Delegate currently acting for `approver`, optionally restricted to `unit`.
/// The first matching delegation wins.
pub fn active_delegate(
    delegations: &[Delegation],
    approver: u64,
    unit: Option<&str>,
    now: OffsetDateTime,
) -> Option<u64> {
    delegations
        .iter()
        .filter(|delegation| delegation.delegator == approver && delegation.covers(now))
        .find(|delegation| unit.is_none_or(|unit| delegation.unit == unit))
        .map(|delegation| delegation.delegate)
}

/// Units whose approvals are currently delegated to `delegate`.
pub fn delegated_units(
    delegations: &[Delegation],
    delegate: u64,
    now: OffsetDateTime,
) -> Vec<&str> {
    delegations
        .iter()
        .filter(|delegation| delegation.delegate == delegate && delegation.covers(now))
        .map(|delegation| delegation.unit.as_str())
        .collect()
}

/// Who actually reviews a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub approver: u64,
    /// Original approver when the step was delegated.
    pub delegated_by: Option<u64>,
}

pub fn assign_approver(
    approver: u64,
    unit: Option<&str>,
    delegations: &[Delegation],
    now: OffsetDateTime,
) -> Assignment {
    match active_delegate(delegations, approver, unit, now) {
        Some(delegate) => {
            tracing::debug!(approver, delegate, "approval reassigned to delegate");
            Assignment {
                approver: delegate,
                delegated_by: Some(approver),
            }
        }
        None => Assignment {
            approver,
            delegated_by: None,
        },
    }
}
