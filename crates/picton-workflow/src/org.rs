use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Node of the organizational hierarchy (college, department, office).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgUnit {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// 0 for top-level units.
    #[serde(default)]
    pub level: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl OrgUnit {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            parent: None,
            level: 0,
            is_active: true,
        }
    }

    pub fn under(mut self, parent: &OrgUnit) -> Self {
        self.parent = Some(parent.code.clone());
        self.level = parent.level + 1;
        self
    }
}

/// Units from the root down to `code`.
pub fn hierarchy_path<'a>(
    units: &'a [OrgUnit],
    code: &str,
) -> Result<Vec<&'a OrgUnit>, WorkflowError> {
    let find = |code: &str| units.iter().find(|unit| unit.code == code);
    let mut current = find(code).ok_or_else(|| WorkflowError::UnknownUnit(code.to_string()))?;
    let mut seen = BTreeSet::new();
    let mut path = Vec::new();
    loop {
        if !seen.insert(current.code.as_str()) {
            return Err(WorkflowError::UnitCycle(current.code.clone()));
        }
        path.push(current);
        let Some(parent) = current.parent.as_deref() else {
            break;
        };
        current = find(parent).ok_or_else(|| WorkflowError::UnknownUnit(parent.to_string()))?;
    }
    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_to_the_root() {
        let university = OrgUnit::new("UH", "University of Houston");
        let college = OrgUnit::new("NSM", "Natural Sciences and Mathematics").under(&university);
        let department = OrgUnit::new("MATH", "Mathematics").under(&college);
        let units = vec![department.clone(), university, college];

        let codes: Vec<_> = hierarchy_path(&units, "MATH")
            .unwrap()
            .iter()
            .map(|unit| unit.code.as_str())
            .collect();
        assert_eq!(codes, vec!["UH", "NSM", "MATH"]);
        assert_eq!(department.level, 2);
    }

    #[test]
    fn reports_missing_and_cyclic_units() {
        let mut a = OrgUnit::new("A", "A");
        let mut b = OrgUnit::new("B", "B");
        a.parent = Some("B".into());
        b.parent = Some("A".into());
        let units = vec![a, b];
        assert_eq!(
            hierarchy_path(&units, "A").unwrap_err(),
            WorkflowError::UnitCycle("A".into())
        );
        assert_eq!(
            hierarchy_path(&units, "Z").unwrap_err(),
            WorkflowError::UnknownUnit("Z".into())
        );
    }
}
