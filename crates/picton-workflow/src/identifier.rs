use time::Date;
use time::macros::format_description;

use crate::status::Decision;

/// `FRM-{submitter}-{template}-{YYYYMMDD}-{suffix}`.
pub fn submission_identifier(submitter: u64, template: u64, date: Date, suffix: &str) -> String {
    let stamp = date
        .format(format_description!("[year][month][day]"))
        .unwrap_or_default();
    format!("FRM-{submitter}-{template}-{stamp}-{suffix}")
}

/// Storage name of the signed PDF produced for a decision.
pub fn signed_pdf_name(identifier: &str, type_code: &str, decision: Decision) -> String {
    format!("forms/signed/{identifier}_{type_code}_{decision}.pdf")
}
