//! `$PLACEHOLDER$` substitution for LaTeX form templates.
//!
//! Compiling the filled document to PDF happens elsewhere; this module only
//! produces the text.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use time::{Date, macros::format_description};

use crate::spec::{FieldDescriptor, FieldKind, FieldSchema, text_key};
use crate::values::{FieldValue, FormValues};

pub const CHECKED: &str = r"\checkmark";
pub const UNCHECKED: &str = r"\square";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([A-Za-z0-9_]+)\$").expect("placeholder pattern"));

/// Fields found in most templates and the placeholder each one fills.
const COMMON_FIELDS: &[(&str, &str)] = &[
    ("first_name", "FIRST_NAME"),
    ("last_name", "LAST_NAME"),
    ("middle_name", "MIDDLE_NAME"),
    ("student_id", "STUDENT_ID"),
    ("phone_number", "PHONE_NUMBER"),
    ("email", "EMAIL_ADDRESS"),
    ("email_address", "EMAIL_ADDRESS"),
    ("program_plan", "PROGRAM_PLAN"),
    ("academic_career", "ACADEMIC_CAREER"),
    ("year", "YEAR"),
    ("withdrawal_year", "WITHDRAWAL_YEAR"),
    ("season", "SEASON"),
    ("petition_explanation", "PETITION_EXPLANATION"),
];

/// Signature blocks every approval template carries.
pub const STANDARD_POSITIONS: &[&str] =
    &["PROGRAM_DIRECTOR", "DEPT_CHAIR", "ASSOC_DEAN", "VICE_PROVOST"];

/// Choice marks whose placeholder does not follow `PREFIX_OPTION`.
const MARK_ALIASES: &[(&str, &str)] =
    &[("PURPOSE_ADD_CONCURRENT_DEGREE", "PURPOSE_ADD_CONCURRENT")];

const SEASONS: &[&str] = &["fall", "spring", "summer"];

/// Every placeholder name referenced by `latex`.
pub fn placeholders_in(latex: &str) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(latex)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Placeholder spellings tried for a field: `FIELD_NAME`, `FIELDNAME`, `FieldName`.
pub fn placeholder_candidates(field_name: &str) -> [String; 3] {
    [
        field_name.to_uppercase(),
        field_name.replace('_', "").to_uppercase(),
        title_case(field_name).replace('_', ""),
    ]
}

fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut start = true;
    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            start = false;
        } else {
            out.push(ch);
            start = true;
        }
    }
    out
}

/// Schema fields none of whose placeholders occur in `latex`.
///
/// Hidden fields are never reported.
pub fn unused_fields(schema: &FieldSchema, latex: &str) -> Vec<String> {
    let found = placeholders_in(latex);
    schema
        .fields
        .iter()
        .filter(|field| field.kind != FieldKind::Hidden)
        .filter(|field| !field_placeholders(field).iter().any(|name| found.contains(name)))
        .map(|field| field.name.clone())
        .collect()
}

fn field_placeholders(field: &FieldDescriptor) -> Vec<String> {
    let mut names = vec![field.name.clone()];
    names.extend(placeholder_candidates(&field.name));
    names.extend(
        COMMON_FIELDS
            .iter()
            .filter(|(name, _)| *name == field.name)
            .map(|(_, placeholder)| placeholder.to_string()),
    );
    match field.kind {
        FieldKind::CheckboxGroup => names.extend(
            field
                .subfields
                .iter()
                .map(|sub| format!("INIT_{}", sub.name.to_uppercase())),
        ),
        FieldKind::Radio | FieldKind::Select => {
            let prefix = mark_prefix(&field.name);
            names.extend(
                field
                    .options
                    .iter()
                    .map(|option| mark_name(&prefix, option.value())),
            );
            if field.name == "season" {
                names.extend(SEASONS.iter().map(|season| season_mark(season)));
            }
        }
        _ => {}
    }
    names
}

/// `petition_purpose` marks use `PURPOSE_`, any other field its own name.
fn mark_prefix(field_name: &str) -> String {
    match field_name {
        "petition_purpose" => "PURPOSE".into(),
        other => other.to_uppercase(),
    }
}

fn mark_name(prefix: &str, option: &str) -> String {
    let name = format!("{prefix}_{}", option.to_uppercase().replace([' ', '-'], "_"));
    MARK_ALIASES
        .iter()
        .find(|(canonical, _)| *canonical == name)
        .map(|(_, alias)| alias.to_string())
        .unwrap_or(name)
}

fn season_mark(season: &str) -> String {
    format!("{}_SELECTED", season.to_uppercase())
}

fn mark(checked: bool) -> &'static str {
    if checked { CHECKED } else { UNCHECKED }
}

/// Formats 10-digit numbers as `(XXX) XXX-XXXX`; anything else is returned as is.
pub fn format_phone_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        raw.to_string()
    }
}

/// Approver details written into a signature block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signoff {
    pub name: String,
    pub date: Date,
    /// Already rendered LaTeX for the signature image, if any.
    pub signature: Option<String>,
}

/// Placeholder name to replacement text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Replacements {
    map: BTreeMap<String, String>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.map.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn insert_missing(&mut self, name: String, value: String) {
        self.map.entry(name).or_insert(value);
    }

    pub fn with_current_date(&mut self, today: Date) -> &mut Self {
        self.insert("CURRENT_DATE", format_date(today))
    }

    /// Well-known student fields. Phone numbers are normalized.
    pub fn common_fields(&mut self, values: &FormValues) -> &mut Self {
        for (field, placeholder) in COMMON_FIELDS {
            let Some(text) = values.text(field) else {
                continue;
            };
            let value = if *field == "phone_number" {
                format_phone_number(text)
            } else {
                text.to_string()
            };
            self.insert(*placeholder, value);
        }
        self
    }

    /// Blank signature blocks for every standard position.
    pub fn standard_positions(&mut self) -> &mut Self {
        for position in STANDARD_POSITIONS {
            for suffix in ["SIGNATURE", "NAME", "DATE"] {
                self.insert(format!("{position}_{suffix}"), "");
            }
        }
        self
    }

    /// Fills one signature block.
    pub fn signoff(&mut self, position: &str, signoff: &Signoff) -> &mut Self {
        self.insert(format!("{position}_NAME"), signoff.name.clone());
        self.insert(format!("{position}_DATE"), format_date(signoff.date));
        if let Some(signature) = &signoff.signature {
            self.insert(format!("{position}_SIGNATURE"), signature.clone());
        }
        self
    }

    /// Approved/rejected marks and comments for the deciding approver.
    pub fn decision(&mut self, position: &str, approved: bool, comments: &str) -> &mut Self {
        self.insert(format!("{position}_APPROVED"), mark(approved));
        self.insert(format!("{position}_REJECTED"), mark(!approved));
        self.insert(format!("{position}_COMMENTS"), comments);
        self
    }

    /// One mark per option of a radio/select field; the selected one is checked.
    pub fn choice_marks(&mut self, field: &FieldDescriptor, values: &FormValues) -> &mut Self {
        let selected = values.text(&field.name).unwrap_or_default();
        let prefix = mark_prefix(&field.name);
        for option in &field.options {
            self.insert(mark_name(&prefix, option.value()), mark(option.value() == selected));
        }
        self
    }

    /// `FALL_SELECTED`, `SPRING_SELECTED`, and `SUMMER_SELECTED` from `season`.
    pub fn season_marks(&mut self, values: &FormValues) -> &mut Self {
        let season = values.text("season").unwrap_or_default().to_lowercase();
        for candidate in SEASONS {
            self.insert(season_mark(candidate), mark(season == *candidate));
        }
        self
    }

    /// `INIT_<SUB>`: the typed initials when the item is checked, else a space.
    pub fn group_initials(&mut self, group: &FieldDescriptor, values: &FormValues) -> &mut Self {
        let flags = values.get(&group.name).and_then(FieldValue::as_flags);
        let key = text_key(&group.name);
        let texts = values.get(&key).and_then(FieldValue::as_texts);
        for sub in &group.subfields {
            let checked = flags.and_then(|flags| flags.get(&sub.name)).copied().unwrap_or(false);
            let text = texts
                .and_then(|texts| texts.get(&sub.name))
                .filter(|text| !text.is_empty());
            let value = match text {
                Some(text) if checked => text.clone(),
                _ => " ".to_string(),
            };
            self.insert(format!("INIT_{}", sub.name.to_uppercase()), value);
        }
        self
    }

    /// Remaining schema fields, matched against the placeholders present in
    /// `latex`. Entries already set are kept.
    pub fn generic_fields(
        &mut self,
        schema: &FieldSchema,
        values: &FormValues,
        latex: &str,
    ) -> &mut Self {
        let found = placeholders_in(latex);
        for field in &schema.fields {
            let Some(value) = values.get(&field.name) else {
                continue;
            };
            let rendered = match value {
                FieldValue::Text(text) => text.clone(),
                FieldValue::Flag(flag) => mark(*flag).to_string(),
                _ => continue,
            };
            for candidate in placeholder_candidates(&field.name) {
                if found.contains(&candidate) {
                    self.insert_missing(candidate, rendered.clone());
                }
            }
        }
        self
    }

    /// Everything a submission document needs, driven by the schema.
    pub fn for_submission(
        schema: &FieldSchema,
        values: &FormValues,
        latex: &str,
        today: Date,
    ) -> Self {
        let mut replacements = Replacements::new();
        replacements
            .with_current_date(today)
            .common_fields(values)
            .standard_positions();
        if !values.contains("year") && schema.has_field("year") {
            replacements.insert("YEAR", today.year().to_string());
        }
        for field in &schema.fields {
            match field.kind {
                FieldKind::Radio | FieldKind::Select => {
                    replacements.choice_marks(field, values);
                }
                FieldKind::CheckboxGroup if field.has_group_text() => {
                    replacements.group_initials(field, values);
                }
                _ => {}
            }
        }
        if schema.has_field("season") {
            replacements.season_marks(values);
        }
        replacements.generic_fields(schema, values, latex);
        replacements
    }
}

/// `%m/%d/%Y`.
pub fn format_date(date: Date) -> String {
    let format = format_description!("[month]/[day]/[year]");
    date.format(&format).unwrap_or_default()
}

/// Replaces every known placeholder; unknown ones are left intact.
pub fn fill_template(latex: &str, replacements: &Replacements) -> String {
    PLACEHOLDER
        .replace_all(latex, |caps: &Captures<'_>| match replacements.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
