use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::FormsError;
use crate::values::{FileHandle, FormValues};

/// Body posted to the submission and preview endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub form_template: u64,
    pub form_data: FormValues,
}

impl SubmissionPayload {
    pub fn new(form_template: u64, form_data: FormValues) -> Self {
        Self {
            form_template,
            form_data,
        }
    }
}

/// One multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, file: FileHandle },
}

impl Part {
    pub fn name(&self) -> &str {
        match self {
            Part::Text { name, .. } | Part::File { name, .. } => name,
        }
    }
}

/// Wire encoding chosen for a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Encoded {
    Json(Value),
    Multipart(Vec<Part>),
}

/// JSON unless a file value is present, in which case multipart with
/// `form_template`, `form_data` (files removed) and one part per file.
pub fn encode(payload: &SubmissionPayload) -> Result<Encoded, FormsError> {
    if !payload.form_data.has_files() {
        return Ok(Encoded::Json(json!({
            "form_template": payload.form_template,
            "form_data": payload.form_data,
        })));
    }

    let mut parts = vec![
        Part::Text {
            name: "form_template".into(),
            value: payload.form_template.to_string(),
        },
        Part::Text {
            name: "form_data".into(),
            value: serde_json::to_string(&payload.form_data.without_files())?,
        },
    ];
    parts.extend(payload.form_data.files().map(|(name, file)| Part::File {
        name: name.clone(),
        file: file.clone(),
    }));
    Ok(Encoded::Multipart(parts))
}

/// Response of the preview endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreviewResponse {
    #[serde(default)]
    pub pdf_content: Option<String>,
}

impl PreviewResponse {
    /// Base64 PDF content, or an error when the server produced none.
    pub fn into_pdf(self) -> Result<String, FormsError> {
        self.pdf_content
            .filter(|content| !content.is_empty())
            .ok_or(FormsError::MissingPreview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_without_files() {
        let mut values = FormValues::new();
        values.set("first_name", "Ada");
        let encoded = encode(&SubmissionPayload::new(2, values)).unwrap();
        assert_eq!(
            encoded,
            Encoded::Json(json!({ "form_template": 2, "form_data": { "first_name": "Ada" } }))
        );
    }

    #[test]
    fn multipart_with_files() {
        let mut values = FormValues::new();
        values.set("first_name", "Ada");
        values.set("supporting_document", FileHandle::new("cert.pdf", 2048));
        let Encoded::Multipart(parts) = encode(&SubmissionPayload::new(1, values)).unwrap() else {
            panic!("expected multipart");
        };
        let names: Vec<_> = parts.iter().map(Part::name).collect();
        assert_eq!(names, vec!["form_template", "form_data", "supporting_document"]);
        assert_eq!(
            parts[1],
            Part::Text {
                name: "form_data".into(),
                value: r#"{"first_name":"Ada"}"#.into()
            }
        );
    }

    #[test]
    fn missing_preview_is_an_error() {
        let err = PreviewResponse::default().into_pdf().unwrap_err();
        assert_eq!(err.to_string(), "Failed to generate PDF preview");
        let ok = PreviewResponse {
            pdf_content: Some("JVBERi0=".into()),
        };
        assert_eq!(ok.into_pdf().unwrap(), "JVBERi0=");
    }
}
