use validator::ValidationErrors;

/// One failed rule on one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Inspectable result of a failed form validation.
///
/// Carries every field-level message so callers can render them inline;
/// [`ValidationFailure::summary`] gives the aggregate single-line form
/// surfaced in `{success: false, message}` responses.
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    pub fields: Vec<FieldError>,
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationFailure {}

impl ValidationFailure {
    pub fn single(field: &str, message: &str) -> Self {
        Self {
            fields: vec![FieldError {
                field: field.to_string(),
                message: message.to_string(),
            }],
        }
    }

    pub fn summary(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                })
            })
            .collect();
        // HashMap iteration order is arbitrary; sort for stable summaries.
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        Self { fields }
    }
}
