use serde::Deserialize;
use validator::Validate;

use crate::validation::ValidationFailure;

/// Raw contact form input. Absent fields deserialize to empty strings
/// and fail the declared rules.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[serde(default)]
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

/// A validated contact form submission.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn into_submission(self) -> Result<ContactSubmission, ValidationFailure> {
        self.validate().map_err(ValidationFailure::from)?;
        Ok(ContactSubmission {
            name: self.name,
            email: self.email,
            message: self.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(message: &str) -> ContactForm {
        ContactForm {
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn rejects_a_nine_character_message() {
        let failure = form("123456789").into_submission().unwrap_err();
        assert!(failure
            .summary()
            .contains("Message must be at least 10 characters"));
    }

    #[test]
    fn accepts_a_ten_character_message() {
        let submission = form("1234567890").into_submission().expect("should pass");
        assert_eq!(submission.message.len(), 10);
    }

    #[test]
    fn rejects_a_short_name() {
        let failure = ContactForm {
            name: "G".to_string(),
            ..form("long enough message")
        }
        .into_submission()
        .unwrap_err();
        assert!(failure.fields.iter().any(|f| f.field == "name"));
    }
}
