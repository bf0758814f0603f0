//! Messages sent from the contact page.

use serde::{Deserialize, Serialize};

use crate::error::{RepairError, Result};
use crate::profile::is_valid_phone;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// Name, a plausible email and a message are required. Phone is
    /// optional but must be 10 digits when given.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RepairError::Validation("Please enter your name".into()));
        }
        let email = self.email.trim();
        let plausible = email
            .split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
        if !plausible {
            return Err(RepairError::Validation(
                "Please enter a valid email address".into(),
            ));
        }
        let phone = self.phone.trim();
        if !phone.is_empty() && !is_valid_phone(phone) {
            return Err(RepairError::Validation("Phone must be 10 digits".into()));
        }
        if self.message.trim().chars().count() < 10 {
            return Err(RepairError::Validation(
                "Message must be at least 10 characters".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Asha".into(),
            email: "asha@example.in".into(),
            phone: String::new(),
            subject: "Warranty".into(),
            message: "My screen flickers again after the repair.".into(),
        }
    }

    #[test]
    fn test_valid_message() {
        assert!(message().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_email() {
        for email in ["", "asha", "@example.in", "asha@localhost"] {
            let m = ContactMessage {
                email: email.into(),
                ..message()
            };
            assert!(m.validate().is_err(), "accepted {:?}", email);
        }
    }

    #[test]
    fn test_phone_optional_but_checked() {
        let with_phone = ContactMessage {
            phone: "98765 43210".into(),
            ..message()
        };
        assert!(with_phone.validate().is_err());
        let with_phone = ContactMessage {
            phone: "9876543210".into(),
            ..message()
        };
        assert!(with_phone.validate().is_ok());
    }

    #[test]
    fn test_short_message_rejected() {
        let m = ContactMessage {
            message: "help".into(),
            ..message()
        };
        assert!(matches!(m.validate(), Err(RepairError::Validation(_))));
    }

    #[test]
    fn test_message_length_counts_characters() {
        // 7 characters, 19 bytes
        let short = ContactMessage {
            message: "मदद करो".into(),
            ..message()
        };
        assert!(matches!(short.validate(), Err(RepairError::Validation(_))));
        let long = ContactMessage {
            message: "स्क्रीन बार बार बंद हो जाती है".into(),
            ..message()
        };
        assert!(long.validate().is_ok());
    }
}
