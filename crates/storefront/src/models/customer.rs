//! Shopper contact details.

use local_shop_core::{Email, EmailError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for checkout and registration forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerError {
    #[error("Please enter your {0}")]
    MissingField(&'static str),
    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Name, email, phone and address of a shopper.
///
/// Sent to the backend as `customerData` and persisted as the logged-in
/// profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Customer {
    /// Check every field is filled in and the email is well formed.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in form order.
    pub fn validate(&self) -> Result<Email, CustomerError> {
        for (value, field) in [
            (&self.name, "name"),
            (&self.email, "email"),
            (&self.phone, "phone"),
            (&self.address, "address"),
        ] {
            if value.trim().is_empty() {
                return Err(CustomerError::MissingField(field));
            }
        }

        Ok(Email::parse(&self.email)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "0400 000 000".to_string(),
            address: "1 Main St".to_string(),
        }
    }

    #[test]
    fn test_valid_customer() {
        assert_eq!(
            customer().validate().map(|e| e.into_inner()),
            Ok("ada@example.com".to_string())
        );
    }

    #[test]
    fn test_missing_field_reported_in_form_order() {
        let c = Customer {
            name: " ".to_string(),
            phone: String::new(),
            ..customer()
        };
        assert_eq!(c.validate(), Err(CustomerError::MissingField("name")));
        assert_eq!(
            CustomerError::MissingField("phone").to_string(),
            "Please enter your phone"
        );
    }

    #[test]
    fn test_bad_email() {
        let c = Customer {
            email: "ada".to_string(),
            ..customer()
        };
        assert!(matches!(c.validate(), Err(CustomerError::InvalidEmail(_))));
    }
}
