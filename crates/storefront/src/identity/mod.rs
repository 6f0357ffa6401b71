//! Shopper identity.
//!
//! There is no real authentication behind the storefront. [`IdentityProvider`]
//! is the seam a real auth backend would plug into; [`MockIdentityProvider`]
//! is a **stub** that accepts any login and remembers the profile in a
//! [`ProfileStore`] so it survives restarts.

mod store;

pub use store::{FileProfileStore, MemoryProfileStore, ProfileStore, USER_INFO_KEY};

use local_shop_core::{Email, EmailError};
use thiserror::Error;

use crate::models::{Customer, CustomerError};

/// Errors from identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("{0}")]
    InvalidProfile(#[from] CustomerError),
    #[error("Could not access the saved profile: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Saved profile is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Who is logged in, and how they log in and out.
pub trait IdentityProvider: Send {
    /// The logged-in shopper, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved profile cannot be read.
    fn current_user(&self) -> Result<Option<Customer>, IdentityError>;

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the profile
    /// cannot be saved.
    fn login(&mut self, email: &str, password: &str) -> Result<Customer, IdentityError>;

    /// Create an account and log it in.
    ///
    /// # Errors
    ///
    /// Returns an error if the details are invalid or cannot be saved.
    fn register(&mut self, customer: Customer) -> Result<Customer, IdentityError>;

    /// Forget the logged-in shopper.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved profile cannot be removed.
    fn logout(&mut self) -> Result<(), IdentityError>;
}

/// Stub identity provider. Any email logs in; passwords are not checked.
///
/// Login fabricates a fixed test profile for the given email. Registration
/// stores the submitted details verbatim (after validation).
pub struct MockIdentityProvider {
    store: Box<dyn ProfileStore>,
}

impl MockIdentityProvider {
    pub const MOCK_NAME: &'static str = "Test User";
    pub const MOCK_PHONE: &'static str = "1234567890";
    pub const MOCK_ADDRESS: &'static str = "123 Test St, Melbourne VIC 3000";

    #[must_use]
    pub fn new(store: Box<dyn ProfileStore>) -> Self {
        Self { store }
    }

    fn persist(&mut self, customer: &Customer) -> Result<(), IdentityError> {
        let json = serde_json::to_string(customer)?;
        self.store.save(USER_INFO_KEY, &json)?;
        Ok(())
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn current_user(&self) -> Result<Option<Customer>, IdentityError> {
        self.store
            .load(USER_INFO_KEY)?
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(IdentityError::from)
    }

    fn login(&mut self, email: &str, _password: &str) -> Result<Customer, IdentityError> {
        let email = Email::parse(email)?;
        let customer = Customer {
            name: Self::MOCK_NAME.to_string(),
            email: email.into_inner(),
            phone: Self::MOCK_PHONE.to_string(),
            address: Self::MOCK_ADDRESS.to_string(),
        };
        self.persist(&customer)?;
        tracing::info!(email = %customer.email, "Mock login");
        Ok(customer)
    }

    fn register(&mut self, customer: Customer) -> Result<Customer, IdentityError> {
        let email = customer.validate()?;
        let customer = Customer {
            email: email.into_inner(),
            ..customer
        };
        self.persist(&customer)?;
        tracing::info!(email = %customer.email, "Mock registration");
        Ok(customer)
    }

    fn logout(&mut self) -> Result<(), IdentityError> {
        self.store.remove(USER_INFO_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn provider() -> MockIdentityProvider {
        MockIdentityProvider::new(Box::new(MemoryProfileStore::default()))
    }

    #[test]
    fn test_login_fabricates_mock_profile() {
        let mut identity = provider();
        let user = identity.login("shopper@example.com", "whatever").unwrap();

        assert_eq!(user.name, "Test User");
        assert_eq!(user.email, "shopper@example.com");
        assert_eq!(user.address, "123 Test St, Melbourne VIC 3000");
        assert_eq!(identity.current_user().unwrap(), Some(user));
    }

    #[test]
    fn test_login_rejects_malformed_email() {
        let mut identity = provider();
        assert!(matches!(
            identity.login("nope", "pw"),
            Err(IdentityError::InvalidEmail(_))
        ));
        assert_eq!(identity.current_user().unwrap(), None);
    }

    #[test]
    fn test_register_keeps_submitted_details() {
        let mut identity = provider();
        let customer = Customer {
            name: "Grace".to_string(),
            email: " grace@example.com ".to_string(),
            phone: "555".to_string(),
            address: "9 Side St".to_string(),
        };

        let saved = identity.register(customer).unwrap();
        assert_eq!(saved.name, "Grace");
        assert_eq!(saved.email, "grace@example.com");
        assert_eq!(identity.current_user().unwrap(), Some(saved));
    }

    #[test]
    fn test_register_validates() {
        let mut identity = provider();
        let err = identity.register(Customer::default()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter your name");
    }

    #[test]
    fn test_logout_clears_profile() {
        let mut identity = provider();
        identity.login("shopper@example.com", "pw").unwrap();
        identity.logout().unwrap();
        assert_eq!(identity.current_user().unwrap(), None);
    }

    #[test]
    fn test_corrupt_profile_is_an_error() {
        let mut store = MemoryProfileStore::default();
        store.save(USER_INFO_KEY, "{not json").unwrap();
        let identity = MockIdentityProvider::new(Box::new(store));
        assert!(matches!(
            identity.current_user(),
            Err(IdentityError::Corrupt(_))
        ));
    }
}
