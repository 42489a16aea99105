//! Customer records.

use crate::error::CommerceError;
use crate::ids::CustomerId;
use serde::{Deserialize, Serialize};

/// A customer as returned by the customer endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Customer {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Payload for creating or updating a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl NewCustomer {
    /// Apply the customer form rules.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.first_name.trim().is_empty() {
            return Err(CommerceError::MissingField("firstName"));
        }
        if self.last_name.trim().is_empty() {
            return Err(CommerceError::MissingField("lastName"));
        }
        if !looks_like_email(&self.email) {
            return Err(CommerceError::invalid("email", "not a valid e-mail address"));
        }
        if let Some(phone) = &self.phone {
            let digits = phone.chars().filter(char::is_ascii_digit).count();
            if digits < 7 {
                return Err(CommerceError::invalid("phone", "too few digits"));
            }
        }
        Ok(())
    }
}

fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
