//! Client snapshot carried on bookings and waitlist entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ClientId;

/// Snapshot of the requesting user embedded in a booking.
///
/// Bookings keep the contact data as provided at creation time; later edits
/// to the client record do not retroactively change past bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Terms acceptance at request time. Creation fails when false.
    pub accept_terms_and_conditions: bool,
}

impl UserSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
            accept_terms_and_conditions: true,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn declining_terms(mut self) -> Self {
        self.accept_terms_and_conditions = false;
        self
    }
}

/// Client record as held by the external identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Client {
    /// Produces the snapshot embedded into bookings and waitlist entries.
    pub fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            accept_terms_and_conditions: true,
        }
    }
}
