//! Identity as observed from the external provider.

use serde::{Deserialize, Serialize};

/// An authenticated external-provider user record.
///
/// Created and destroyed entirely by the identity provider; this crate only
/// observes the transitions and never mutates an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned unique id, also the profile document id
    pub uid: String,
    /// Email address, if the account has one
    pub email: Option<String>,
    /// Phone number in E.164 form, if the account has one
    pub phone_number: Option<String>,
}

impl Identity {
    /// Preferred contact string for greetings and logs: email, then phone.
    pub fn display_contact(&self) -> Option<&str> {
        self.email.as_deref().or(self.phone_number.as_deref())
    }
}
