//! User attributes resolved from the external user store.

use serde::{Deserialize, Serialize};

/// Attributes of an authenticated subject
///
/// The user record itself is owned by the external user store; the token
/// subsystem only needs an opaque identity and whatever display attributes
/// the store chooses to expose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttributes {
    /// Opaque identity, used as the token subject
    pub identity: String,

    /// Display name, if the store provides one
    #[serde(default)]
    pub name: Option<String>,
}

impl UserAttributes {
    /// Creates user attributes with just an identity
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            name: None,
        }
    }

    /// Attach a display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
