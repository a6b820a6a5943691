use serde::{Deserialize, Serialize};

use crate::connections::client::{ConnectionIdentity, SessionNamespace};

/// A configured backend account.
///
/// JSON looks like:
/// ```json
/// { "alias": "work", "endpoint_url": "https://work.example.co",
///   "credential_key": "anon-key", "display_name": "Work" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub alias: String,
    pub endpoint_url: String,
    pub credential_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Account {
    pub fn new(
        alias: impl Into<String>,
        endpoint_url: impl Into<String>,
        credential_key: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            endpoint_url: endpoint_url.into(),
            credential_key: credential_key.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Human-readable name: the display name if set, otherwise the alias.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.alias)
    }

    pub fn identity(&self) -> ConnectionIdentity {
        ConnectionIdentity::new(self.endpoint_url.clone(), self.credential_key.clone())
    }

    pub fn namespace(&self) -> SessionNamespace {
        SessionNamespace::for_alias(&self.alias)
    }
}
