//! TagIdentifier - Names the remote resource whose tags are managed
//!
//! Usually an ARN, but some services use their own identifier format.
//! The domain never parses it.

/// Opaque, caller-supplied resource identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagIdentifier(String);

impl TagIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TagIdentifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TagIdentifier {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TagIdentifier {
    fn from(id: String) -> Self {
        Self(id)
    }
}
