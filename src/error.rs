//! Error types for host access.
//!
//! ERROR HANDLING
//! ==============
//! None of these reach page code as exceptions. Storage errors are logged and
//! replaced with the default preference, capability errors skip controller
//! startup, and element errors stay local to the fragment that raised them.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("localStorage unavailable")]
    StorageUnavailable,
    #[error("localStorage access failed: {0}")]
    Storage(String),
    #[error("browser does not support {0}")]
    MissingCapability(&'static str),
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("unexpected time string from the browser: {0:?}")]
    UnexpectedTime(String),
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl HostError {
    /// Storage failures degrade to the default preference instead of aborting.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageUnavailable | Self::Storage(_))
    }
}
