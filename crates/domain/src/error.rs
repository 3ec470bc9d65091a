//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into these via
//! `#[from]` or an explicit `into_registry`.

/// Boxed error carried as the source of a failed registry call.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The target label set is empty.
    #[error("at least one target label is required")]
    EmptyTargetLabels,

    /// A target label is empty or whitespace only.
    #[error("target labels must not be blank")]
    BlankTargetLabel,

    /// No relay slot would be probed.
    #[error("max_slots must be greater than zero")]
    ZeroSlots,

    /// A polling interval is zero.
    #[error("{name} interval must be greater than zero")]
    ZeroInterval {
        /// Which interval (e.g. `"discovery"`).
        name: &'static str,
    },

    /// A polling interval is longer than the supported maximum.
    #[error("{name} interval must not exceed {max_secs}s")]
    IntervalTooLong {
        /// Which interval (e.g. `"discovery"`).
        name: &'static str,
        /// Largest accepted interval, in seconds.
        max_secs: u64,
    },

    /// A bus service name or object path is empty.
    #[error("bus layout field {field} must not be empty")]
    EmptyLayoutField {
        /// The offending field name.
        field: &'static str,
    },
}

/// Failure of a single registry read or write.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The service is not present on the bus (not started yet, or gone).
    #[error("service {service} is not available")]
    ServiceUnavailable {
        /// Bus service name.
        service: String,
    },

    /// The service exists but does not publish the object.
    #[error("object {service}{path} does not exist")]
    ObjectNotFound {
        /// Bus service name.
        service: String,
        /// Object path.
        path: String,
    },

    /// The call reached the object but failed.
    #[error("call to {service}{path} failed")]
    Call {
        /// Bus service name.
        service: String,
        /// Object path.
        path: String,
        /// Underlying transport error.
        #[source]
        source: BoxError,
    },

    /// The object refused the written value.
    #[error("{service}{path} rejected the value (code {code})")]
    Rejected {
        /// Bus service name.
        service: String,
        /// Object path.
        path: String,
        /// Status code returned by the object.
        code: i32,
    },
}

impl RegistryError {
    /// Whether the failure only means "nothing there yet".
    ///
    /// Missing services and objects are expected while other services are
    /// still starting, and while probing slots that were never configured.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable { .. } | Self::ObjectNotFound { .. }
        )
    }
}
