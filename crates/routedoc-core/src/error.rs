//! Error types for catalogue loading and versioned schema resolution.

/// A versioned schema could not produce a schema for the requested API version.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum VersionError {
    /// The requested version predates every variant in the version table.
    #[error("API version {version} is older than the earliest schema variant (since {earliest})")]
    Unsupported {
        /// The requested API version.
        version: u32,
        /// The lowest `since` in the table.
        earliest: u32,
    },

    /// A schema-producing function rejected the version.
    #[error("schema unavailable for API version {version}: {reason}")]
    Rejected {
        /// The requested API version.
        version: u32,
        /// Free-form reason supplied by the producer.
        reason: String,
    },
}

/// Errors produced while reading or querying a [`RouteCatalogue`](crate::RouteCatalogue).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CatalogueError {
    /// File I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON catalogue parse failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML catalogue parse failure.
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A router listed under `routes` has no entry under `mounts`.
    #[error("router '{router}' has no mount record; add it under `mounts`")]
    UnknownRouter {
        /// The router name without a mount.
        router: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const _: () = {
        const fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogueError>();
        assert_send_sync::<VersionError>();
    };

    #[test]
    fn unsupported_message_names_both_versions() {
        let err = VersionError::Unsupported {
            version: 2,
            earliest: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("API version 2"));
        assert!(msg.contains("since 4"));
    }
}
