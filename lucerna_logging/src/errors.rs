use lucerna::{ResolveError, TypeInfo};

/// The errors raised by the logging integration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoggerError {
    /// A logger was needed, but no [`LoggerFactory`](crate::LoggerFactory)
    /// is registered.
    #[error(
        "No `LoggerFactory` is registered: the logger for category `{category}`, needed by `{requester}`, cannot be created. Register a logging backend (e.g. by installing a backend extension) before building the registry."
    )]
    MissingBackend {
        /// The category of the logger that could not be created.
        category: String,
        /// The service the logger was being created for.
        requester: TypeInfo,
        #[source]
        source: ResolveError,
    },
}
