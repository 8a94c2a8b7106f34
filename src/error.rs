//! Error types for route-audio.
//!
//! Routing operations are best-effort and never return errors to the
//! caller: a missing session or a missing device degrades to a silent no-op
//! (with a trace of the fact). Errors exist at two edges only:
//!
//! - [`EngineError`]: raised by [`RoutingEngine`](crate::RoutingEngine)
//!   implementations; the routing worker logs and swallows these.
//! - [`RouteAudioError`]: construction-time failures from
//!   [`AudioRoutingBuilder::build()`](crate::AudioRoutingBuilder::build).

/// Errors produced by a routing engine implementation.
///
/// The manager never propagates these to its callers; they are logged on
/// the designated routing context and the operation is dropped.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The underlying platform backend failed.
    #[error("engine backend error: {0}")]
    Backend(String),

    /// A lifecycle or selection call arrived before `start`.
    #[error("engine is not started")]
    NotStarted,

    /// The requested device disappeared between enumeration and selection.
    #[error("device no longer available: {name}")]
    DeviceGone {
        /// Name of the device that disappeared.
        name: String,
    },
}

impl EngineError {
    /// Creates a backend error with the given message.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Fatal errors that prevent a routing manager from being built.
#[derive(Debug, thiserror::Error)]
pub enum RouteAudioError {
    /// No engine factory was configured on the builder.
    #[error("no engine factory configured - call engine_factory() before build()")]
    NoEngineConfigured,

    /// The designated worker thread could not be spawned.
    #[error("failed to spawn routing worker thread")]
    WorkerSpawnFailed(#[source] std::io::Error),
}
