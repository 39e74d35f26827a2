//! Error type for the effects engine.
//!
//! Nothing in this crate is allowed to take the host page down. Internals
//! propagate `FxError` with `?`; the public engine operations catch it at
//! their boundary, log it and degrade to "no effect".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FxError {
    /// The host has no usable audio platform (or refused to open one).
    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),

    /// A single audio node could not be created.
    #[error("failed to create {kind} node: {reason}")]
    NodeCreation { kind: &'static str, reason: String },

    /// No 2D drawing context could be obtained.
    #[error("drawing surface unavailable")]
    SurfaceUnavailable,

    /// The preference store rejected a read or write.
    #[error("preference storage: {0}")]
    Storage(String),
}

pub type FxResult<T> = Result<T, FxError>;
