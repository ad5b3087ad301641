//! Error types for the simulation core.

use thiserror::Error;

/// Failures that cross the simulation boundary.
///
/// Out-of-bounds edits are not represented here: they are clipped
/// texel by texel and never reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Grid, framebuffer or shader program could not be created
    #[error("Resource creation failed: {0}")]
    ResourceCreation(String),

    /// The rule kernel failed to run for a tick
    #[error("Kernel execution failed: {0}")]
    KernelExecution(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::ResourceCreation(msg.into())
    }

    pub fn kernel(msg: impl Into<String>) -> Self {
        Self::KernelExecution(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the host loop should keep running after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::KernelExecution(_))
    }
}
