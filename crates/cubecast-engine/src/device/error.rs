/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the frame must be drawn again.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// Errors that end the program.
#[derive(Debug, thiserror::Error)]
pub enum GraphicsError {
    /// No surface, adapter or device could be obtained for the window.
    #[error("graphics context unavailable: {reason}")]
    Unavailable { reason: String },

    /// The surface reported an unrecoverable error while presenting.
    #[error("surface lost beyond recovery")]
    SurfaceFatal,
}

impl GraphicsError {
    /// Wraps an acquisition failure, keeping the full context chain in the message.
    pub fn unavailable(err: &anyhow::Error) -> Self {
        Self::Unavailable {
            reason: format!("{err:#}"),
        }
    }
}
