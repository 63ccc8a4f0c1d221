use kpp_core::state;

/// Errors returned to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested speaker arrangement is not one input and one matching output.
    #[error("unsupported speaker arrangement")]
    UnsupportedArrangement,

    /// Activation was requested before `setup_processing`.
    #[error("processing was never set up")]
    NotSetUp,

    /// The call is not allowed while processing is active.
    #[error("not allowed while active")]
    Active,

    /// `process` was called while inactive.
    #[error("processor is not active")]
    NotActive,

    /// The block is longer than the maximum given to `setup_processing`.
    #[error("block of {0} samples exceeds the negotiated maximum")]
    BlockTooLarge(usize),

    /// Persisted state could not be read.
    #[error(transparent)]
    State(#[from] state::Error),
}
