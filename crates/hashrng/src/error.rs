use alloc::string::String;

/// A result type defaulting to this crate's [`Error`].
///
/// Most `hashrng` APIs are infallible. Only seeding and the bounded samplers
/// can fail.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `hashrng` can emit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The operating system's entropy source failed or returned fewer bytes
    /// than requested.
    ///
    /// There is no safe fallback seed. The global reader aborts the process
    /// when it sees this error; [`HashReader::new`] hands it to the caller.
    ///
    /// [`HashReader::new`]: crate::HashReader::new
    #[error("entropy source unavailable: {reason}")]
    EntropyUnavailable {
        /// What the entropy source reported.
        reason: String,
    },

    /// A caller-supplied argument is out of range, such as a zero bound
    /// passed to [`Sampler::intn`].
    ///
    /// [`Sampler::intn`]: crate::Sampler::intn
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Which argument was rejected.
        reason: &'static str,
    },
}
