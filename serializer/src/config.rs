//! Configuration for decoding sequences.

/// Controls how a [crate::Registry] decodes an encoded sequence.
///
/// The default is lenient: bytes left over after the requested frames are ignored (a stream
/// may carry more values than the caller chose to decode) and payloads are unbounded.
///
/// # Examples
///
/// ```
/// use commonware_serializer::Config;
///
/// let cfg = Config::default();
/// assert!(!cfg.strict);
/// assert_eq!(cfg.max_payload, None);
///
/// // Reject trailing bytes and payloads larger than 1 KiB
/// let cfg = Config::strict().with_max_payload(1024);
/// assert!(cfg.strict);
/// assert_eq!(cfg.max_payload, Some(1024));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Config {
    /// Whether bytes remaining after the last requested frame are an error.
    pub strict: bool,

    /// The largest payload (in bytes) accepted in any frame.
    pub max_payload: Option<u64>,
}

impl Config {
    /// Returns a configuration that requires the whole buffer to be consumed.
    pub const fn strict() -> Self {
        Self {
            strict: true,
            max_payload: None,
        }
    }

    /// Bounds the length of any single payload.
    pub const fn with_max_payload(mut self, max: u64) -> Self {
        self.max_payload = Some(max);
        self
    }
}
