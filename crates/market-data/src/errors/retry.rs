/// Classification for retry policy.
///
/// Used by the request orchestrator to decide whether a failed attempt is
/// worth repeating.
///
/// | Class | Retried? |
/// |-------|----------|
/// | `WithBackoff` | Yes, after an exponential backoff delay |
/// | `Never` | No, the failure is returned to the caller |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry. The server answered (error status, error body, missing
    /// data) or the request itself was invalid.
    Never,

    /// Retry with exponential backoff.
    ///
    /// Used for connection failures and timeouts, where the request never
    /// got a usable answer.
    WithBackoff,
}
