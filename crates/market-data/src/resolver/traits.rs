//! Resolution traits for region text.

/// Individual resolver in the country resolution chain.
///
/// Resolvers are tried in order until one returns a code. Returning `None`
/// means this resolver does not recognize the text and the chain moves on.
/// Implementations are pure: no I/O, no panics.
pub trait RegionResolver: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Resolve normalized region text (lowercase, single-spaced, trimmed)
    /// to an ISO 3166-1 alpha-2 code.
    fn resolve(&self, normalized: &str) -> Option<&'static str>;
}
