/// Domain interface for an image search service.
///
/// Implementations swallow their own failures: an unreachable service,
/// a rejected key or a malformed response all come back as an empty list.
pub trait ImageSearch: Send {
    /// Candidate image URLs for `query` on result page `page`, in service order.
    fn search(&self, query: &str, page: u32) -> Vec<String>;
}
