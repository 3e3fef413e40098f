/// Maximum number of results returned by catalog search
pub const SEARCH_RESULT_LIMIT: i64 = 50;

/// Minimum query length before a search is issued.
/// Shorter queries are treated as "clear results" and never hit the store.
pub const MIN_SEARCH_QUERY_LEN: usize = 2;

/// Maximum number of image files accepted by a single upload request,
/// matching the per-item image cap enforced on the item DTOs
pub const MAX_UPLOAD_FILES: usize = 10;
