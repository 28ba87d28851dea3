use std::future::Future;

use crate::video::VideoRecord;

/// Read access to the persisted video set.
///
/// The pipeline always operates on the full record set for a run (no
/// filtering, no pagination), ordered ascending by publish time;
/// implementations must return records in that order. Implemented by the
/// Postgres store in `vidwatch-db` and by in-memory fakes in tests.
pub trait VideoStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch every persisted video, ordered ascending by `published_at`.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<VideoRecord>, Self::Error>> + Send;
}
