//! Query timing metrics.

use metrics::histogram;
use std::time::Instant;

/// Times one database operation and records it to the
/// `database_query_duration_seconds` histogram, labelled by query name.
///
/// ```ignore
/// let timer = QueryTimer::new("find_service_by_id");
/// let result = sqlx::query_as(...).fetch_optional(&pool).await;
/// timer.record();
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        histogram!("database_query_duration_seconds", "query" => self.query_name)
            .record(self.start.elapsed().as_secs_f64());
    }
}
