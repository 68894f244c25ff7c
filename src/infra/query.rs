//! Query instrumentation: latency measurement, concurrent and batched execution.

use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{SLOW_QUERY_THRESHOLD_MS, SLOW_QUERY_TIER_MS, VERY_SLOW_QUERY_TIER_MS};

/// Timing captured around one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPerformance {
    /// Elapsed milliseconds
    pub duration: f64,
    /// Wall-clock start of the query
    pub timestamp: DateTime<Utc>,
}

/// Query output together with its timing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timed<T> {
    pub data: T,
    pub performance: QueryPerformance,
}

impl<T> Timed<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Classification of a query duration against a threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAssessment {
    pub is_acceptable: bool,
    pub warning: Option<String>,
    pub recommendation: Option<String>,
}

/// Await `query` and record how long it took.
///
/// Slow queries are logged with a recommendation. A failure is logged with the
/// elapsed time and returned unchanged.
pub async fn with_query_performance<T, E, F>(query_name: &str, query: F) -> Result<Timed<T>, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let timestamp = Utc::now();
    let start = Instant::now();

    let outcome = query.await;
    let duration = start.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        Ok(data) => {
            if duration > SLOW_QUERY_THRESHOLD_MS {
                let assessment = validate_query_performance(duration);
                tracing::warn!(
                    query = query_name,
                    duration_ms = %format!("{:.2}", duration),
                    recommendation = assessment.recommendation.as_deref().unwrap_or_default(),
                    "Slow query detected"
                );
            } else {
                tracing::debug!(query = query_name, duration_ms = duration, "Query completed");
            }

            Ok(Timed {
                data,
                performance: QueryPerformance { duration, timestamp },
            })
        }
        Err(e) => {
            tracing::error!(
                query = query_name,
                duration_ms = %format!("{:.2}", duration),
                error = %e,
                "Query failed"
            );
            Err(e)
        }
    }
}

/// Classify a duration against the default slow-query threshold
pub fn validate_query_performance(duration: f64) -> PerformanceAssessment {
    validate_query_performance_against(duration, SLOW_QUERY_THRESHOLD_MS)
}

/// Classify a duration (milliseconds) against `threshold`.
///
/// A duration equal to the threshold is still acceptable.
pub fn validate_query_performance_against(duration: f64, threshold: f64) -> PerformanceAssessment {
    if duration <= threshold {
        return PerformanceAssessment {
            is_acceptable: true,
            warning: None,
            recommendation: None,
        };
    }

    let recommendation = if duration > VERY_SLOW_QUERY_TIER_MS {
        "Query is very slow. Consider query optimization or caching"
    } else if duration > SLOW_QUERY_TIER_MS {
        "Query is slow. Consider adding indexes or reducing data fetched"
    } else {
        "Consider adding database indexes"
    };

    PerformanceAssessment {
        is_acceptable: false,
        warning: Some(format!("Query took {:.2}ms (threshold: {}ms)", duration, threshold)),
        recommendation: Some(recommendation.to_string()),
    }
}

/// Concurrent execution of independent queries.
pub mod parallel {
    use std::future::Future;

    use futures::future::try_join_all;
    use tokio::try_join;

    /// Run two independent operations concurrently.
    ///
    /// # Example
    /// ```ignore
    /// let (total, rows) = parallel::join2(repo.count(), repo.find_page(params)).await?;
    /// ```
    pub async fn join2<F1, F2, T1, T2, E>(f1: F1, f2: F2) -> Result<(T1, T2), E>
    where
        F1: Future<Output = Result<T1, E>>,
        F2: Future<Output = Result<T2, E>>,
    {
        try_join!(f1, f2)
    }

    /// Run all queries concurrently.
    ///
    /// Outputs keep the input order. The first failure is returned and the
    /// remaining queries are dropped.
    pub async fn execute_parallel_queries<I, F, T, E>(queries: I) -> Result<Vec<T>, E>
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = Result<T, E>>,
    {
        try_join_all(queries).await
    }
}

/// Sequential processing of large inputs in fixed-size chunks.
pub mod batch {
    use std::future::Future;
    use std::num::NonZeroUsize;

    use crate::errors::{codes, AppError, AppResult};

    /// Convert a plain count into a batch size
    pub fn batch_size(size: usize) -> AppResult<NonZeroUsize> {
        NonZeroUsize::new(size).ok_or_else(|| {
            AppError::validation("Batch size must be greater than 0")
                .with_code(codes::INVALID_BATCH_SIZE)
                .with_detail("providedValue", size)
        })
    }

    /// Split `items` into consecutive chunks of at most `batch_size` and run
    /// `process_batch` on each, one chunk at a time.
    ///
    /// Results are concatenated in chunk order. Processing stops at the first
    /// failing chunk. Empty input never calls `process_batch`.
    pub async fn batch_process<T, R, E, F, Fut>(
        items: Vec<T>,
        batch_size: NonZeroUsize,
        mut process_batch: F,
    ) -> Result<Vec<R>, E>
    where
        F: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = Result<Vec<R>, E>>,
    {
        let mut results = Vec::with_capacity(items.len());
        let mut remaining = items;

        while !remaining.is_empty() {
            let drain_count = std::cmp::min(batch_size.get(), remaining.len());
            let chunk: Vec<T> = remaining.drain(..drain_count).collect();

            results.extend(process_batch(chunk).await?);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_assessment_tiers() {
        let fast = validate_query_performance(50.0);
        assert!(fast.is_acceptable);
        assert!(fast.warning.is_none());

        let edge = validate_query_performance(100.0);
        assert!(edge.is_acceptable);

        let slow = validate_query_performance(150.0);
        assert!(!slow.is_acceptable);
        assert_eq!(slow.warning.as_deref(), Some("Query took 150.00ms (threshold: 100ms)"));
        assert!(slow.recommendation.unwrap().contains("indexes"));

        let slower = validate_query_performance(600.0);
        assert!(slower.recommendation.unwrap().starts_with("Query is slow"));

        let slowest = validate_query_performance(1500.0);
        assert!(slowest.recommendation.unwrap().contains("caching"));
    }

    #[test]
    fn test_custom_threshold() {
        assert!(validate_query_performance_against(150.0, 200.0).is_acceptable);
        assert!(!validate_query_performance_against(250.0, 200.0).is_acceptable);
    }

    #[tokio::test]
    async fn test_with_query_performance_success() {
        let timed = with_query_performance("test.fetch", async { Ok::<_, String>(vec![1, 2]) })
            .await
            .unwrap();

        assert_eq!(timed.data, vec![1, 2]);
        assert!(timed.performance.duration >= 0.0);
        assert!(timed.performance.timestamp <= Utc::now());
    }

    #[tokio::test]
    async fn test_with_query_performance_passes_error_through() {
        let err = with_query_performance("test.fail", async { Err::<(), _>("connection lost") })
            .await
            .unwrap_err();

        assert_eq!(err, "connection lost");
    }

    #[tokio::test]
    async fn test_parallel_keeps_input_order() {
        let queries = (0..4u64).map(|i| async move {
            tokio::time::sleep(Duration::from_millis(20 - i * 5)).await;
            Ok::<_, String>(i)
        });

        let results = parallel::execute_parallel_queries(queries).await.unwrap();
        assert_eq!(results, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_parallel_fails_fast() {
        let queries: Vec<std::pin::Pin<Box<dyn Future<Output = Result<i32, String>> + Send>>> = vec![
            Box::pin(async { Ok(1) }),
            Box::pin(async { Err("second failed".to_string()) }),
            Box::pin(async { Ok(3) }),
        ];

        let err = parallel::execute_parallel_queries(queries).await.unwrap_err();
        assert_eq!(err, "second failed");
    }

    #[tokio::test]
    async fn test_join2() {
        let (a, b) = parallel::join2(async { Ok::<_, String>(1) }, async { Ok("two") })
            .await
            .unwrap();
        assert_eq!((a, b), (1, "two"));
    }

    #[tokio::test]
    async fn test_batch_process_chunks_in_order() {
        let mut seen = Vec::new();
        let results = batch::batch_process(
            (1..=7).collect::<Vec<i32>>(),
            batch::batch_size(3).unwrap(),
            |chunk| {
                seen.push(chunk.len());
                async move { Ok::<_, String>(chunk.into_iter().map(|x| x * 10).collect::<Vec<i32>>()) }
            },
        )
        .await
        .unwrap();

        assert_eq!(results, vec![10, 20, 30, 40, 50, 60, 70]);
        assert_eq!(seen, vec![3, 3, 1]);
    }

    #[tokio::test]
    async fn test_batch_process_empty_input() {
        let mut calls = 0;
        let results: Vec<i32> = batch::batch_process(Vec::<i32>::new(), batch::batch_size(5).unwrap(), |_| {
            calls += 1;
            async { Ok::<_, String>(Vec::new()) }
        })
        .await
        .unwrap();

        assert!(results.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = batch::batch_size(0).unwrap_err();
        assert_eq!(err.code(), crate::errors::codes::INVALID_BATCH_SIZE);
        assert_eq!(err.status_code(), 400);
    }
}
