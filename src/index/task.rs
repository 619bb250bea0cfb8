//! Background polygon scans on the tokio blocking pool.
//!
//! High-precision scans over large polygons can take a while, so they run on
//! a blocking worker and can be cancelled through a [`CancellationToken`].
//! Cancellation stops the scan between cells and discards partial work.

use super::polygon::polygon_hashes_cancellable;
use super::{EnumerateOptions, GeohashSet};
use crate::error::{GeocellError, Result};
use geocells_types::Polygon;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to a running polygon scan.
///
/// Dropping the handle detaches the worker; call [`PolygonHashTask::cancel`]
/// first to stop it.
#[derive(Debug)]
pub struct PolygonHashTask {
    handle: JoinHandle<Result<GeohashSet>>,
    token: CancellationToken,
}

impl PolygonHashTask {
    /// Ask the worker to stop. `join` then resolves to `Cancelled` unless the
    /// scan had already finished.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// A token sharing this task's cancellation state.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Wait for the scan to complete.
    pub async fn join(self) -> Result<GeohashSet> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(GeocellError::Cancelled),
            Err(e) => Err(GeocellError::Task(e.to_string())),
        }
    }
}

/// Start a polygon scan on the blocking pool. Must be called from within a
/// tokio runtime.
///
/// # Examples
///
/// ```rust
/// use geocells::{Polygon, index::{EnumerateOptions, spawn_polygon_hashes}};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let square = Polygon::from_lon_lat_pairs(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
/// let task = spawn_polygon_hashes(square, 4, EnumerateOptions::default(), None);
/// let cells = task.join().await?;
/// assert!(!cells.is_empty());
/// # Ok::<(), geocells::GeocellError>(())
/// # }).unwrap();
/// ```
pub fn spawn_polygon_hashes(
    polygon: Polygon,
    precision: usize,
    options: EnumerateOptions,
    token: Option<CancellationToken>,
) -> PolygonHashTask {
    let token = token.unwrap_or_default();
    let worker_token = token.clone();
    let handle = tokio::task::spawn_blocking(move || {
        polygon_hashes_cancellable(&polygon, precision, &options, || {
            worker_token.is_cancelled()
        })
    });
    PolygonHashTask { handle, token }
}

/// Run [`super::polygon_hashes`] off the calling task and await the result.
pub async fn polygon_hashes_async(polygon: Polygon, precision: usize) -> Result<GeohashSet> {
    spawn_polygon_hashes(polygon, precision, EnumerateOptions::default(), None)
        .join()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::polygon_hashes;

    fn square() -> Polygon {
        Polygon::from_lon_lat_pairs(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]])
    }

    #[tokio::test]
    async fn test_async_matches_sync() {
        let expected = polygon_hashes(&square(), 4).unwrap();
        let actual = polygon_hashes_async(square(), 4).await.unwrap();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_pre_cancelled_token() {
        let token = CancellationToken::new();
        token.cancel();
        let task = spawn_polygon_hashes(square(), 4, EnumerateOptions::default(), Some(token));
        assert!(task.is_cancelled());
        assert!(matches!(task.join().await, Err(GeocellError::Cancelled)));
    }

    #[tokio::test]
    async fn test_validation_errors_surface_through_join() {
        let line = Polygon::from_lon_lat_pairs(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
        let task = spawn_polygon_hashes(line, 4, EnumerateOptions::default(), None);
        assert!(task.join().await.unwrap_err().is_invalid_argument());
    }
}
