//! Background departure queries.
//!
//! A board refresh is one unit of work: it runs the whole
//! retrieve→filter→sort→enrich→format pipeline off the caller's context,
//! reports coarse progress as it moves across stops, and can be cancelled
//! between stops. One task per engine at a time — callers serialize by
//! cancelling the in-flight task and spawning a new one when the input
//! changes, never by overlapping two.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::domain::{Moment, StopId};
use crate::engine::{Departure, DepartureQueryEngine, DepartureWindow, QueryError};
use crate::store::TransitStore;

/// Errors from a background board task.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The task was cancelled between stop iterations.
    #[error("departure query cancelled")]
    Cancelled,

    /// The underlying query failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The blocking task died before producing a result.
    #[error("background task failed: {0}")]
    Join(String),
}

/// Cheap cloneable cancellation flag.
///
/// Cancelling is cooperative: the running task observes the flag between
/// stop iterations and bails out. Everything it holds (including its
/// reference to the store) is released by ordinary drop on that path, so
/// no half-open handle survives a cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A spawned board refresh.
pub struct BoardTask {
    handle: tokio::task::JoinHandle<Result<Option<Vec<Departure>>, TaskError>>,
    cancel: CancelToken,
    progress: watch::Receiver<u8>,
}

impl BoardTask {
    /// Run a multi-stop board query on the blocking pool.
    ///
    /// Stops are processed in order, each through the single-stop query
    /// (so the per-stop cap applies stop by stop), and the surviving
    /// departures are merged into one chronological sequence. Progress
    /// 0–100 is published after each stop.
    pub fn spawn<S>(
        engine: Arc<DepartureQueryEngine<S>>,
        now: Moment,
        stops: Vec<StopId>,
        early_morning: bool,
    ) -> Self
    where
        S: TransitStore + Send + Sync + 'static,
    {
        let (progress_tx, progress_rx) = watch::channel(0u8);
        let cancel = CancelToken::new();
        let token = cancel.clone();

        let handle = tokio::task::spawn_blocking(move || {
            run_board(&engine, &now, &stops, early_morning, &token, &progress_tx)
        });

        Self {
            handle,
            cancel,
            progress: progress_rx,
        }
    }

    /// Token for cancelling this task.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Progress receiver; the latest value is the percentage of stops
    /// processed.
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress.clone()
    }

    /// Wait for the result.
    pub async fn join(self) -> Result<Option<Vec<Departure>>, TaskError> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(TaskError::Cancelled),
            Err(err) => Err(TaskError::Join(err.to_string())),
        }
    }
}

fn run_board<S: TransitStore>(
    engine: &DepartureQueryEngine<S>,
    now: &Moment,
    stops: &[StopId],
    early_morning: bool,
    token: &CancelToken,
    progress: &watch::Sender<u8>,
) -> Result<Option<Vec<Departure>>, TaskError> {
    if stops.is_empty() {
        return Err(QueryError::EmptyStops.into());
    }

    let mut merged: Vec<Departure> = Vec::new();
    let mut any_rows = false;

    for (done, stop) in stops.iter().enumerate() {
        if token.is_cancelled() {
            return Err(TaskError::Cancelled);
        }

        if let Some(mut board) = engine.next_departures(now, stop, early_morning)? {
            any_rows = true;
            merged.append(&mut board);
        }

        let pct = (((done + 1) * 100) / stops.len()) as u8;
        let _ = progress.send(pct);
    }

    if !any_rows {
        return Ok(None);
    }

    // Each stop's board is already sorted; re-anchor the merged list so
    // the whole sequence is chronological.
    let window = DepartureWindow::for_moment(
        now,
        engine.config().look_ahead_hours,
        early_morning,
    )
    .map_err(QueryError::from)?;
    merged.sort_by_key(|d| d.departure.seconds_after(window.anchor_secs()));

    Ok(Some(merged))
}
