//! Background search worker.
//!
//! Searches run on a dedicated thread that owns the [`Dictionary`]. Submitting a request
//! issues a new token, so any earlier request still queued or running becomes stale. The
//! worker drains its queue down to the newest request, skips work that went stale before it
//! started, and withholds results that went stale while running. Receivers additionally drop
//! any published result that has been superseded since.

use std::{
    sync::{Arc, Mutex, mpsc},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use tracing::{debug, trace};

use crate::{
    dictionary::Dictionary,
    entry::DictionaryEntry,
    error::IndexError,
    sequence::{RequestSequencer, RequestToken},
};

/// A queued search request.
struct SearchWork {
    /// Token issued at submission.
    token: RequestToken,
    /// Raw user term.
    term: String,
    /// Result limit.
    limit: usize,
}

/// The result of one search that was still current when it finished.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Token of the request that produced this result.
    pub token: RequestToken,
    /// Term as submitted.
    pub term: String,
    /// Search result or the storage failure.
    pub result: Result<Vec<DictionaryEntry>, IndexError>,
}

/// Runs searches off the calling thread, keeping only the newest request's results.
pub struct SearchWorker {
    /// Work queue; `None` once shutdown has started.
    work_tx: Option<mpsc::Sender<SearchWork>>,
    /// Published outcomes.
    result_rx: Mutex<mpsc::Receiver<SearchOutcome>>,
    /// Shared token source.
    sequencer: Arc<RequestSequencer>,
    /// Worker thread handle, joined on drop.
    handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    /// Moves `dictionary` onto a new worker thread.
    pub fn spawn(dictionary: Dictionary) -> Result<Self, IndexError> {
        let sequencer = Arc::new(RequestSequencer::new());
        let (work_tx, work_rx) = mpsc::channel::<SearchWork>();
        let (result_tx, result_rx) = mpsc::channel::<SearchOutcome>();

        let handle = {
            let sequencer = Arc::clone(&sequencer);
            thread::Builder::new()
                .name("glossa-search".into())
                .spawn(move || run_worker(dictionary, &work_rx, &result_tx, &sequencer))
                .map_err(IndexError::Worker)?
        };

        Ok(Self {
            work_tx: Some(work_tx),
            result_rx: Mutex::new(result_rx),
            sequencer,
            handle: Some(handle),
        })
    }

    /// Queues a search and returns its token. Every earlier request becomes stale.
    pub fn submit(&self, term: impl Into<String>, limit: usize) -> RequestToken {
        let token = self.sequencer.issue();
        if let Some(tx) = &self.work_tx {
            let work = SearchWork {
                token,
                term: term.into(),
                limit,
            };
            if tx.send(work).is_err() {
                debug!("search worker has exited; request dropped");
            }
        }
        token
    }

    /// Returns true if `token` belongs to the newest request.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.sequencer.is_current(token)
    }

    /// Makes all outstanding requests stale.
    pub fn invalidate(&self) {
        self.sequencer.invalidate();
    }

    /// Returns the next current outcome without blocking, discarding superseded ones.
    pub fn try_recv(&self) -> Option<SearchOutcome> {
        let rx = self.result_rx.lock().ok()?;
        while let Ok(outcome) = rx.try_recv() {
            if let Some(outcome) = self.keep_if_current(outcome) {
                return Some(outcome);
            }
        }
        None
    }

    /// Waits up to `timeout` for a current outcome, discarding superseded ones.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SearchOutcome> {
        let deadline = Instant::now() + timeout;
        let rx = self.result_rx.lock().ok()?;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let outcome = rx.recv_timeout(remaining).ok()?;
            if let Some(outcome) = self.keep_if_current(outcome) {
                return Some(outcome);
            }
        }
    }

    /// Filters out outcomes superseded after they were published.
    fn keep_if_current(&self, outcome: SearchOutcome) -> Option<SearchOutcome> {
        let token = outcome.token;
        let kept = self.sequencer.accept(token, outcome);
        if kept.is_none() {
            trace!(token = token.value(), "discarding superseded result");
        }
        kept
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        // Closing the queue ends the worker loop.
        drop(self.work_tx.take());
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            debug!("search worker panicked");
        }
    }
}

/// Worker loop: serve the newest queued request until the queue closes.
fn run_worker(
    mut dictionary: Dictionary,
    rx: &mpsc::Receiver<SearchWork>,
    tx: &mpsc::Sender<SearchOutcome>,
    sequencer: &RequestSequencer,
) {
    while let Ok(work) = rx.recv() {
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }

        if !sequencer.is_current(latest.token) {
            debug!(token = latest.token.value(), "skipping stale request");
            continue;
        }

        let result = dictionary.search(&latest.term, latest.limit);

        if !sequencer.is_current(latest.token) {
            debug!(token = latest.token.value(), "dropping result of stale request");
            continue;
        }

        let outcome = SearchOutcome {
            token: latest.token,
            term: latest.term,
            result,
        };
        if tx.send(outcome).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TestDataset, sample_rows};

    const WAIT: Duration = Duration::from_secs(10);

    fn worker() -> (TestDataset, SearchWorker) {
        let dataset = TestDataset::with_rows(&sample_rows());
        let worker = SearchWorker::spawn(Dictionary::new(dataset.path())).unwrap();
        (dataset, worker)
    }

    #[test]
    fn delivers_current_result() {
        let (_dataset, worker) = worker();

        let token = worker.submit("bank", 10);
        let outcome = worker.recv_timeout(WAIT).unwrap();

        assert_eq!(outcome.token, token);
        assert_eq!(outcome.term, "bank");
        let ids: Vec<i64> = outcome.result.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn only_newest_request_is_delivered() {
        let (_dataset, worker) = worker();

        worker.submit("b", 10);
        worker.submit("ba", 10);
        let newest = worker.submit("apple", 10);

        let outcome = worker.recv_timeout(WAIT).unwrap();
        assert_eq!(outcome.token, newest);
        assert_eq!(outcome.term, "apple");
        assert!(worker.is_current(outcome.token));
        assert!(worker.try_recv().is_none());
    }

    #[test]
    fn invalidated_requests_are_never_delivered() {
        let (_dataset, worker) = worker();

        worker.submit("bank", 10);
        worker.invalidate();

        assert!(worker.recv_timeout(Duration::from_millis(300)).is_none());
    }

    #[test]
    fn storage_errors_are_delivered_as_results() {
        let worker = SearchWorker::spawn(Dictionary::new("/definitely/not/here.sqlite")).unwrap();

        worker.submit("bank", 10);
        let outcome = worker.recv_timeout(WAIT).unwrap();

        assert!(matches!(
            outcome.result,
            Err(IndexError::DatasetNotFound { .. })
        ));
    }
}
