//! Async adapter over the core [`Debouncer`].
//!
//! Search input arrives on an mpsc channel, one message per keystroke.
//! [`DebouncedQueries::next`] waits until input has been quiet for the
//! configured interval and yields only the latest query.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use clientele_core::Debouncer;

/// Debounced stream of search queries.
#[derive(Debug)]
pub struct DebouncedQueries {
    input: mpsc::Receiver<String>,
    debouncer: Debouncer<String>,
    closed: bool,
}

impl DebouncedQueries {
    /// Wrap a receiver of raw query input.
    #[must_use]
    pub const fn new(input: mpsc::Receiver<String>, quiet: Duration) -> Self {
        Self {
            input,
            debouncer: Debouncer::new(quiet),
            closed: false,
        }
    }

    /// Create a sender/stream pair.
    #[must_use]
    pub fn channel(quiet: Duration, capacity: usize) -> (mpsc::Sender<String>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, Self::new(rx, quiet))
    }

    /// Next query after a quiet interval.
    ///
    /// When the input channel closes, a still-pending query is returned
    /// immediately; after that the stream yields `None`.
    pub async fn next(&mut self) -> Option<String> {
        loop {
            if self.closed {
                return self.debouncer.flush();
            }

            match self.debouncer.deadline() {
                Some(deadline) => {
                    tokio::select! {
                        received = self.input.recv() => self.accept(received),
                        () = tokio::time::sleep_until(Instant::from_std(deadline)) => {
                            if let Some(query) = self.debouncer.poll(Instant::now().into_std()) {
                                tracing::debug!(query = %query, "Search query settled");
                                return Some(query);
                            }
                        }
                    }
                }
                None => {
                    let received = self.input.recv().await;
                    self.accept(received);
                }
            }
        }
    }

    fn accept(&mut self, received: Option<String>) {
        match received {
            Some(query) => self.debouncer.push(query, Instant::now().into_std()),
            None => self.closed = true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_burst_yields_last_query_only() {
        let (tx, mut queries) = DebouncedQueries::channel(QUIET, 16);

        let typing = tokio::spawn(async move {
            for partial in ["j", "jo", "joh", "john"] {
                tx.send(partial.to_string()).await.unwrap();
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        });

        let started = Instant::now();
        assert_eq!(queries.next().await.as_deref(), Some("john"));
        // last keystroke at 150ms, settles 300ms later
        assert!(started.elapsed() >= Duration::from_millis(450));

        typing.await.unwrap();
        assert_eq!(queries.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_split_bursts() {
        let (tx, mut queries) = DebouncedQueries::channel(QUIET, 16);

        tokio::spawn(async move {
            tx.send("ja".to_string()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(500)).await;
            tx.send("jan".to_string()).await.unwrap();
            tx.send("jane".to_string()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(500)).await;
        });

        assert_eq!(queries.next().await.as_deref(), Some("ja"));
        assert_eq!(queries.next().await.as_deref(), Some("jane"));
        assert_eq!(queries.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_flushes_pending_query() {
        let (tx, mut queries) = DebouncedQueries::channel(QUIET, 16);

        tx.send("smith".to_string()).await.unwrap();
        drop(tx);

        let started = Instant::now();
        assert_eq!(queries.next().await.as_deref(), Some("smith"));
        assert!(started.elapsed() < QUIET);
        assert_eq!(queries.next().await, None);
    }
}
