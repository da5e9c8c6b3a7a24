//! Flow-control handles and the controllable stream wrapper.

use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::types::StreamOf;

/// Requests the producer cease further increments. Advisory: increments
/// already in flight may still be observed, and stream completion remains
/// the only authoritative end signal.
#[derive(Clone, Debug)]
pub struct StopHandle {
    token: CancellationToken,
}

impl StopHandle {
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Holds increment delivery until a matching resume.
#[derive(Clone, Debug)]
pub struct PauseHandle {
    gate: Arc<watch::Sender<bool>>,
}

impl PauseHandle {
    pub fn pause(&self) {
        let _ = self.gate.send(true);
    }
}

/// Releases a pause.
#[derive(Clone, Debug)]
pub struct ResumeHandle {
    gate: Arc<watch::Sender<bool>>,
}

impl ResumeHandle {
    pub fn resume(&self) {
        let _ = self.gate.send(false);
    }
}

/// Wrap a stream with all three flow-control capabilities.
///
/// Delivery holds while paused; a stop request wins over a pause and ends
/// the wrapped stream at the next pull.
pub fn controllable<T, S>(inner: S) -> StreamOf<T>
where
    T: Send + 'static,
    S: Stream<Item = T> + Send + 'static,
{
    let token = CancellationToken::new();
    let (gate, mut paused) = watch::channel(false);
    let gate = Arc::new(gate);

    let stop = StopHandle {
        token: token.clone(),
    };
    let pause = PauseHandle { gate: gate.clone() };
    let resume = ResumeHandle { gate };

    let mut inner = Box::pin(inner);
    let stream = async_stream::stream! {
        loop {
            // Hold while paused; stop still wins during a pause.
            loop {
                if !*paused.borrow() {
                    break;
                }
                tokio::select! {
                    _ = token.cancelled() => return,
                    changed = paused.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }

            tokio::select! {
                _ = token.cancelled() => break,
                item = inner.next() => {
                    let Some(item) = item else { break };
                    yield item;
                }
            }
        }
    };

    StreamOf {
        stream: Box::pin(stream),
        stop: Some(stop),
        pause: Some(pause),
        resume: Some(resume),
    }
}
