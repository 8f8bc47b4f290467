//! Trailing-edge coalescing of bursty UI events.
//!
//! Only the last event of a burst is dispatched, once no newer event has
//! arrived for the quiet period. Cancelling drops the pending event.
//!
//! [`Coalescer`] is the clock-injected state machine. The engine itself is
//! single-threaded: [`SchedulerView`](crate::view::SchedulerView) owns two
//! coalescers and dispatches them from the caller's clock via `tick`, so no
//! handler ever runs concurrently with a query.
//!
//! [`CoalescedDispatcher`] is a host-side adapter for embedders without an
//! event loop to call `tick` from. It drives a coalescer on a worker thread,
//! using the channel receive timeout as its timer, and runs the handler there.
//! The handler must hand the event back to whichever thread owns the view
//! (e.g. over a channel); the view is never shared with the worker.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Identifies one buffered event; stale once a newer event or a cancel arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelToken {
    generation: u64,
}

#[derive(Debug)]
pub struct Coalescer<E> {
    quiet: Duration,
    pending: Option<(E, Instant)>,
    generation: u64,
}

impl<E> Coalescer<E> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            generation: 0,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Buffer `event`, superseding any pending one.
    pub fn push(&mut self, event: E, now: Instant) -> CancelToken {
        self.generation += 1;
        self.pending = Some((event, now));
        CancelToken {
            generation: self.generation,
        }
    }

    /// Drop the pending event. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        self.pending.take().is_some()
    }

    pub fn is_current(&self, token: CancelToken) -> bool {
        self.pending.is_some() && token.generation == self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending event becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.quiet)
    }

    /// Take the pending event if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<E> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.pending.take().map(|(event, _)| event),
            _ => None,
        }
    }
}

enum Signal<E> {
    Event(E),
    Cancel,
    Shutdown,
}

/// Host-side adapter: runs a handler on the trailing event of each burst, on a
/// worker thread. Not used by the engine.
pub struct CoalescedDispatcher<E: Send + 'static> {
    tx: Sender<Signal<E>>,
    worker: Option<JoinHandle<()>>,
}

impl<E: Send + 'static> CoalescedDispatcher<E> {
    pub fn spawn<F>(quiet: Duration, mut handler: F) -> Self
    where
        F: FnMut(E) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Signal<E>>();
        let worker = thread::spawn(move || {
            let mut coalescer = Coalescer::new(quiet);
            loop {
                let signal = match coalescer.deadline() {
                    Some(deadline) => {
                        let timeout = deadline.saturating_duration_since(Instant::now());
                        match rx.recv_timeout(timeout) {
                            Ok(signal) => Some(signal),
                            Err(RecvTimeoutError::Timeout) => None,
                            Err(RecvTimeoutError::Disconnected) => break,
                        }
                    }
                    None => match rx.recv() {
                        Ok(signal) => Some(signal),
                        Err(_) => break,
                    },
                };
                match signal {
                    Some(Signal::Event(event)) => {
                        coalescer.push(event, Instant::now());
                    }
                    Some(Signal::Cancel) => {
                        coalescer.cancel();
                    }
                    Some(Signal::Shutdown) => break,
                    None => {}
                }
                if let Some(event) = coalescer.poll(Instant::now()) {
                    handler(event);
                }
            }
        });
        Self {
            tx,
            worker: Some(worker),
        }
    }

    pub fn send(&self, event: E) {
        // The worker only exits on drop, so a send error cannot be observed here
        let _ = self.tx.send(Signal::Event(event));
    }

    pub fn cancel(&self) {
        let _ = self.tx.send(Signal::Cancel);
    }
}

impl<E: Send + 'static> Drop for CoalescedDispatcher<E> {
    fn drop(&mut self) {
        let _ = self.tx.send(Signal::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
