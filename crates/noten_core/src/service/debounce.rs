//! Trailing-edge debouncer backed by one worker thread.
//!
//! # Invariants
//! - At most one pending value exists; each `submit` replaces it and re-arms
//!   the quiet period.
//! - The sink runs once per quiet period, with the last submitted value.
//! - Dropping the debouncer delivers any pending value before returning.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use log::warn;
use std::thread::{self, JoinHandle};
use std::time::Duration;

enum Command<T> {
    Submit(T),
    Flush(Sender<()>),
    Cancel(Sender<()>),
}

/// Delays delivery of values to a sink until submissions go quiet.
pub struct Debouncer<T: Send + 'static> {
    sender: Option<Sender<Command<T>>>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the worker. `sink` runs on the worker thread.
    pub fn new<F>(quiet_period: Duration, sink: F) -> std::io::Result<Self>
    where
        F: FnMut(T) + Send + 'static,
    {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let worker = thread::Builder::new()
            .name("noten-debounce".to_string())
            .spawn(move || run_worker(receiver, quiet_period, sink))?;
        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Replaces the pending value and restarts the quiet period.
    pub fn submit(&self, value: T) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(Command::Submit(value)).is_err() {
            warn!("event=debounce_submit module=service status=error error_code=worker_gone");
        }
    }

    /// Delivers the pending value now and waits until the sink returns.
    pub fn flush(&self) {
        self.round_trip(Command::Flush);
    }

    /// Discards the pending value without delivering it.
    ///
    /// Returns once the worker is idle, so the caller may write the same
    /// target without racing a delivery.
    pub fn cancel(&self) {
        self.round_trip(Command::Cancel);
    }

    fn round_trip(&self, command: fn(Sender<()>) -> Command<T>) {
        let Some(sender) = &self.sender else {
            return;
        };
        let (ack_sender, ack_receiver) = crossbeam_channel::bounded(1);
        if sender.send(command(ack_sender)).is_ok() {
            let _ = ack_receiver.recv();
        }
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        // Closing the channel makes the worker deliver and exit.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!(
                    "event=debounce_shutdown module=service status=error error_code=worker_panicked"
                );
            }
        }
    }
}

fn run_worker<T, F>(receiver: Receiver<Command<T>>, quiet_period: Duration, mut sink: F)
where
    F: FnMut(T),
{
    let mut pending: Option<T> = None;
    loop {
        let next = if pending.is_some() {
            receiver.recv_timeout(quiet_period)
        } else {
            receiver.recv().map_err(|_| RecvTimeoutError::Disconnected)
        };

        match next {
            Ok(Command::Submit(value)) => pending = Some(value),
            Ok(Command::Flush(ack)) => {
                if let Some(value) = pending.take() {
                    sink(value);
                }
                let _ = ack.send(());
            }
            Ok(Command::Cancel(ack)) => {
                pending = None;
                let _ = ack.send(());
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(value) = pending.take() {
                    sink(value);
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                if let Some(value) = pending.take() {
                    sink(value);
                }
                break;
            }
        }
    }
}
