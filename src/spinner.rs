use std::io::Write;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use log::{trace, warn};

pub const SPINNER_GLYPHS: [char; 4] = ['|', '/', '-', '\\'];
pub const SPINNER_LABEL: &str = "Analyzing with Ollama...";
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal progress indicator that redraws one line until stopped.
pub struct Spinner {
    interval: Duration,
}

/// A running spinner. Call [`SpinnerHandle::stop`] to halt it; dropping the
/// handle stops it too.
pub struct SpinnerHandle {
    done_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Default for Spinner {
    fn default() -> Self {
        Spinner::new(DEFAULT_INTERVAL)
    }
}

impl Spinner {
    pub fn new(interval: Duration) -> Self {
        Spinner { interval }
    }

    /// Spawns the redraw loop writing frames to `out`.
    pub fn start<W>(&self, mut out: W) -> SpinnerHandle
    where
        W: Write + Send + 'static,
    {
        // zero capacity: the stopping side blocks until the loop takes the signal
        let (done_tx, done_rx) = bounded::<()>(0);
        let interval = self.interval;

        let thread = thread::spawn(move || {
            let mut i = 0;
            loop {
                if let Err(e) = write!(out, "\r{} {} ", SPINNER_LABEL, SPINNER_GLYPHS[i])
                    .and_then(|_| out.flush())
                {
                    trace!("Spinner frame not written: {}", e);
                }
                i = (i + 1) % SPINNER_GLYPHS.len();

                match done_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                }
            }
        });

        SpinnerHandle {
            done_tx: Some(done_tx),
            thread: Some(thread),
        }
    }
}

impl SpinnerHandle {
    /// Hands the stop signal to the loop and waits for it to exit.
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        if let Some(done_tx) = self.done_tx.take() {
            // only fails if the loop already ended
            let _ = done_tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Spinner thread panicked");
            }
        }
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        self.halt();
    }
}
