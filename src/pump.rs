use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Background thread that sends `msg` to `target` every `interval`.
///
/// Stopping (or dropping) the pump closes its control channel and joins the
/// thread, so no message is sent by it afterwards.
pub struct Pump {
    control: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Pump {
    pub fn start<T>(interval: Duration, target: Sender<T>, msg: T) -> Self
    where
        T: Clone + Send + 'static,
    {
        let (control, stop) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            match stop.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if target.send(msg.clone()).is_err() {
                        break;
                    }
                }
                // Explicit stop or the owner went away
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        Self {
            control: Some(control),
            handle: Some(handle),
        }
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(control) = self.control.take() {
            control.send(()).ok();
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("pump thread panicked");
            }
        }
    }
}

impl Drop for Pump {
    fn drop(&mut self) {
        self.shutdown();
    }
}
