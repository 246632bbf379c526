//! Debounce and throttle decorators for rate-sensitive side effects.
//!
//! `Throttle` gates a callback to at most one execution per interval, running
//! it immediately and forwarding the return value. `Debouncer` defers
//! execution until a quiet period has passed, keeping only the newest value.
//! Both sit between a high-frequency producer (the capture tick) and an
//! expensive consumer (inference submission, spoken feedback).

#[cfg(test)]
mod tests;

use crossbeam_channel::{unbounded, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Immediate-execution rate gate.
///
/// The interval is measured from the last execution, not the last attempt;
/// calls landing inside the interval are dropped silently. Callback errors
/// propagate inline through the forwarded return value.
pub struct Throttle<F> {
    callback: F,
    min_interval: Duration,
    last_fired: Option<Instant>,
}

impl<F> Throttle<F> {
    pub fn new(callback: F, min_interval: Duration) -> Self {
        Self {
            callback,
            min_interval,
            last_fired: None,
        }
    }

    /// Invoke the callback if the interval has elapsed (or nothing has fired
    /// yet). Returns `Some(result)` on execution, `None` on a dropped call.
    pub fn call<A, R>(&mut self, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        self.call_at(Instant::now(), arg)
    }

    /// Clock-injected variant of `call`. `now` must not move backwards
    /// between calls.
    fn call_at<A, R>(&mut self, now: Instant, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        if let Some(last) = self.last_fired {
            if now.duration_since(last) < self.min_interval {
                return None;
            }
        }
        self.last_fired = Some(now);
        Some((self.callback)(arg))
    }
}

enum DebounceMsg<T> {
    Call(T),
    Cancel,
    Shutdown,
}

/// Deferred-execution rate limiter backed by a timer worker thread.
///
/// Each `call` replaces any pending invocation and re-arms the delay, so only
/// the last call in a quiet period executes, with its value. No return value
/// is forwarded. Dropping the handle cancels pending work and joins the
/// worker; no callback fires after `drop` returns. A panicking callback takes
/// the worker thread down with default panic handling.
pub struct Debouncer<T: Send + 'static> {
    sender: Sender<DebounceMsg<T>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(mut callback: impl FnMut(T) + Send + 'static, delay: Duration) -> Self {
        let (sender, receiver) = unbounded::<DebounceMsg<T>>();
        let handle = thread::spawn(move || {
            let mut pending: Option<(Instant, T)> = None;
            loop {
                let message = match pending.take() {
                    Some((deadline, value)) => {
                        let now = Instant::now();
                        if now >= deadline {
                            callback(value);
                            continue;
                        }
                        match receiver.recv_timeout(deadline - now) {
                            Ok(message) => {
                                // Not due yet; the message below decides
                                // whether this survives.
                                pending = Some((deadline, value));
                                message
                            }
                            Err(RecvTimeoutError::Timeout) => {
                                callback(value);
                                continue;
                            }
                            Err(RecvTimeoutError::Disconnected) => break,
                        }
                    }
                    None => match receiver.recv() {
                        Ok(message) => message,
                        Err(_) => break,
                    },
                };
                match message {
                    DebounceMsg::Call(value) => pending = Some((Instant::now() + delay, value)),
                    DebounceMsg::Cancel => pending = None,
                    DebounceMsg::Shutdown => break,
                }
            }
        });
        Self {
            sender,
            handle: Some(handle),
        }
    }

    /// Replace any pending invocation and restart the quiet-period timer.
    pub fn call(&self, value: T) {
        let _ = self.sender.send(DebounceMsg::Call(value));
    }

    /// Drop any pending invocation without firing it.
    pub fn cancel(&self) {
        let _ = self.sender.send(DebounceMsg::Cancel);
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let _ = self.sender.send(DebounceMsg::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
