use crossbeam_utils::Backoff;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, Thread};

/// A counting notifier shared between one select call and the channels
/// it targets.
///
/// Posts are sticky: a notification that lands before the owner sleeps
/// is recorded in the counter and consumed by a later [`wait`]. A binary
/// flag would lose such posts, so select could sleep through progress
/// that happened between its poll and its park.
///
/// [`wait`]: Signal::wait
pub(crate) struct Signal {
    count: AtomicUsize,
    thread: Thread,
}

impl Signal {
    /// Creates a signal owned by the current thread.
    pub(crate) fn new() -> Signal {
        Signal {
            count: AtomicUsize::new(0),
            thread: thread::current(),
        }
    }

    /// Consumes one pending notification, parking until one arrives.
    ///
    /// Only the owning thread may call this; it is the sole decrementer,
    /// so an observed non-zero count cannot vanish before the decrement.
    pub(crate) fn wait(&self) {
        let backoff = Backoff::new();
        loop {
            if self.count.load(Ordering::Acquire) > 0 {
                self.count.fetch_sub(1, Ordering::AcqRel);
                return;
            }
            if backoff.is_completed() {
                thread::park();
            } else {
                backoff.snooze();
            }
        }
    }

    /// Posts one notification and wakes the owning thread.
    ///
    /// Callable from any thread, any number of times.
    pub(crate) fn notify(&self) {
        self.count.fetch_add(1, Ordering::Release);
        self.thread.unpark();
    }
}

#[cfg(test)]
mod tests {
    use super::Signal;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn posts_before_wait_are_not_lost() {
        let signal = Signal::new();
        signal.notify();
        signal.notify();

        // Both waits complete without another post.
        signal.wait();
        signal.wait();
    }

    #[test]
    fn cross_thread_notify_wakes_waiter() {
        let signal = Arc::new(Signal::new());

        let poster = {
            let signal = signal.clone();
            thread::spawn(move || signal.notify())
        };

        signal.wait();
        poster.join().unwrap();
    }
}
