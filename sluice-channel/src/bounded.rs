use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use sluice_queue::ring_buffer::RingBuffer;

use crate::error::{ChannelError, DestroyError, SendError};
use crate::signal::Signal;
use crate::waiters::WaiterList;

/// State guarded by the channel mutex.
struct Shared<T> {
    buffer: RingBuffer<T>,
    closed: bool,
    waiters: WaiterList,
}

/// A bounded multi-producer multi-consumer channel.
///
/// Any number of threads may send into and receive from one channel
/// concurrently, through a shared reference or an `Arc`. Values move
/// through a fixed-capacity FIFO buffer: [`send`] blocks while the
/// buffer is full, [`recv`] blocks while it is empty, and the
/// [`try_send`]/[`try_recv`] variants report [`Full`]/[`Empty`] instead
/// of blocking.
///
/// [`close`] is terminal: every blocked sender, receiver, and select
/// call on the channel unblocks with [`Closed`], and so does every
/// later operation. A closed channel reports [`Closed`] from `recv`
/// even while values remain buffered; drain with `try_recv` before
/// closing if those values matter.
///
/// A capacity of zero is honored as a buffer that is permanently full:
/// every send blocks (or reports [`Full`]) until the channel closes.
///
/// # Example
///
/// ```rust
/// use sluice_channel::{bounded, ChannelError};
///
/// let ch = bounded(2);
/// ch.try_send(1).unwrap();
/// assert_eq!(ch.try_recv(), Ok(1));
/// assert_eq!(ch.try_recv(), Err(ChannelError::Empty));
/// ```
///
/// [`send`]: Channel::send
/// [`recv`]: Channel::recv
/// [`try_send`]: Channel::try_send
/// [`try_recv`]: Channel::try_recv
/// [`close`]: Channel::close
/// [`Full`]: ChannelError::Full
/// [`Empty`]: ChannelError::Empty
/// [`Closed`]: ChannelError::Closed
pub struct Channel<T> {
    state: Mutex<Shared<T>>,

    /// Signaled after every successful enqueue; wakes blocked receivers.
    not_empty: Condvar,

    /// Signaled after every successful dequeue; wakes blocked senders.
    not_full: Condvar,
}

impl<T> Channel<T> {
    /// Creates an open channel holding at most `capacity` values.
    pub fn new(capacity: usize) -> Channel<T> {
        Channel {
            state: Mutex::new(Shared {
                buffer: RingBuffer::new(capacity),
                closed: false,
                waiters: WaiterList::new(),
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Sends a value, blocking while the buffer is full.
    ///
    /// Fails with [`ChannelError::Closed`] if the channel is closed, or
    /// closes while this call is blocked; the error hands the value back.
    pub fn send(&self, value: T) -> Result<(), SendError<T>> {
        let mut value = value;
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => {
                return Err(SendError {
                    value,
                    kind: ChannelError::Poisoned,
                })
            }
        };
        loop {
            if state.closed {
                return Err(SendError {
                    value,
                    kind: ChannelError::Closed,
                });
            }
            match state.buffer.push(value) {
                Ok(()) => {
                    self.not_empty.notify_one();
                    state.waiters.notify_all();
                    return Ok(());
                }
                Err(rejected) => {
                    // Progress requires a dequeue; sleep until one happens,
                    // then re-check both the buffer and the close flag.
                    value = rejected;
                    state = match self.not_full.wait(state) {
                        Ok(guard) => guard,
                        Err(_) => {
                            return Err(SendError {
                                value,
                                kind: ChannelError::Poisoned,
                            })
                        }
                    };
                }
            }
        }
    }

    /// Receives the oldest buffered value, blocking while the buffer is
    /// empty.
    ///
    /// Fails with [`ChannelError::Closed`] if the channel is closed, or
    /// closes while this call is blocked. The close check comes first,
    /// so buffered values are unreachable once the channel is closed.
    pub fn recv(&self) -> Result<T, ChannelError> {
        let mut state = self.state.lock().map_err(|_| ChannelError::Poisoned)?;
        loop {
            if state.closed {
                return Err(ChannelError::Closed);
            }
            match state.buffer.pop() {
                Some(value) => {
                    self.not_full.notify_one();
                    state.waiters.notify_all();
                    return Ok(value);
                }
                None => {
                    state = self
                        .not_empty
                        .wait(state)
                        .map_err(|_| ChannelError::Poisoned)?;
                }
            }
        }
    }

    /// Sends a value if the buffer has room, never blocking.
    ///
    /// Fails with [`ChannelError::Full`] on a full buffer and
    /// [`ChannelError::Closed`] on a closed channel; either way the
    /// error hands the value back.
    pub fn try_send(&self, value: T) -> Result<(), SendError<T>> {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => {
                return Err(SendError {
                    value,
                    kind: ChannelError::Poisoned,
                })
            }
        };
        if state.closed {
            return Err(SendError {
                value,
                kind: ChannelError::Closed,
            });
        }
        match state.buffer.push(value) {
            Ok(()) => {
                self.not_empty.notify_one();
                state.waiters.notify_all();
                Ok(())
            }
            Err(rejected) => Err(SendError {
                value: rejected,
                kind: ChannelError::Full,
            }),
        }
    }

    /// Receives the oldest buffered value if one exists, never blocking.
    ///
    /// Fails with [`ChannelError::Empty`] on an empty buffer and
    /// [`ChannelError::Closed`] on a closed channel.
    pub fn try_recv(&self) -> Result<T, ChannelError> {
        let mut state = self.state.lock().map_err(|_| ChannelError::Poisoned)?;
        if state.closed {
            return Err(ChannelError::Closed);
        }
        match state.buffer.pop() {
            Some(value) => {
                self.not_full.notify_one();
                state.waiters.notify_all();
                Ok(value)
            }
            None => Err(ChannelError::Empty),
        }
    }

    /// Closes the channel, waking every blocked sender, receiver, and
    /// select call so they observe the closed state.
    ///
    /// Fails with [`ChannelError::Closed`] if already closed. The
    /// transition is one-way.
    pub fn close(&self) -> Result<(), ChannelError> {
        let mut state = self.state.lock().map_err(|_| ChannelError::Poisoned)?;
        if state.closed {
            return Err(ChannelError::Closed);
        }
        state.closed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
        state.waiters.notify_all();
        Ok(())
    }

    /// Consumes the channel, dropping any values still buffered.
    ///
    /// Refused unless the channel has been closed; the error hands the
    /// channel back untouched so the caller can close it first. The
    /// caller must also ensure no thread is still operating on the
    /// channel.
    pub fn destroy(self) -> Result<(), DestroyError<T>> {
        {
            let state = self.read_state();
            if !state.closed {
                drop(state);
                return Err(DestroyError { channel: self });
            }
            debug_assert_eq!(state.waiters.len(), 0);
        }
        Ok(())
    }

    /// Returns `true` if the channel has been closed.
    pub fn is_closed(&self) -> bool {
        self.read_state().closed
    }

    /// Returns the number of buffered values.
    pub fn len(&self) -> usize {
        self.read_state().buffer.len()
    }

    /// Returns `true` if no values are buffered.
    pub fn is_empty(&self) -> bool {
        self.read_state().buffer.is_empty()
    }

    /// Returns `true` if the buffer is at capacity.
    pub fn is_full(&self) -> bool {
        self.read_state().buffer.is_full()
    }

    /// Returns the maximum number of buffered values.
    pub fn capacity(&self) -> usize {
        self.read_state().buffer.capacity()
    }

    /// Attaches a select notifier, failing if the channel is closed.
    pub(crate) fn register_waiter(&self, handle: Arc<Signal>) -> Result<(), ChannelError> {
        let mut state = self.state.lock().map_err(|_| ChannelError::Poisoned)?;
        if state.closed {
            return Err(ChannelError::Closed);
        }
        state.waiters.insert(handle);
        Ok(())
    }

    /// Detaches one registration of a select notifier.
    ///
    /// Proceeds through a poisoned lock so an aborting select never
    /// leaves a dead notifier attached.
    pub(crate) fn unregister_waiter(&self, handle: &Arc<Signal>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.waiters.remove(handle);
    }

    #[cfg(test)]
    pub(crate) fn waiter_count(&self) -> usize {
        self.read_state().waiters.len()
    }

    /// Lock for read-only access, recovering a poisoned guard: the
    /// accessors mutate nothing, so a poisoned lock cannot mislead them.
    fn read_state(&self) -> MutexGuard<'_, Shared<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
