use std::fmt;

use crate::bounded::Channel;

/// Terminal status of a failed channel operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// A non-blocking send found the buffer full.
    Full,
    /// A non-blocking receive found the buffer empty.
    Empty,
    /// The channel is closed.
    Closed,
    /// The channel state lock was poisoned by a panicking thread.
    Poisoned,
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::Full => write!(f, "channel buffer is full"),
            ChannelError::Empty => write!(f, "channel buffer is empty"),
            ChannelError::Closed => write!(f, "channel is closed"),
            ChannelError::Poisoned => write!(f, "channel state lock is poisoned"),
        }
    }
}

impl std::error::Error for ChannelError {}

/// Error returned by [`Channel::send`] and [`Channel::try_send`].
///
/// The unsent value is handed back; ownership transfers to the channel
/// only on a successful enqueue.
pub struct SendError<T> {
    /// The value that was not sent.
    pub value: T,
    /// Why the send failed.
    pub kind: ChannelError,
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendError")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl<T> std::error::Error for SendError<T> {}

/// Error returned by [`Channel::destroy`] on a channel that is still open.
///
/// The channel is handed back untouched so the caller can close it first.
pub struct DestroyError<T> {
    /// The refused channel.
    pub channel: Channel<T>,
}

impl<T> fmt::Debug for DestroyError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestroyError").finish_non_exhaustive()
    }
}

impl<T> fmt::Display for DestroyError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "destroy called on an open channel")
    }
}

impl<T> std::error::Error for DestroyError<T> {}

/// Error returned by [`select`](crate::select::select), identifying the
/// entry whose channel produced the terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectError {
    /// Index of the failed entry.
    pub index: usize,
    /// The terminal status.
    pub kind: ChannelError,
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "select entry {}: {}", self.index, self.kind)
    }
}

impl std::error::Error for SelectError {}
