use std::sync::Arc;

use crate::bounded::Channel;
use crate::error::{ChannelError, SelectError, SendError};
use crate::signal::Signal;

/// One pending operation in a [`select`] call.
pub struct SelectOp<'a, T> {
    channel: &'a Channel<T>,
    kind: OpKind<T>,
}

enum OpKind<T> {
    Send(Option<T>),
    Recv,
}

impl<'a, T> SelectOp<'a, T> {
    /// An entry that sends `value` into `channel`.
    pub fn send(channel: &'a Channel<T>, value: T) -> SelectOp<'a, T> {
        SelectOp {
            channel,
            kind: OpKind::Send(Some(value)),
        }
    }

    /// An entry that receives a value from `channel`.
    pub fn recv(channel: &'a Channel<T>) -> SelectOp<'a, T> {
        SelectOp {
            channel,
            kind: OpKind::Recv,
        }
    }

    /// Recovers the payload of a send entry that did not complete, e.g.
    /// after [`select`] returned an error for it.
    pub fn into_value(self) -> Option<T> {
        match self.kind {
            OpKind::Send(value) => value,
            OpKind::Recv => None,
        }
    }
}

/// Outcome of a completed [`select`].
#[derive(Debug)]
pub struct Selected<T> {
    /// Index of the entry that completed.
    pub index: usize,
    /// The received value, when the completed entry was a receive.
    pub value: Option<T>,
}

/// Result of polling one entry.
enum Poll<T> {
    Pending,
    Complete(Option<T>),
    Fault(ChannelError),
}

/// Waits until one of `ops` can proceed, performs it, and returns its
/// index.
///
/// Entries are polled in index order, so when several are ready at once
/// the lowest index wins. The call blocks while no entry can proceed
/// and every involved channel is open; any terminal status on any entry
/// (completion, a closed channel, a poisoned lock) ends the call with
/// that entry's index. A channel found closed while the call is being
/// set up fails it before any entry is performed.
///
/// An empty `ops` slice never completes.
///
/// # Example
///
/// ```rust
/// use sluice_channel::{bounded, select, SelectOp};
///
/// let a = bounded::<u32>(1);
/// let b = bounded::<u32>(1);
/// b.try_send(42).unwrap();
///
/// // Both entries are ready; the lowest index wins.
/// let mut ops = [SelectOp::send(&a, 7), SelectOp::recv(&b)];
/// let selected = select(&mut ops).unwrap();
/// assert_eq!(selected.index, 0);
/// assert_eq!(a.try_recv(), Ok(7));
/// ```
pub fn select<T>(ops: &mut [SelectOp<'_, T>]) -> Result<Selected<T>, SelectError> {
    let signal = Arc::new(Signal::new());

    // Attach the notifier to every channel, in index order. A failure
    // unwinds the registrations made so far; none may outlive the call.
    for index in 0..ops.len() {
        if let Err(kind) = ops[index].channel.register_waiter(signal.clone()) {
            for prior in &ops[..index] {
                prior.channel.unregister_waiter(&signal);
            }
            return Err(SelectError { index, kind });
        }
    }

    // Poll every entry, sleeping on the notifier between rounds. Every
    // enqueue, dequeue, and close on an attached channel posts the
    // notifier under that channel's lock, so progress that lands after
    // a poll is held in the counter and the next wait returns at once.
    loop {
        for index in 0..ops.len() {
            match poll_entry(&mut ops[index]) {
                Poll::Pending => {}
                Poll::Complete(value) => {
                    unregister_all(ops, &signal);
                    return Ok(Selected { index, value });
                }
                Poll::Fault(kind) => {
                    unregister_all(ops, &signal);
                    return Err(SelectError { index, kind });
                }
            }
        }
        signal.wait();
    }
}

/// Attempts one entry without blocking.
fn poll_entry<T>(op: &mut SelectOp<'_, T>) -> Poll<T> {
    match &mut op.kind {
        OpKind::Send(slot) => {
            let value = match slot.take() {
                Some(value) => value,
                None => return Poll::Pending,
            };
            match op.channel.try_send(value) {
                Ok(()) => Poll::Complete(None),
                Err(SendError { value, kind }) => {
                    *slot = Some(value);
                    match kind {
                        ChannelError::Full => Poll::Pending,
                        other => Poll::Fault(other),
                    }
                }
            }
        }
        OpKind::Recv => match op.channel.try_recv() {
            Ok(value) => Poll::Complete(Some(value)),
            Err(ChannelError::Empty) => Poll::Pending,
            Err(kind) => Poll::Fault(kind),
        },
    }
}

/// Detaches the notifier from every entry's channel, one registration
/// per entry.
fn unregister_all<T>(ops: &[SelectOp<'_, T>], signal: &Arc<Signal>) {
    for op in ops {
        op.channel.unregister_waiter(signal);
    }
}
