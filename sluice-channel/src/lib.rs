//! Bounded multi-producer multi-consumer channels with select.
//!
//! This crate provides CSP-style message passing over fixed-capacity
//! FIFO buffers. A [`Channel`] is one shared object: any number of
//! threads send into it and receive from it concurrently, and a
//! [`select`] call waits on several channels at once, completing the
//! first operation that can proceed.
//!
//! # Key Features
//!
//! - **Multi-producer Multi-consumer (MPMC)**: every channel supports
//!   multiple concurrent senders and receivers.
//! - **Blocking and non-blocking operations**: `send`/`recv` block on a
//!   full/empty buffer; `try_send`/`try_recv` report the buffer state
//!   instead.
//! - **Select**: wait on any mix of send and receive operations across
//!   channels; the lowest-index ready entry wins.
//! - **Closed lifecycle**: closing a channel is terminal and wakes every
//!   blocked sender, receiver, and select call with a closed status.
//!
//! # Example
//!
//! ```rust
//! use sluice_channel::{bounded, ChannelError};
//! use std::thread;
//!
//! let ch = bounded::<&str>(1);
//!
//! thread::scope(|scope| {
//!     scope.spawn(|| ch.send("ping").unwrap());
//!     assert_eq!(ch.recv(), Ok("ping"));
//! });
//!
//! ch.close().unwrap();
//! assert_eq!(ch.recv(), Err(ChannelError::Closed));
//! ```

#![warn(missing_docs)]
/// Bounded channel implementation.
pub mod bounded;
/// Error types shared by the channel operations.
pub mod error;
/// Multi-channel select coordinator.
pub mod select;

mod signal;
mod waiters;

pub use bounded::Channel;
pub use error::{ChannelError, DestroyError, SelectError, SendError};
pub use select::{select, SelectOp, Selected};

/// Creates a bounded channel holding at most `capacity` values.
///
/// A capacity of zero is a degenerate buffer that is permanently full.
pub fn bounded<T>(capacity: usize) -> Channel<T> {
    Channel::new(capacity)
}
