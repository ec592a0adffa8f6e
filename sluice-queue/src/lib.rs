//! Fixed-capacity FIFO primitives for the sluice channel crates.
//!
//! ## Features
//!
//! - `RingBuffer`: Bounded FIFO with explicit full/empty reporting and
//!   no internal locking.
//!
//! ## Usage
//!
//! ```rust
//! use sluice_queue::ring_buffer::RingBuffer;
//!
//! let mut buf = RingBuffer::new(2);
//! buf.push(1).unwrap();
//! buf.push(2).unwrap();
//! assert_eq!(buf.push(3), Err(3));
//! assert_eq!(buf.pop(), Some(1));
//! ```

pub mod ring_buffer;
