// SPDX-License-Identifier: Apache-2.0

//! ## How it works
//!
//! Data is written to and read from reusable blocks of memory called
//! *segments*. Segments are claimed from a *pool* as a buffer grows, and
//! collected back into the pool when the buffer is closed. A buffer uses one
//! fixed, power-of-two segment size for its whole life, so a logical byte
//! offset splits into a segment index and an intra-segment offset with a shift
//! and a mask.
//!
//! ### Buffers
//!
//! A [`Buffer`] behaves as a growable, seekable byte sequence: one cursor for
//! both reading and writing, a logical length tracking the high-water mark of
//! written bytes, and an ordered list of segments backing those bytes. Segments
//! are claimed lazily, only once a write actually reaches them; reading never
//! acquires memory and never observes bytes past the logical length, even when
//! a recycled segment still holds stale data from its previous life. Closing a
//! buffer collects every segment back into its pool; dropping closes
//! implicitly.
//!
//! ### Pools
//!
//! Pools recycle segments between buffers. The default [`pool`](pool::pool) is
//! process-wide and lock-protected, safe to claim from and collect into on any
//! thread; [`local_pool`](pool::local_pool) is its single-threaded,
//! thread-local counterpart. Both keep free blocks in per-size free lists and
//! allocate only when a list runs dry. Custom pools plug in through the
//! [`Pool`](pool::Pool) trait, which buffers take as an explicit dependency.

mod buffer;
mod error;
mod segment;
mod std_io;
pub mod pool;
pub mod streams;

pub use buffer::Buffer;
pub use error::{Error, ErrorBox, ErrorKind, OperationKind, Result};
pub use segment::{Segment, SegmentSize};
