// SPDX-License-Identifier: Apache-2.0

mod read;
mod write;

use std::cmp::min;
use std::{fmt, mem};
use std::fmt::{Debug, Formatter};
use crate::{Error, Result};
use crate::error::OperationKind;
use crate::error::OperationKind::{Close, Create, Resize, Write};
use crate::pool::{pool, Pool, SharedPool};
use crate::segment::{Segment, SegmentSize};
use crate::streams::{Seekable, SeekOffset, Stream};

/// A growable, seekable byte sequence backed by fixed-size segments claimed
/// from a [`Pool`].
///
/// One cursor serves reads and writes. Writing at the logical length extends
/// the buffer, claiming segments lazily as the cursor crosses into them;
/// writing before it overwrites in place. Reading stops at the logical length,
/// so stale bytes in recycled segments are never observable. Closing the
/// buffer (or dropping it) collects every segment back into the pool.
///
/// Buffers are single-owner: operations take `&mut self`, and a segment is
/// never shared between buffers.
pub struct Buffer<P: Pool = SharedPool> {
	segments: Vec<Segment>,
	pool: P,
	size: SegmentSize,
	len: usize,
	pos: usize,
	closed: bool,
}

impl Buffer {
	/// Creates an empty buffer with `size`-byte segments, backed by the
	/// process-wide shared pool.
	pub fn with_size(size: SegmentSize) -> Self {
		Self::new(pool(), size)
	}
}

impl Default for Buffer {
	fn default() -> Self {
		Self::new(pool(), SegmentSize::DEFAULT)
	}
}

impl<P: Pool> From<P> for Buffer<P> {
	fn from(pool: P) -> Self {
		Self::new(pool, SegmentSize::DEFAULT)
	}
}

impl<P: Pool> Buffer<P> {
	/// Creates an empty buffer drawing `size`-byte segments from `pool`.
	pub fn new(pool: P, size: SegmentSize) -> Self {
		Self {
			segments: Vec::new(),
			pool,
			size,
			len: 0,
			pos: 0,
			closed: false,
		}
	}

	/// Rebuilds a buffer of logical length `len` from previously transported
	/// segments, with the cursor at the start. Fails with an
	/// invalid-configuration error unless the segment count is exactly the
	/// count `len` bytes occupy and every segment is `size` bytes.
	pub fn from_segments(
		pool: P,
		size: SegmentSize,
		segments: Vec<Segment>,
		len: usize
	) -> Result<Self> {
		if segments.len() != len.div_ceil(size.get()) {
			return Err(Error::invalid_config(Create, "segment count mismatch"))
		}

		if segments.iter().any(|segment| segment.size() != size.get()) {
			return Err(Error::invalid_config(Create, "all segments must be of the same size"))
		}

		Ok(Self {
			segments,
			pool,
			size,
			len,
			pos: 0,
			closed: false,
		})
	}

	/// Returns the number of logical bytes written so far.
	pub fn len(&self) -> usize { self.len }

	/// Returns `true` if no bytes have been written.
	pub fn is_empty(&self) -> bool { self.len == 0 }

	/// Returns the cursor position.
	pub fn position(&self) -> usize { self.pos }

	/// Seeks to `pos` from the start, returning the new (possibly clamped)
	/// position. Shorthand for `seek(SeekOffset::FromStart(pos))`.
	pub fn set_position(&mut self, pos: usize) -> Result<usize> {
		self.seek(SeekOffset::FromStart(pos))
	}

	/// The logical length grows through writes only; it cannot be assigned.
	/// Always fails with an unsupported-operation error.
	pub fn set_len(&mut self, _len: usize) -> Result {
		Err(Error::unsupported(Resize))
	}

	/// Returns the fixed segment size in bytes.
	pub fn segment_size(&self) -> usize { self.size.get() }

	/// Returns the number of segments currently held.
	pub fn segment_count(&self) -> usize { self.segments.len() }

	fn check_open(&self, op: OperationKind) -> Result {
		if self.closed {
			return Err(Error::closed(op))
		}
		Ok(())
	}

	fn last_index(&self) -> usize { self.len.saturating_sub(1) }

	/// Translates a logical index into a segment/offset pair, claiming
	/// segments up to the one containing `index`. The only point where the
	/// buffer acquires storage.
	fn claim_to(&mut self, index: usize) -> Result<(usize, usize)> {
		let (seg, off) = self.size.locate(index);
		while self.segments.len() <= seg {
			let claimed = self.pool
							  .claim(self.size)
							  .map_err(|error| Error::pool(Write, error))?;
			self.segments.push(claimed);
		}
		Ok((seg, off))
	}

	/// Returns the longest contiguous run of written bytes starting at
	/// `index`, which must be below the logical length.
	fn chunk_at(&self, index: usize) -> &[u8] {
		let (seg, off) = self.size.locate(index);
		let n = min(self.len - index, self.size.get() - off);
		&self.segments[seg].data()[off..off + n]
	}
}

impl<P: Pool> Seekable for Buffer<P> {
	/// Seeks the cursor within the written region, returning the new position.
	/// Start- and current-relative offsets clamp to the last written index on
	/// the high side and zero on the low side. End-relative seeking lands on
	/// the last written index for offsets at or above zero, and on
	/// `len + offset`, floored at zero, for negative offsets.
	fn seek(&mut self, offset: SeekOffset) -> Result<usize> {
		self.check_open(OperationKind::Seek)?;
		let last = self.last_index();
		self.pos = match offset {
			SeekOffset::Reset => 0,
			SeekOffset::Forward(off) => min(self.pos.saturating_add(off), last),
			SeekOffset::Back(off) => self.pos.saturating_sub(off),
			SeekOffset::FromStart(pos) => min(pos, last),
			SeekOffset::FromEnd(off) if off < 0 => self.len.saturating_add_signed(off),
			SeekOffset::FromEnd(_) => last,
		};
		Ok(self.pos)
	}
}

impl<P: Pool> Stream for Buffer<P> {
	fn is_closed(&self) -> bool { self.closed }

	/// Closes the buffer, collecting every held segment back into the pool
	/// under one lock and clearing the segment list. Subsequent operations
	/// fail with a closed-buffer error; closing again has no effect.
	fn close(&mut self) -> Result {
		if self.closed { return Ok(()) }

		self.closed = true;
		self.len = 0;
		self.pos = 0;
		let segments = mem::take(&mut self.segments);
		self.pool
			.collect_all(segments)
			.map_err(|error| Error::pool(Close, error))
	}
}

impl<P: Pool> Drop for Buffer<P> {
	fn drop(&mut self) {
		let _ = self.close();
	}
}

impl<P: Pool> Debug for Buffer<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Buffer")
			.field("segment_size", &self.size.get())
			.field("segments", &self.segments.len())
			.field("len", &self.len)
			.field("pos", &self.pos)
			.field("closed", &self.closed)
			.finish_non_exhaustive()
	}
}

impl<P: Pool, P2: Pool> PartialEq<Buffer<P2>> for Buffer<P> {
	/// Compares written contents, regardless of segment size or pool.
	fn eq(&self, other: &Buffer<P2>) -> bool {
		if self.len != other.len { return false }

		let mut index = 0;
		while index < self.len {
			let a = self.chunk_at(index);
			let b = other.chunk_at(index);
			let n = min(a.len(), b.len());
			if a[..n] != b[..n] { return false }
			index += n;
		}
		true
	}
}

impl<P: Pool> Eq for Buffer<P> { }
