// SPDX-License-Identifier: Apache-2.0

use std::cmp::min;
use all_asserts::debug_assert_le;
use crate::{Buffer, Error, Result};
use crate::error::OperationKind::Read;
use crate::pool::Pool;

impl<P: Pool> Buffer<P> {
	/// Reads the byte at the cursor, advancing by one. Returns `None` once the
	/// cursor has reached the logical length.
	pub fn read_byte(&mut self) -> Result<Option<u8>> {
		self.check_open(Read)?;
		if self.pos == self.len { return Ok(None) }

		let (seg, off) = self.size.locate(self.pos);
		let value = self.segments[seg].data()[off];
		self.pos += 1;
		Ok(Some(value))
	}

	/// Reads up to `buf.len()` bytes starting at the cursor, crossing as many
	/// segment boundaries as needed, and returns the count copied. Reading
	/// stops at the logical length; a cursor already there reads zero bytes.
	pub fn read_slice(&mut self, buf: &mut [u8]) -> Result<usize> {
		self.check_open(Read)?;
		let count = min(buf.len(), self.len - self.pos);
		let mut read = 0;
		while read < count {
			let chunk = self.chunk_at(self.pos);
			let n = min(count - read, chunk.len());
			buf[read..read + n].copy_from_slice(&chunk[..n]);
			self.pos += n;
			read += n;
		}
		debug_assert_le!(self.pos, self.len);
		Ok(read)
	}

	/// Reads exactly `buf.len()` bytes, failing with an end-of-stream error
	/// before copying anything if fewer bytes remain past the cursor.
	pub fn read_slice_exact(&mut self, buf: &mut [u8]) -> Result<usize> {
		self.check_open(Read)?;
		if self.len - self.pos < buf.len() {
			return Err(Error::eos(Read))
		}

		self.read_slice(buf)
	}
}
