// SPDX-License-Identifier: Apache-2.0

use std::cmp::{max, min};
use all_asserts::debug_assert_le;
use crate::{Buffer, Result};
use crate::error::OperationKind::Write;
use crate::pool::Pool;

impl<P: Pool> Buffer<P> {
	/// Writes one byte at the cursor, claiming a segment if the cursor has
	/// outgrown the ones on hand, and advances the cursor. The logical length
	/// grows to the cursor when the write extends the buffer; an in-place
	/// overwrite leaves it untouched.
	pub fn write_byte(&mut self, value: u8) -> Result {
		self.check_open(Write)?;
		let (seg, off) = self.claim_to(self.pos)?;
		self.segments[seg].data_mut()[off] = value;
		self.pos += 1;
		self.len = max(self.len, self.pos);
		Ok(())
	}

	/// Writes all of `buf` at the cursor, crossing and claiming as many
	/// segments as needed, and returns the count written. Length follows the
	/// same rule as [`write_byte`](Self::write_byte): it grows to the final
	/// cursor position on extension and is untouched by in-place overwrites.
	pub fn write_slice(&mut self, buf: &[u8]) -> Result<usize> {
		self.check_open(Write)?;
		let mut written = 0;
		while written < buf.len() {
			let (seg, off) = self.claim_to(self.pos)?;
			let space = &mut self.segments[seg].data_mut()[off..];
			let n = min(buf.len() - written, space.len());
			space[..n].copy_from_slice(&buf[written..written + n]);
			self.pos += n;
			written += n;
		}
		self.len = max(self.len, self.pos);
		debug_assert_le!(self.len, self.segment_count() * self.segment_size());
		Ok(written)
	}
}
