// SPDX-License-Identifier: Apache-2.0

use std::io::SeekFrom;
use crate::Result;

/// A stream of bytes with an explicit close step.
pub trait Stream {
	/// Returns `true` if the stream has been closed.
	fn is_closed(&self) -> bool;

	/// Closes the stream, releasing its resources. Closing is idempotent;
	/// [`close`](Self::close) may be called more than once with no effect.
	/// Streams close automatically when dropped.
	fn close(&mut self) -> Result { Ok(()) }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SeekOffset {
	/// Reset the stream to the start. Equivalent to `FromStart(0)`.
	Reset,
	/// Move forward by an offset.
	Forward(usize),
	/// Move back by an offset.
	Back(usize),
	/// Seek a position from the start of the stream.
	FromStart(usize),
	/// Seek a position from the end of the stream.
	FromEnd(isize),
}

impl From<SeekFrom> for SeekOffset {
	/// Converts from [`std::io`]'s [`SeekFrom`], saturating offsets too wide
	/// for the platform's addressable range.
	fn from(value: SeekFrom) -> Self {
		match value {
			SeekFrom::Start(pos) =>
				Self::FromStart(usize::try_from(pos).unwrap_or(usize::MAX)),
			SeekFrom::End(pos @ 0..) =>
				Self::FromEnd(isize::try_from(pos).unwrap_or(isize::MAX)),
			SeekFrom::End(pos) =>
				Self::FromEnd(isize::try_from(pos).unwrap_or(isize::MIN)),
			SeekFrom::Current(off @ 0..) =>
				Self::Forward(usize::try_from(off).unwrap_or(usize::MAX)),
			SeekFrom::Current(off) =>
				Self::Back(usize::try_from(off.unsigned_abs()).unwrap_or(usize::MAX))
		}
	}
}

/// A stream that supports seeking. Based on the [`std::io::Seek`] trait.
pub trait Seekable {
	/// Seeks to an `offset`, returning the new position.
	fn seek(&mut self, offset: SeekOffset) -> Result<usize>;
}

/// A convenience extension for [`Seekable`].
pub trait SeekableExt: Seekable {
	/// Resets to the start of the stream. Shorthand for `seek(SeekOffset::Reset)`.
	fn reset(&mut self) -> Result {
		self.seek(SeekOffset::Reset)?;
		Ok(())
	}

	/// Seeks forward `offset` bytes relative to the current position, returning
	/// the new position. Shorthand for `seek(SeekOffset::Forward(offset))`.
	fn seek_forward(&mut self, offset: usize) -> Result<usize> {
		self.seek(SeekOffset::Forward(offset))
	}

	/// Seeks back `offset` bytes relative to the current position, returning the
	/// new position. Shorthand for `seek(SeekOffset::Back(offset))`.
	fn seek_back(&mut self, offset: usize) -> Result<usize> {
		self.seek(SeekOffset::Back(offset))
	}

	/// Seeks `offset` bytes relative to the start of the stream, returning the
	/// new position. Shorthand for `seek(SeekOffset::FromStart(offset))`.
	fn seek_from_start(&mut self, offset: usize) -> Result<usize> {
		self.seek(SeekOffset::FromStart(offset))
	}

	/// Seeks `offset` bytes relative to the end of the stream, returning the new
	/// position. Shorthand for `seek(SeekOffset::FromEnd(offset))`.
	fn seek_from_end(&mut self, offset: isize) -> Result<usize> {
		self.seek(SeekOffset::FromEnd(offset))
	}
}

impl<S: Seekable> SeekableExt for S { }
