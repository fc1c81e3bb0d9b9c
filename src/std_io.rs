// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::io::{Read, Seek, SeekFrom, Write};
use crate::Buffer;
use crate::pool::Pool;
use crate::streams::Seekable;

impl<P: Pool> Read for Buffer<P> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		Ok(self.read_slice(buf)?)
	}
}

impl<P: Pool> Write for Buffer<P> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		Ok(self.write_slice(buf)?)
	}

	/// No-op; writes land in memory immediately.
	fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

impl<P: Pool> Seek for Buffer<P> {
	/// Seeks through the [`Seekable`] contract, which clamps positions into
	/// the written region; unlike most [`Seek`] implementations, the cursor
	/// cannot be parked past the end of the written bytes.
	fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		Ok(Seekable::seek(self, pos.into())? as u64)
	}
}
