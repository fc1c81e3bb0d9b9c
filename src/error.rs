// SPDX-License-Identifier: Apache-2.0

use std::{fmt, io, result};
use std::error::Error as StdError;
use std::fmt::Formatter;
use amplify_derive::Display;
use crate::pool::PoolError;

pub type ErrorBox = Box<dyn StdError + Send + Sync>;

pub type Result<T = ()> = result::Result<T, Error>;

/// The operation an [`Error`] arose from.
#[derive(Copy, Clone, Debug, Default, Display)]
pub enum OperationKind {
	#[default]
	#[display("unknown operation")]
	Unknown,
	#[display("create buffer")]
	Create,
	#[display("read from buffer")]
	Read,
	#[display("write to buffer")]
	Write,
	#[display("seek buffer")]
	Seek,
	#[display("resize buffer")]
	Resize,
	#[display("close buffer")]
	Close,
	#[display("{0}")]
	Other(&'static str)
}

/// The kind of failure an [`Error`] describes.
#[derive(Copy, Clone, Debug, Display)]
pub enum ErrorKind {
	#[display("invalid configuration ({0})")]
	InvalidConfig(&'static str),
	#[display("invalid input ({0})")]
	InvalidInput(&'static str),
	#[display("premature end-of-stream")]
	Eos,
	#[display("operation not supported")]
	Unsupported,
	#[display("buffer closed")]
	Closed,
	#[display("segment pool error")]
	Pool,
	#[display("{0}")]
	Other(&'static str),
}

#[derive(Debug)]
pub struct Error {
	op: OperationKind,
	kind: ErrorKind,
	source: Option<ErrorBox>,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let Self { op, kind, source } = self;
		if let Some(source) = source {
			write!(f, "{op} failed; {kind} ({source})")
		} else {
			write!(f, "{op} failed; {kind}")
		}
	}
}

impl StdError for Error {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		if let Some(ref source) = self.source {
			Some(source.as_ref())
		} else {
			None
		}
	}
}

impl Error {
	pub(crate) fn new(
		op: OperationKind,
		kind: ErrorKind,
		source: Option<ErrorBox>
	) -> Self {
		Self { op, kind, source }
	}

	/// Creates a new "invalid configuration" error.
	pub fn invalid_config(op: OperationKind, message: &'static str) -> Self {
		Self::new(op, ErrorKind::InvalidConfig(message), None)
	}

	/// Creates a new "invalid input" error.
	pub fn invalid_input(op: OperationKind, message: &'static str) -> Self {
		Self::new(op, ErrorKind::InvalidInput(message), None)
	}

	/// Creates a new "end-of-stream" error.
	pub fn eos(op: OperationKind) -> Self { Self::new(op, ErrorKind::Eos, None) }

	/// Creates a new "unsupported" error.
	pub fn unsupported(op: OperationKind) -> Self {
		Self::new(op, ErrorKind::Unsupported, None)
	}

	/// Creates a new "closed" error.
	pub fn closed(op: OperationKind) -> Self {
		Self::new(op, ErrorKind::Closed, None)
	}

	/// Creates a new segment pool error.
	pub fn pool(op: OperationKind, error: PoolError) -> Self {
		Self::new(op, ErrorKind::Pool, Some(error.into()))
	}

	/// Creates a new error with a custom message.
	pub fn other(op: OperationKind, message: &'static str) -> Self {
		Self::new(op, ErrorKind::Other(message), None)
	}

	/// Returns the operation kind.
	pub fn operation(&self) -> OperationKind { self.op }

	/// Sets the operation kind.
	pub fn with_operation(mut self, op: OperationKind) -> Self {
		self.op = op;
		self
	}

	/// Returns the error kind.
	pub fn kind(&self) -> ErrorKind { self.kind }
}

impl From<Error> for io::Error {
	fn from(value: Error) -> Self {
		use io::ErrorKind as IoKind;

		match value.kind() {
			ErrorKind::InvalidConfig(_) |
			ErrorKind::InvalidInput (_) => Self::new(IoKind::InvalidInput, value),
			ErrorKind::Eos => Self::new(IoKind::UnexpectedEof, value),
			ErrorKind::Unsupported => Self::new(IoKind::Unsupported, value),
			_ => Self::other(value)
		}
	}
}
