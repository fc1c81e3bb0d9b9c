// SPDX-License-Identifier: Apache-2.0

use std::array;
use std::cell::{BorrowMutError, RefCell, RefMut};
use std::ops::DerefMut;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use once_cell::sync::Lazy;
use crate::segment::{Segment, SegmentSize};

#[derive(Copy, Clone, Debug, thiserror::Error)]
#[error("failed to lock the segment pool")]
pub struct PoolError;

impl From<BorrowMutError> for PoolError {
	fn from(_: BorrowMutError) -> Self { Self }
}

impl<T> From<PoisonError<T>> for PoolError {
	fn from(_: PoisonError<T>) -> Self { Self }
}

/// A shared handle to a segment pool. Handles are cheap to clone; all clones
/// refer to the same underlying pool.
///
/// Note on object-safety: this trait is object-safe for single-segment
/// operations, but not for bulk collection.
pub trait Pool: Clone {
	type Pool: MutPool + ?Sized;
	type Ref<'p>: DerefMut<Target = Self::Pool> where Self: 'p;

	/// Borrows the pool mutably, locking it for the duration of the borrow.
	fn try_lock(&self) -> Result<Self::Ref<'_>, PoolError>;

	/// Claims a single segment of `size` bytes.
	fn claim(&self, size: SegmentSize) -> Result<Segment, PoolError> {
		Ok(self.try_lock()?.claim(size))
	}

	/// Collects a segment back into the pool.
	fn collect(&self, segment: Segment) -> Result<(), PoolError> {
		Ok(self.try_lock()?.collect(segment))
	}

	/// Collects many segments back into the pool under one lock.
	fn collect_all(&self, segments: impl IntoIterator<Item = Segment>) -> Result<(), PoolError> {
		let mut pool = self.try_lock()?;
		for segment in segments {
			pool.collect(segment);
		}
		Ok(())
	}

	/// Clears free segments from the pool to release memory. The segment count
	/// to clear is left up to the implementation.
	fn shed(&self) -> Result<(), PoolError> {
		Ok(self.try_lock()?.shed())
	}
}

/// A mutably-borrowed pool, usually reached through a [`Pool`] handle's lock.
///
/// Claimed segments are recycled, not reallocated: a segment handed out by
/// [`claim`](Self::claim) may still hold bytes from its previous owner. Callers
/// must track which bytes they have written.
pub trait MutPool {
	/// Claims a single segment of `size` bytes, allocating if no free segment
	/// of that size is on hand.
	fn claim(&mut self, size: SegmentSize) -> Segment;

	/// Collects a segment back into the pool for reuse.
	fn collect(&mut self, segment: Segment);

	/// Clears free segments from the pool to release memory.
	fn shed(&mut self);
}

const CLASS_COUNT: usize =
	(SegmentSize::MAX.get().trailing_zeros() -
	 SegmentSize::MIN.get().trailing_zeros() + 1) as usize;

/// The default allocator: one free list per supported segment size. Free lists
/// are unbounded; [`shed`](MutPool::shed) releases them wholesale.
pub struct BucketPool {
	buckets: [Vec<Segment>; CLASS_COUNT],
}

impl BucketPool {
	const fn class(size: SegmentSize) -> usize {
		(size.get().trailing_zeros() - SegmentSize::MIN.get().trailing_zeros()) as usize
	}

	fn class_of(size: usize) -> Option<usize> {
		Some(Self::class(SegmentSize::new(size).ok()?))
	}
}

impl Default for BucketPool {
	fn default() -> Self {
		Self { buckets: array::from_fn(|_| Vec::new()) }
	}
}

impl MutPool for BucketPool {
	fn claim(&mut self, size: SegmentSize) -> Segment {
		self.buckets[Self::class(size)]
			.pop()
			.unwrap_or_else(|| Segment::new(size))
	}

	fn collect(&mut self, segment: Segment) {
		// Blocks of a size this pool never hands out are dropped.
		if let Some(class) = Self::class_of(segment.size()) {
			self.buckets[class].push(segment)
		}
	}

	fn shed(&mut self) {
		for bucket in &mut self.buckets {
			bucket.clear()
		}
	}
}

/// A thread-safe [`Pool`] handle wrapping its pool in an `Arc<Mutex<_>>`. Many
/// buffers, on any thread, may claim from and collect into the same instance.
pub struct SharedPool<P: MutPool = BucketPool>(Arc<Mutex<P>>);

/// A single-threaded [`Pool`] handle wrapping its pool in an `Rc<RefCell<_>>`.
/// Faster than [`SharedPool`], but confined to one thread.
pub struct LocalPool<P: MutPool = BucketPool>(Rc<RefCell<P>>);

impl<P: MutPool> Clone for SharedPool<P> {
	fn clone(&self) -> Self { self.0.clone().into() }
}

impl<P: MutPool> Clone for LocalPool<P> {
	fn clone(&self) -> Self { self.0.clone().into() }
}

impl<P: MutPool + Default> Default for SharedPool<P> {
	fn default() -> Self { P::default().into() }
}

impl<P: MutPool + Default> Default for LocalPool<P> {
	fn default() -> Self { P::default().into() }
}

impl<P: MutPool> From<Arc<Mutex<P>>> for SharedPool<P> {
	fn from(pool: Arc<Mutex<P>>) -> Self { Self(pool) }
}

impl<P: MutPool> From<Mutex<P>> for SharedPool<P> {
	fn from(pool: Mutex<P>) -> Self { Arc::new(pool).into() }
}

impl<P: MutPool> From<P> for SharedPool<P> {
	fn from(pool: P) -> Self { Mutex::new(pool).into() }
}

impl<P: MutPool> From<Rc<RefCell<P>>> for LocalPool<P> {
	fn from(pool: Rc<RefCell<P>>) -> Self { Self(pool) }
}

impl<P: MutPool> From<RefCell<P>> for LocalPool<P> {
	fn from(pool: RefCell<P>) -> Self { Rc::new(pool).into() }
}

impl<P: MutPool> From<P> for LocalPool<P> {
	fn from(pool: P) -> Self { RefCell::new(pool).into() }
}

impl<P: MutPool> Pool for SharedPool<P> {
	type Pool = P;
	type Ref<'p> = MutexGuard<'p, P> where Self: 'p;

	fn try_lock(&self) -> Result<Self::Ref<'_>, PoolError> {
		Ok(self.0.lock()?)
	}
}

impl<P: MutPool> Pool for LocalPool<P> {
	type Pool = P;
	type Ref<'p> = RefMut<'p, P> where Self: 'p;

	fn try_lock(&self) -> Result<Self::Ref<'_>, PoolError> {
		Ok(self.0.try_borrow_mut()?)
	}
}

/// Clones a handle to the process-wide shared segment pool.
#[inline]
pub fn pool() -> SharedPool { POOL.clone() }

static POOL: Lazy<SharedPool> = Lazy::new(SharedPool::default);

/// Clones a handle to this thread's local segment pool.
#[inline]
pub fn local_pool() -> LocalPool { LOCAL_POOL.with(LocalPool::clone) }

thread_local! {
	static LOCAL_POOL: LocalPool = LocalPool::default();
}
