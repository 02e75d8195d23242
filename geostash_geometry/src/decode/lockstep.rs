use anyhow::{Result, anyhow};
use std::iter::FusedIterator;

/// Advances two iterators together.
///
/// Yields `Ok((left, right))` while both sides produce items. If exactly one side runs out,
/// a single `Err` naming the shorter side is yielded. After that, or after both ran out
/// together, the iterator stays exhausted.
#[derive(Debug)]
pub struct LockStep<A, B> {
	left: A,
	right: B,
	names: [&'static str; 2],
	index: usize,
	done: bool,
}

impl<A: Iterator, B: Iterator> LockStep<A, B> {
	pub fn new(left: A, right: B) -> Self {
		Self {
			left,
			right,
			names: ["left", "right"],
			index: 0,
			done: false,
		}
	}

	/// Names used in the desynchronization error.
	#[must_use]
	pub fn with_names(mut self, left: &'static str, right: &'static str) -> Self {
		self.names = [left, right];
		self
	}

	/// Number of pairs yielded so far.
	pub fn position(&self) -> usize {
		self.index
	}
}

impl<A: Iterator, B: Iterator> Iterator for LockStep<A, B> {
	type Item = Result<(A::Item, B::Item)>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		match (self.left.next(), self.right.next()) {
			(Some(a), Some(b)) => {
				self.index += 1;
				Some(Ok((a, b)))
			}
			(None, None) => {
				self.done = true;
				None
			}
			(left, _) => {
				self.done = true;
				let (ended, continues) = if left.is_none() {
					(self.names[0], self.names[1])
				} else {
					(self.names[1], self.names[0])
				};
				Some(Err(anyhow!(
					"{ended} stream ended after {} records while the {continues} stream continues",
					self.index
				)))
			}
		}
	}
}

impl<A: Iterator, B: Iterator> FusedIterator for LockStep<A, B> {}
