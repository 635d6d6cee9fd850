//! Sequence diffing for child lists.
//!
//! These functions only decide *what* to do with two sequences. Applying the result
//! to live nodes happens in [`DomDiffer`](`crate::DomDiffer`).

use core::hash::Hash;
use hashbrown::HashMap;
use std::collections::VecDeque;

/// One step of an edit script, consuming items from the old and/or new sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
	/// Keep the old item and patch it against the new one. Consumes one of each.
	Patch,
	/// Insert the new item. Consumes one new item.
	Insert,
	/// Remove the old item. Consumes one old item.
	Delete,
}

/// Finds `needle` as a contiguous run inside `haystack`, returning the run's start.
///
/// An empty `needle` is found at `0`.
pub fn index_of<T, U>(haystack: &[T], needle: &[U], mut eq: impl FnMut(&T, &U) -> bool) -> Option<usize> {
	if needle.len() > haystack.len() {
		return None;
	}
	(0..=haystack.len() - needle.len()).find(|&start| haystack[start..].iter().zip(needle).all(|(h, n)| eq(h, n)))
}

/// Myers' O(ND) shortest edit script between sequences of length `old_len` and `new_len`.
///
/// `eq(old_index, new_index)` decides whether a diagonal (patch) move is allowed.
/// Gives up and returns [`None`] once the edit distance exceeds `max_cost`.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn shortest_edit_script(old_len: usize, new_len: usize, max_cost: usize, mut eq: impl FnMut(usize, usize) -> bool) -> Option<Vec<Op>> {
	let n = old_len as isize;
	let m = new_len as isize;
	let max = n + m;
	let offset = max + 1;
	let mut v = vec![0_isize; 2 * max as usize + 3];
	let mut trace = Vec::new();

	for d in 0..=max {
		if d as usize > max_cost {
			return None;
		}
		trace.push(v.clone());

		let mut k = -d;
		while k <= d {
			let i = (k + offset) as usize;
			let mut x = if k == -d || (k != d && v[i - 1] < v[i + 1]) { v[i + 1] } else { v[i - 1] + 1 };
			let mut y = x - k;
			while x < n && y < m && eq(x as usize, y as usize) {
				x += 1;
				y += 1;
			}
			v[i] = x;
			if x >= n && y >= m {
				return Some(backtrack(&trace, n, m, offset));
			}
			k += 2;
		}
	}
	unreachable!("an edit script of length at most `old_len + new_len` always exists")
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn backtrack(trace: &[Vec<isize>], n: isize, m: isize, offset: isize) -> Vec<Op> {
	let mut ops = Vec::with_capacity((n + m) as usize);
	let (mut x, mut y) = (n, m);
	for (d, v) in trace.iter().enumerate().rev() {
		let d = d as isize;
		let k = x - y;
		let i = (k + offset) as usize;
		let prev_k = if k == -d || (k != d && v[i - 1] < v[i + 1]) { k + 1 } else { k - 1 };
		let prev_x = v[(prev_k + offset) as usize];
		let prev_y = prev_x - prev_k;

		while x > prev_x && y > prev_y {
			ops.push(Op::Patch);
			x -= 1;
			y -= 1;
		}
		if d > 0 {
			ops.push(if x == prev_x { Op::Insert } else { Op::Delete });
		}
		x = prev_x;
		y = prev_y;
	}
	ops.reverse();
	ops
}

/// Edit script from key matching, for when [`shortest_edit_script`] is too expensive.
///
/// Keyed new items match the old item with the same key, unkeyed new items match unkeyed old
/// items in order of appearance. The longest run of matches that is increasing in both
/// sequences is kept as [`Op::Patch`]es; everything around it becomes insertions and deletions.
pub fn keyed_edit_script<K: Eq + Hash>(old_keys: &[Option<K>], new_keys: &[Option<K>]) -> Vec<Op> {
	let mut keyed = HashMap::with_capacity(old_keys.len());
	let mut unkeyed = VecDeque::new();
	for (old_index, key) in old_keys.iter().enumerate() {
		match key {
			Some(key) => {
				keyed.insert(key, old_index);
			}
			None => unkeyed.push_back(old_index),
		}
	}

	struct Link {
		new_index: usize,
		old_index: usize,
		prev: Option<usize>,
	}

	// `thresholds[k]` is the smallest old index ending an increasing run of length `k + 1`,
	// `tails[k]` the link recording that run.
	let mut thresholds: Vec<usize> = Vec::new();
	let mut tails: Vec<usize> = Vec::new();
	let mut links: Vec<Link> = Vec::new();
	for (new_index, key) in new_keys.iter().enumerate() {
		let matched = match key {
			Some(key) => keyed.remove(key),
			None => unkeyed.pop_front(),
		};
		let old_index = match matched {
			Some(old_index) => old_index,
			None => continue,
		};

		let k = find_k(&thresholds, old_index);
		links.push(Link {
			new_index,
			old_index,
			prev: k.checked_sub(1).map(|prev| tails[prev]),
		});
		if k == thresholds.len() {
			thresholds.push(old_index);
			tails.push(links.len() - 1);
		} else {
			thresholds[k] = old_index;
			tails[k] = links.len() - 1;
		}
	}

	let mut ops = Vec::with_capacity(old_keys.len() + new_keys.len() - thresholds.len());
	let (mut new_cursor, mut old_cursor) = (new_keys.len(), old_keys.len());
	let mut link = tails.last().copied();
	while let Some(current) = link {
		let Link { new_index, old_index, prev } = links[current];
		while new_cursor > new_index + 1 {
			ops.push(Op::Insert);
			new_cursor -= 1;
		}
		while old_cursor > old_index + 1 {
			ops.push(Op::Delete);
			old_cursor -= 1;
		}
		ops.push(Op::Patch);
		new_cursor -= 1;
		old_cursor -= 1;
		link = prev;
	}
	ops.extend(core::iter::repeat(Op::Insert).take(new_cursor));
	ops.extend(core::iter::repeat(Op::Delete).take(old_cursor));
	ops.reverse();
	ops
}

/// Binary search for the first threshold greater than `old_index`.
#[must_use]
pub fn find_k(thresholds: &[usize], old_index: usize) -> usize {
	let (mut lo, mut hi) = (0, thresholds.len());
	while lo < hi {
		let mid = lo + (hi - lo) / 2;
		if old_index < thresholds[mid] {
			hi = mid;
		} else {
			lo = mid + 1;
		}
	}
	lo
}
