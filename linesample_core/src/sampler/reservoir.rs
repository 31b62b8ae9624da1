/*!
# Line Sample: Reservoir Arena
*/

use crate::rng::Pcg32;

/// # Oversample Factor.
///
/// The slot table is allowed to grow to `OVERSAMPLE * k` logical entries
/// before [`Reservoir::compactify`] is forced, trading reservoir churn
/// (frequent small memmoves) for occasional larger ones.
const OVERSAMPLE: usize = 4;



#[derive(Debug)]
/// # Reservoir Arena.
///
/// Holds a uniformly-sampled, variable-length-line interior for fixed-K
/// sampling. Lines are appended to an over-allocated slot table as they're
/// accepted; [`Reservoir::compactify`] periodically collapses that table
/// back down to exactly `k` entries without disturbing the uniform
/// selection.
pub(crate) struct Reservoir {
	arena: Vec<u8>,
	/// # Slot Offsets.
	///
	/// `slots[i]` is the start of logical line `i`; the final entry is the
	/// arena's current fill (the exclusive end of the last line).
	slots: Vec<usize>,
	k: usize,
}

impl Reservoir {
	#[must_use]
	/// # New.
	pub(crate) fn new(k: usize) -> Self {
		Self {
			arena: Vec::new(),
			slots: vec![0],
			k,
		}
	}

	#[must_use]
	/// # Target Size (`K`).
	pub(crate) const fn k(&self) -> usize { self.k }

	#[must_use]
	/// # Current Logical Fill.
	pub(crate) fn len(&self) -> usize { self.slots.len() - 1 }

	#[must_use]
	/// # Needs Compaction?
	///
	/// True once the slot table has grown to the oversample threshold.
	pub(crate) fn needs_compaction(&self) -> bool {
		self.len() >= OVERSAMPLE * self.k.max(1)
	}

	/// # Append a Line.
	pub(crate) fn push(&mut self, line: &[u8]) {
		self.arena.extend_from_slice(line);
		self.slots.push(self.arena.len());
	}

	#[must_use]
	/// # Iterate Over Stored Lines.
	pub(crate) fn lines(&self) -> impl Iterator<Item = &[u8]> {
		self.slots.windows(2).map(|w| &self.arena[w[0]..w[1]])
	}

	/// # Compact Down to Exactly `K` Lines.
	///
	/// Implements algorithm-R reservoir sampling over the *indices* of the
	/// current `M` logical slots (picking `K` survivors uniformly), then
	/// rewrites the arena and slot table in a single left-to-right pass,
	/// copying maximal runs of surviving lines in bulk rather than one at a
	/// time.
	pub(crate) fn compactify(&mut self, rng: &mut Pcg32) {
		let m = self.len();
		let k = self.k;
		if m <= k { return; }

		let mut pick: Vec<usize> = (0..k).collect();
		for i in k..m {
			let j = rng.bounded(k as u32) as usize;
			pick[j] = i;
		}

		let mut mark = vec![false; m];
		for &p in &pick { mark[p] = true; }

		let mut new_arena = Vec::with_capacity(self.arena.len());
		let mut new_slots = Vec::with_capacity(k + 1);
		new_slots.push(0);

		let mut beg = 0;
		while beg < m {
			if !mark[beg] { beg += 1; continue; }
			let mut end = beg + 1;
			while end < m && mark[end] { end += 1; }

			let byte_start = self.slots[beg];
			let byte_end = self.slots[end];
			new_arena.extend_from_slice(&self.arena[byte_start..byte_end]);

			for j in beg..end {
				let line_len = self.slots[j + 1] - self.slots[j];
				let new_start = *new_slots.last().unwrap();
				new_slots.push(new_start + line_len);
			}

			beg = end;
		}

		debug_assert_eq!(new_slots.len(), k + 1);
		self.arena = new_arena;
		self.slots = new_slots;
	}
}



#[cfg(test)]
mod test {
	use super::*;

	fn lines_as_strings(rsv: &Reservoir) -> Vec<String> {
		rsv.lines().map(|l| String::from_utf8_lossy(l).into_owned()).collect()
	}

	#[test]
	fn t_push_and_len() {
		let mut rsv = Reservoir::new(3);
		rsv.push(b"a\n");
		rsv.push(b"bb\n");
		assert_eq!(rsv.len(), 2);
		assert_eq!(lines_as_strings(&rsv), vec!["a\n", "bb\n"]);
	}

	#[test]
	fn t_needs_compaction_at_oversample() {
		let mut rsv = Reservoir::new(2);
		for i in 0..7 {
			rsv.push(format!("{i}\n").as_bytes());
			assert!(!rsv.needs_compaction());
		}
		rsv.push(b"7\n");
		assert!(rsv.needs_compaction());
	}

	#[test]
	fn t_compactify_preserves_k_and_subset() {
		let mut rng = Pcg32::new(99);
		let mut rsv = Reservoir::new(4);
		let all: Vec<String> = (0..16).map(|i| format!("line{i}\n")).collect();
		for l in &all { rsv.push(l.as_bytes()); }

		rsv.compactify(&mut rng);
		assert_eq!(rsv.len(), 4);

		let survivors = lines_as_strings(&rsv);
		for s in &survivors {
			assert!(all.contains(s), "survivor {s} was not in the original set");
		}

		// Relative order is preserved: survivors appear in the same
		// relative sequence as in `all`.
		let idxs: Vec<usize> = survivors.iter()
			.map(|s| all.iter().position(|a| a == s).unwrap())
			.collect();
		let mut sorted = idxs.clone();
		sorted.sort_unstable();
		assert_eq!(idxs, sorted);
	}

	#[test]
	fn t_compactify_noop_when_at_or_under_k() {
		let mut rng = Pcg32::new(1);
		let mut rsv = Reservoir::new(5);
		rsv.push(b"a\n");
		rsv.push(b"b\n");
		rsv.compactify(&mut rng);
		assert_eq!(rsv.len(), 2);
		assert_eq!(lines_as_strings(&rsv), vec!["a\n", "b\n"]);
	}
}
