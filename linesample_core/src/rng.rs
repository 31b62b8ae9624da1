/*!
# Line Sample: PRNG
*/

use std::time::{
	SystemTime,
	UNIX_EPOCH,
};



/// # PCG32 (XSH-RR) Generator.
///
/// This is the same 64-bit LCG/xorshift-rotate construction the original
/// sampler used, reimplemented so a given seed always produces the same
/// byte-identical output stream.
pub(crate) struct Pcg32(u64);

impl Pcg32 {
	/// # Multiplier.
	const MULT: u64 = 0x5851_f42d_4c95_7f2d;

	/// # New (Seeded).
	///
	/// A seed of zero is replaced with one derived from the wall clock and
	/// process id, matching the CLI default of "no explicit seed".
	pub(crate) fn new(seed: u64) -> Self {
		let seed =
			if seed == 0 { Self::auto_seed() }
			else { seed };

		let mut out = Self(seed);
		// Match the source's two-step discard-then-bump initialization.
		let _res = out.next_u32();
		out.0 = out.0.wrapping_add(1);
		let _res = out.next_u32();
		out
	}

	/// # Derive a Seed From the Clock and PID.
	fn auto_seed() -> u64 {
		let nanos = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_or(0, |d| d.as_nanos() as u64);
		let pid = u64::from(std::process::id());
		(nanos << 20) ^ pid
	}

	/// # Next Raw `u32`.
	///
	/// Advance the generator and return one uniformly-distributed `u32`.
	pub(crate) fn next_u32(&mut self) -> u32 {
		let old = self.0;
		self.0 = old.wrapping_mul(Self::MULT).wrapping_add(1);

		let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
		let rot = (old >> 59) as u32;
		xorshifted.rotate_right(rot)
	}

	/// # Bounded `u32` in `[0, bound)`.
	///
	/// Uses Lemire's debiased multiply-and-reject technique so small bounds
	/// are never more likely to land near zero.
	pub(crate) fn bounded(&mut self, bound: u32) -> u32 {
		debug_assert!(bound != 0, "bounded range must be non-empty");
		if bound == 1 { return 0; }

		let mut m = u64::from(self.next_u32()) * u64::from(bound);
		let mut lo = (m & 0xFFFF_FFFF) as u32;
		if lo < bound {
			let threshold = bound.wrapping_neg() % bound;
			while lo < threshold {
				m = u64::from(self.next_u32()) * u64::from(bound);
				lo = (m & 0xFFFF_FFFF) as u32;
			}
		}
		(m >> 32) as u32
	}

	/// # Exponential Gap.
	///
	/// Returns `floor(log1p(-u) / log(n/d))` for a uniform draw `u`, used to
	/// skip ahead geometrically once reservoir acceptance has grown rare.
	pub(crate) fn exp_gap(&mut self, n: u64, d: u64) -> u64 {
		let u = f64::from(self.next_u32()) / 4_294_967_296.0_f64;
		let lambda = (n as f64 / d as f64).ln();
		((-u).ln_1p() / lambda) as u64
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_deterministic() {
		let mut a = Pcg32::new(12345);
		let mut b = Pcg32::new(12345);
		for _ in 0..64 {
			assert_eq!(a.next_u32(), b.next_u32());
		}
	}

	#[test]
	fn t_distinct_seeds_diverge() {
		let mut a = Pcg32::new(1);
		let mut b = Pcg32::new(2);
		let seq_a: Vec<u32> = (0..16).map(|_| a.next_u32()).collect();
		let seq_b: Vec<u32> = (0..16).map(|_| b.next_u32()).collect();
		assert_ne!(seq_a, seq_b);
	}

	#[test]
	fn t_bounded_in_range() {
		let mut rng = Pcg32::new(777);
		for bound in [1_u32, 2, 3, 7, 100, 4096] {
			for _ in 0..256 {
				assert!(rng.bounded(bound) < bound);
			}
		}
	}

	#[test]
	fn t_bounded_one_is_always_zero() {
		let mut rng = Pcg32::new(9);
		for _ in 0..8 { assert_eq!(rng.bounded(1), 0); }
	}

	#[test]
	fn t_exp_gap_nonnegative() {
		let mut rng = Pcg32::new(42);
		for _ in 0..64 {
			let gap = rng.exp_gap(1000, 10);
			assert!(gap < u64::MAX);
		}
	}
}
