/*!
# Line Sample: Sampling Options
*/

/// # FLAG: Quiet (suppress elision markers).
const FLAG_QUIET: u8 = 0b0000_0001;

/// # FLAG: Verbose (print a run summary).
const FLAG_VERBOSE: u8 = 0b0000_0010;

/// # Default Header/Footer Size.
const DEFAULT_WINDOW: usize = 5;

/// # Default Bernoulli Rate (as a `u32` threshold; ~10%).
const DEFAULT_RATE: u32 = u32::MAX / 10;



#[derive(Debug, Clone, Copy)]
/// # Sample Options.
///
/// This struct holds the header/footer window sizes, the interior sampling
/// strategy, the seed, and presentation flags.
///
/// Options are set using builder-style methods, like:
///
/// ```
/// use linesample_core::SampleOptions;
///
/// let opts = SampleOptions::default()
///     .with_girdle(3)
///     .with_fixed(10);
///
/// assert_eq!(opts.header(), 3);
/// assert_eq!(opts.footer(), 3);
/// assert_eq!(opts.fixed(), Some(10));
/// ```
pub struct SampleOptions {
	header: usize,
	footer: usize,
	rate: u32,
	fixed: Option<usize>,
	seed: u64,
	flags: u8,
}

impl Default for SampleOptions {
	fn default() -> Self {
		Self {
			header: DEFAULT_WINDOW,
			footer: DEFAULT_WINDOW,
			rate: DEFAULT_RATE,
			fixed: None,
			seed: 0,
			flags: 0,
		}
	}
}

impl SampleOptions {
	#[must_use]
	/// # With Header Size.
	pub const fn with_header(self, header: usize) -> Self {
		Self { header, ..self }
	}

	#[must_use]
	/// # With Footer Size.
	pub const fn with_footer(self, footer: usize) -> Self {
		Self { footer, ..self }
	}

	#[must_use]
	/// # With Girdle.
	///
	/// Shorthand for setting both the header and footer size to the same
	/// value.
	pub const fn with_girdle(self, girdle: usize) -> Self {
		Self { header: girdle, footer: girdle, ..self }
	}

	#[must_use]
	/// # With Rate.
	///
	/// Set the Bernoulli keep-probability as a pre-encoded `u32` threshold
	/// (`floor(2^32 * p)`); a line is kept when a fresh uniform `u32` draw
	/// is less than this value. This is ignored once [`with_fixed`](Self::with_fixed)
	/// sets a non-zero reservoir size — fixed-K sampling always dominates.
	pub const fn with_rate(self, rate: u32) -> Self {
		Self { rate, ..self }
	}

	#[must_use]
	/// # With Fixed Reservoir Size.
	///
	/// `Some(0)` and `None` are equivalent: no reservoir, no Bernoulli
	/// fallback unless [`rate`](Self::rate) is separately non-zero. Any
	/// `Some(k)` with `k > 0` forces reservoir-sampling mode regardless of
	/// the configured rate.
	pub const fn with_fixed(self, fixed: Option<usize>) -> Self {
		Self { fixed, ..self }
	}

	#[must_use]
	/// # With Seed.
	///
	/// A seed of zero means "derive one from the clock and process id".
	pub const fn with_seed(self, seed: u64) -> Self {
		Self { seed, ..self }
	}

	#[must_use]
	/// # With Quiet.
	///
	/// Suppress the `"...\n"` elision markers.
	pub const fn with_quiet(self, quiet: bool) -> Self {
		let flags =
			if quiet { self.flags | FLAG_QUIET }
			else { self.flags & ! FLAG_QUIET };
		Self { flags, ..self }
	}

	#[must_use]
	/// # With Verbose.
	///
	/// Print a one-line run summary to stderr after each input finishes.
	pub const fn with_verbose(self, verbose: bool) -> Self {
		let flags =
			if verbose { self.flags | FLAG_VERBOSE }
			else { self.flags & ! FLAG_VERBOSE };
		Self { flags, ..self }
	}
}

impl SampleOptions {
	#[must_use]
	/// # Header Size.
	pub const fn header(&self) -> usize { self.header }

	#[must_use]
	/// # Footer Size.
	pub const fn footer(&self) -> usize { self.footer }

	#[must_use]
	/// # Bernoulli Threshold.
	///
	/// Returns the raw `u32` keep-threshold; a line is kept iff a fresh
	/// uniform draw is less than this value. `u32::MAX` or above means
	/// "keep everything".
	pub const fn rate(&self) -> u32 { self.rate }

	#[must_use]
	/// # Fixed Reservoir Size.
	///
	/// Returns `None` when reservoir sampling is disabled (the caller
	/// should fall back to [`rate`](Self::rate)-based Bernoulli sampling,
	/// if any).
	pub const fn fixed(&self) -> Option<usize> {
		match self.fixed {
			Some(0) | None => None,
			Some(k) => Some(k),
		}
	}

	#[must_use]
	/// # Seed.
	pub const fn seed(&self) -> u64 { self.seed }

	#[must_use]
	/// # Quiet?
	pub const fn quiet(&self) -> bool { FLAG_QUIET == self.flags & FLAG_QUIET }

	#[must_use]
	/// # Verbose?
	pub const fn verbose(&self) -> bool { FLAG_VERBOSE == self.flags & FLAG_VERBOSE }

	#[must_use]
	/// # Sampling Is a No-Op?
	///
	/// True when neither fixed-K nor Bernoulli sampling will select
	/// anything, i.e. the interior is dropped entirely (aside from header
	/// and footer).
	pub const fn no_sampling(&self) -> bool {
		self.fixed().is_none() && self.rate == 0
	}
}



/// # Rate From a Float.
///
/// Converts a probability in `[0, 1]` into the `u32` threshold `SampleOptions`
/// stores internally. Values greater than `1.0` are interpreted as `1/x`
/// (matching the CLI's `--rate` convention); values are clamped to
/// `[0.0, 1.0]` after that conversion.
#[must_use]
pub fn rate_from_probability(mut p: f64) -> u32 {
	if p > 1.0 { p = 1.0 / p; }
	if p <= 0.0 { return 0; }
	if p >= 1.0 { return u32::MAX; }
	(p * 4_294_967_296.0_f64) as u32
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_defaults() {
		let opts = SampleOptions::default();
		assert_eq!(opts.header(), DEFAULT_WINDOW);
		assert_eq!(opts.footer(), DEFAULT_WINDOW);
		assert_eq!(opts.fixed(), None);
		assert!(! opts.quiet());
		assert!(! opts.verbose());
	}

	#[test]
	fn t_girdle() {
		let opts = SampleOptions::default().with_girdle(9);
		assert_eq!(opts.header(), 9);
		assert_eq!(opts.footer(), 9);
	}

	#[test]
	fn t_fixed_zero_is_none() {
		let opts = SampleOptions::default().with_fixed(Some(0));
		assert_eq!(opts.fixed(), None);
		assert!(opts.no_sampling() || opts.rate() != 0);
	}

	#[test]
	fn t_fixed_dominates() {
		let opts = SampleOptions::default().with_rate(u32::MAX).with_fixed(Some(4));
		assert_eq!(opts.fixed(), Some(4));
	}

	#[test]
	fn t_quiet_verbose_independent() {
		let opts = SampleOptions::default().with_quiet(true).with_verbose(true);
		assert!(opts.quiet());
		assert!(opts.verbose());
		let opts = opts.with_quiet(false);
		assert!(! opts.quiet());
		assert!(opts.verbose());
	}

	#[test]
	fn t_rate_from_probability() {
		assert_eq!(rate_from_probability(0.0), 0);
		assert_eq!(rate_from_probability(1.0), u32::MAX);
		assert_eq!(rate_from_probability(-1.0), 0);
		// 1/4 should be roughly a quarter of u32::MAX.
		let q = rate_from_probability(0.25);
		assert!(q > u32::MAX / 5 && q < u32::MAX / 3);
		// Values above 1 are read as 1/x.
		assert_eq!(rate_from_probability(4.0), rate_from_probability(0.25));
	}
}
