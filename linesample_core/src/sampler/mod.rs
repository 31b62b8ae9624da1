/*!
# Line Sample: Sampler
*/

mod buf;
mod footer;
mod reservoir;

use crate::{
	LineSampleError,
	SampleOptions,
};
use crate::rng::Pcg32;
use buf::InputBuffer;
use footer::FooterRing;
use reservoir::Reservoir;
use std::io::{
	Read,
	Write,
};

/// # Elision Marker.
const MARKER: &[u8] = b"...\n";



#[derive(Debug, Clone, Copy)]
/// # Run Summary.
///
/// Returned by [`Sampler::run`] for an optional verbose report.
pub struct Stats {
	/// # Total Lines Read.
	pub lines_read: u64,

	/// # Total Lines Written.
	pub lines_kept: u64,

	/// # Which Mode Ran.
	pub mode: &'static str,
}



#[derive(Debug)]
/// # Sampler.
///
/// Drives one input stream through the header/footer/interior state machine
/// described by a [`SampleOptions`]. A `Sampler` owns its buffers and its
/// own PRNG state; it is built fresh per input and never shared.
pub struct Sampler {
	opts: SampleOptions,
}

impl Sampler {
	#[must_use]
	/// # New.
	pub const fn new(opts: SampleOptions) -> Self { Self { opts } }

	/// # Run.
	///
	/// Stream `input` to `output`, applying the configured header/footer/
	/// interior sampling strategy.
	///
	/// ## Errors
	///
	/// Returns an error if reading from `input` or writing to `output`
	/// fails.
	pub fn run<R, W>(&self, input: R, output: W) -> Result<Stats, LineSampleError>
	where R: Read, W: Write {
		if let Some(k) = self.opts.fixed() {
			if self.opts.footer() == 0 {
				self.run_reservoir_no_footer(k, input, output)
			}
			else {
				self.run_reservoir(k, input, output)
			}
		}
		else {
			self.run_bernoulli(input, output)
		}
	}

	/// # Header-Only (No Footer, No Sampling).
	///
	/// Write exactly the first `h` lines (or fewer, if the input is
	/// shorter) and stop; nothing downstream of them is read or emitted.
	fn run_header_only<R, W>(h: u64, mut buf: InputBuffer, mut input: R, mut output: W) -> Result<Stats, LineSampleError>
	where R: Read, W: Write {
		let mut lines_read: u64 = 0;
		if h == 0 { return Ok(Stats { lines_read, lines_kept: 0, mode: "bernoulli:head-only" }); }

		loop {
			while let Some(end) = buf.scan_next_newline() {
				let start = buf.ibuf();
				buf.set_ibuf(end);
				lines_read += 1;
				output.write_all(&buf.filled()[start..end]).map_err(|_| LineSampleError::IoGeneric)?;
				if lines_read == h {
					return Ok(Stats { lines_read, lines_kept: lines_read, mode: "bernoulli:head-only" });
				}
			}

			let shift = buf.compact_or_grow(buf.ibuf());
			let _ = shift;

			let n = buf.read_more(&mut input).map_err(|_| LineSampleError::IoGeneric)?;
			if n == 0 { break; }
		}

		if buf.ibuf() < buf.nbuf() {
			output.write_all(&buf.filled()[buf.ibuf()..]).map_err(|_| LineSampleError::IoGeneric)?;
			lines_read += 1;
		}
		Ok(Stats { lines_read, lines_kept: lines_read, mode: "bernoulli:head-only" })
	}

	/// # Header/Footer + Bernoulli Interior.
	fn run_bernoulli<R, W>(&self, mut input: R, mut output: W) -> Result<Stats, LineSampleError>
	where R: Read, W: Write {
		let h = self.opts.header() as u64;
		let f = self.opts.footer();
		let rate = self.opts.rate();
		let quiet = self.opts.quiet();

		let mut buf = InputBuffer::default();
		let mut rng = Pcg32::new(self.opts.seed());
		let mut ring = FooterRing::new(f);

		// With no footer and no rate there's nothing to elide or sample:
		// read exactly the header (if any) and stop, matching the header
		// window regardless of whether it's zero or not.
		if f == 0 && rate == 0 {
			return Self::run_header_only(h, buf, input, output);
		}

		let mut lines_read: u64 = 0;
		let mut lines_kept: u64 = 0;
		let mut tidx: u64 = 0; // interior (post-header) line count
		let mut entered_sampling = false;

		'outer: loop {
			while let Some(end) = buf.scan_next_newline() {
				let start = buf.ibuf();
				buf.set_ibuf(end);
				lines_read += 1;

				if lines_read <= h {
					output.write_all(&buf.filled()[start..end]).map_err(|_| LineSampleError::IoGeneric)?;
					lines_kept += 1;
					continue;
				}

				tidx += 1;

				if f == 0 {
					// CAKE: no footer window, sample immediately.
					if !entered_sampling {
						entered_sampling = true;
						if !quiet { output.write_all(MARKER).map_err(|_| LineSampleError::IoGeneric)?; }
					}
					if rate > 0 && (rate == u32::MAX || rng.next_u32() < rate) {
						output.write_all(&buf.filled()[start..end]).map_err(|_| LineSampleError::IoGeneric)?;
						lines_kept += 1;
					}
				}
				else {
					// TAIL/BEEF: track the footer window; sample whatever
					// falls out the back of it.
					ring.set(tidx, start);
					if tidx > f {
						if rate > 0 {
							if !entered_sampling {
								entered_sampling = true;
								if !quiet { output.write_all(MARKER).map_err(|_| LineSampleError::IoGeneric)?; }
							}
							if rate == u32::MAX || rng.next_u32() < rate {
								let evict_idx = tidx - f;
								let beg = ring.get(evict_idx);
								let line_end = ring.get(evict_idx + 1);
								output.write_all(&buf.filled()[beg..line_end]).map_err(|_| LineSampleError::IoGeneric)?;
								lines_kept += 1;
							}
						}
					}
				}
			}

			// Compact or grow, protecting whatever the footer ring still
			// needs (or nothing, pre-interior / no-footer).
			let live_from =
				if f == 0 || tidx == 0 { buf.ibuf() }
				else {
					let oldest = if tidx > f { tidx - f + 1 } else { 1 };
					ring.get(oldest)
				};
			let shift = buf.compact_or_grow(live_from);
			if shift > 0 { ring.rebase(shift); }

			let n = buf.read_more(&mut input).map_err(|_| LineSampleError::IoGeneric)?;
			if n == 0 { break 'outer; }
		}

		// Trailing partial (unterminated) line: only meaningful within the
		// header window; everything else follows the source's behavior of
		// never re-scanning an unterminated tail for a would-be footer
		// line.
		if buf.ibuf() < buf.nbuf() && lines_read < h {
			output.write_all(&buf.filled()[buf.ibuf()..]).map_err(|_| LineSampleError::IoGeneric)?;
			lines_kept += 1;
			lines_read += 1;
		}

		if f == 0 {
			return Ok(Stats { lines_read, lines_kept, mode: "bernoulli:cake" });
		}

		// Footer flush.
		if tidx > f {
			if !entered_sampling && !quiet {
				output.write_all(MARKER).map_err(|_| LineSampleError::IoGeneric)?;
			}
			let beg = ring.get(tidx - f + 1);
			let end = buf.ibuf();
			output.write_all(&buf.filled()[beg..end]).map_err(|_| LineSampleError::IoGeneric)?;
		}
		else if tidx > 0 {
			let beg = ring.get(1);
			let end = buf.ibuf();
			output.write_all(&buf.filled()[beg..end]).map_err(|_| LineSampleError::IoGeneric)?;
		}

		Ok(Stats { lines_read, lines_kept, mode: "bernoulli:tail" })
	}

	/// # Header/Footer + Reservoir Interior.
	fn run_reservoir<R, W>(&self, k: usize, mut input: R, mut output: W) -> Result<Stats, LineSampleError>
	where R: Read, W: Write {
		let h = self.opts.header() as u64;
		let f = self.opts.footer();
		let quiet = self.opts.quiet();

		let mut buf = InputBuffer::default();
		let mut rng = Pcg32::new(self.opts.seed());
		let mut ring = FooterRing::new(f);
		let mut rsv = Reservoir::new(k);

		let mut lines_read: u64 = 0;
		let mut lines_kept: u64 = 0;
		let mut tidx: u64 = 0;
		let mut n: u64 = 0; // candidates considered for the reservoir
		let mut use_gap = false;
		let mut gap_target: u64 = 0;

		loop {
			while let Some(end) = buf.scan_next_newline() {
				let start = buf.ibuf();
				buf.set_ibuf(end);
				lines_read += 1;

				if lines_read <= h {
					output.write_all(&buf.filled()[start..end]).map_err(|_| LineSampleError::IoGeneric)?;
					lines_kept += 1;
					continue;
				}

				tidx += 1;
				ring.set(tidx, start);

				if tidx > f {
					let evict_idx = tidx - f;
					let beg = ring.get(evict_idx);
					let line_end = ring.get(evict_idx + 1);
					let line = buf.filled()[beg..line_end].to_vec();
					n += 1;
					Self::reservoir_consider(&mut rsv, &mut rng, &mut n, &mut use_gap, &mut gap_target, k, &line);
				}
			}

			let live_from =
				if tidx == 0 { buf.ibuf() }
				else {
					let oldest = if tidx > f { tidx - f + 1 } else { 1 };
					ring.get(oldest)
				};
			let shift = buf.compact_or_grow(live_from);
			if shift > 0 { ring.rebase(shift); }

			let got = buf.read_more(&mut input).map_err(|_| LineSampleError::IoGeneric)?;
			if got == 0 { break; }
		}

		if buf.ibuf() < buf.nbuf() && lines_read < h {
			output.write_all(&buf.filled()[buf.ibuf()..]).map_err(|_| LineSampleError::IoGeneric)?;
			lines_kept += 1;
			lines_read += 1;
		}

		if rsv.needs_compaction() || rsv.len() > k { rsv.compactify(&mut rng); }

		if tidx > f {
			// Lines only went missing if more candidates showed up than
			// the reservoir could hold; otherwise everything survived and
			// there's nothing to mark as elided.
			let elided = n > k as u64;
			if elided && !quiet { output.write_all(MARKER).map_err(|_| LineSampleError::IoGeneric)?; }
			for line in rsv.lines() {
				output.write_all(line).map_err(|_| LineSampleError::IoGeneric)?;
				lines_kept += 1;
			}
			if elided && !quiet { output.write_all(MARKER).map_err(|_| LineSampleError::IoGeneric)?; }

			let beg = ring.get(tidx - f + 1);
			let end = buf.ibuf();
			output.write_all(&buf.filled()[beg..end]).map_err(|_| LineSampleError::IoGeneric)?;
			lines_kept += f as u64;
		}
		else if tidx > 0 {
			let beg = ring.get(1);
			let end = buf.ibuf();
			output.write_all(&buf.filled()[beg..end]).map_err(|_| LineSampleError::IoGeneric)?;
			lines_kept += tidx;
		}

		Ok(Stats { lines_read, lines_kept, mode: "reservoir:footer" })
	}

	/// # Reservoir Interior, No Footer.
	fn run_reservoir_no_footer<R, W>(&self, k: usize, mut input: R, mut output: W) -> Result<Stats, LineSampleError>
	where R: Read, W: Write {
		let h = self.opts.header() as u64;
		let quiet = self.opts.quiet();

		let mut buf = InputBuffer::default();
		let mut rng = Pcg32::new(self.opts.seed());
		let mut rsv = Reservoir::new(k);

		let mut lines_read: u64 = 0;
		let mut lines_kept: u64 = 0;
		let mut n: u64 = 0;
		let mut use_gap = false;
		let mut gap_target: u64 = 0;
		let mut any_interior = false;

		loop {
			while let Some(end) = buf.scan_next_newline() {
				let start = buf.ibuf();
				buf.set_ibuf(end);
				lines_read += 1;

				if lines_read <= h {
					output.write_all(&buf.filled()[start..end]).map_err(|_| LineSampleError::IoGeneric)?;
					lines_kept += 1;
					continue;
				}

				any_interior = true;
				n += 1;
				let line = buf.filled()[start..end].to_vec();
				Self::reservoir_consider(&mut rsv, &mut rng, &mut n, &mut use_gap, &mut gap_target, k, &line);
			}

			// Nothing needs to stay live: accepted lines were already
			// copied into the reservoir arena.
			let shift = buf.compact_or_grow(buf.ibuf());
			let _ = shift;

			let got = buf.read_more(&mut input).map_err(|_| LineSampleError::IoGeneric)?;
			if got == 0 { break; }
		}

		if buf.ibuf() < buf.nbuf() && lines_read < h {
			output.write_all(&buf.filled()[buf.ibuf()..]).map_err(|_| LineSampleError::IoGeneric)?;
			lines_kept += 1;
			lines_read += 1;
		}

		if rsv.needs_compaction() || rsv.len() > k { rsv.compactify(&mut rng); }

		// A trailing marker pair is skipped only when the reservoir holds
		// every interior line that arrived (nothing was actually elided).
		let elided = any_interior && n > k as u64;
		if elided {
			if !quiet { output.write_all(MARKER).map_err(|_| LineSampleError::IoGeneric)?; }
			for line in rsv.lines() {
				output.write_all(line).map_err(|_| LineSampleError::IoGeneric)?;
				lines_kept += 1;
			}
			if !quiet { output.write_all(MARKER).map_err(|_| LineSampleError::IoGeneric)?; }
		}
		else {
			for line in rsv.lines() {
				output.write_all(line).map_err(|_| LineSampleError::IoGeneric)?;
				lines_kept += 1;
			}
		}

		Ok(Stats { lines_read, lines_kept, mode: "reservoir:no-footer" })
	}

	/// # Reservoir Acceptance Step.
	///
	/// Shared by both reservoir variants: decide whether candidate `line`
	/// (the `n`-th one considered) joins the reservoir, switching from
	/// direct `K/n` Bernoulli trials to geometric-gap skipping once `n`
	/// crosses the oversample threshold.
	fn reservoir_consider(
		rsv: &mut Reservoir,
		rng: &mut Pcg32,
		n: &mut u64,
		use_gap: &mut bool,
		gap_target: &mut u64,
		k: usize,
		line: &[u8],
	) {
		if !*use_gap {
			let accept = k > 0 && rng.bounded(*n as u32) < k as u32;
			if accept {
				rsv.push(line);
				if rsv.needs_compaction() { rsv.compactify(rng); }
			}
			if *n >= (4 * k.max(1)) as u64 {
				*use_gap = true;
				let base = n.saturating_sub(k as u64).max(1);
				*gap_target = *n + rng.exp_gap(base, (*n).max(1));
			}
		}
		else if *n == *gap_target {
			rsv.push(line);
			if rsv.needs_compaction() { rsv.compactify(rng); }
			let base = n.saturating_sub(k as u64).max(1);
			*gap_target = *n + rng.exp_gap(base, (*n).max(1));
		}
	}
}



#[cfg(test)]
mod test {
	use super::*;

	fn sample(opts: SampleOptions, input: &[u8]) -> (String, Stats) {
		let mut out = Vec::new();
		let stats = Sampler::new(opts).run(input, &mut out).expect("sampler run");
		(String::from_utf8(out).expect("utf8"), stats)
	}

	#[test]
	fn t_no_rate_with_wide_window_still_marks() {
		// header(2) + footer(2) = 4 < 5 lines, so one interior line ('c')
		// is up for grabs; a zero rate drops it, leaving a single marker.
		let input = b"a\nb\nc\nd\ne\n";
		let opts = SampleOptions::default().with_header(2).with_footer(2).with_rate(0);
		let (out, _) = sample(opts, input);
		assert_eq!(out, "a\nb\n...\nd\ne\n");
	}

	#[test]
	fn t_no_sampling_emits_single_marker() {
		let input = b"a\nb\nc\nd\ne\n";
		let opts = SampleOptions::default().with_header(1).with_footer(1).with_rate(0);
		let (out, _) = sample(opts, input);
		assert_eq!(out, "a\n...\ne\n");
	}

	#[test]
	fn t_full_rate_keeps_everything() {
		let input = b"a\nb\nc\nd\ne\n";
		let opts = SampleOptions::default().with_header(1).with_footer(1).with_rate(u32::MAX);
		let (out, _) = sample(opts, input);
		assert_eq!(out, "a\n...\nb\nc\nd\ne\n");
	}

	#[test]
	fn t_quiet_suppresses_markers() {
		let input: String = (1..=1000).map(|i| format!("{i}\n")).collect();
		let opts = SampleOptions::default()
			.with_header(1).with_footer(1)
			.with_rate(crate::options::rate_from_probability(0.5))
			.with_seed(7)
			.with_quiet(true);
		let (out, _) = sample(opts, input.as_bytes());
		assert!(out.starts_with("1\n"));
		assert!(out.ends_with("1000\n"));
		assert!(!out.contains("...\n"));
	}

	#[test]
	fn t_reservoir_no_footer_exact_k() {
		let input: String = (0..10).map(|i| format!("l{i}\n")).collect();
		let opts = SampleOptions::default().with_header(0).with_footer(0)
			.with_fixed(Some(2)).with_seed(1);
		let (out, stats) = sample(opts, input.as_bytes());
		assert_eq!(out.matches("...\n").count(), 2);
		assert_eq!(stats.lines_kept, 2);
	}

	#[test]
	fn t_reservoir_no_footer_header_preserved() {
		let input: String = (0..100).map(|i| format!("l{i}\n")).collect();
		let opts = SampleOptions::default().with_header(2).with_footer(0)
			.with_fixed(Some(3)).with_seed(42);
		let (out, _) = sample(opts, input.as_bytes());
		assert!(out.starts_with("l0\nl1\n"));
	}

	#[test]
	fn t_reservoir_with_footer_keeps_header_and_footer() {
		let input: String = (0..100).map(|i| format!("l{i}\n")).collect();
		let opts = SampleOptions::default().with_header(2).with_footer(3)
			.with_fixed(Some(4)).with_seed(7);
		let (out, _) = sample(opts, input.as_bytes());
		assert!(out.starts_with("l0\nl1\n"));
		assert!(out.ends_with("l97\nl98\nl99\n"));
		assert_eq!(out.matches("...\n").count(), 2);
	}

	#[test]
	fn t_seed_is_deterministic() {
		let input: String = (0..500).map(|i| format!("row-{i}\n")).collect();
		let make = || SampleOptions::default().with_header(2).with_footer(2)
			.with_fixed(Some(5)).with_seed(123);
		let (out1, _) = sample(make(), input.as_bytes());
		let (out2, _) = sample(make(), input.as_bytes());
		assert_eq!(out1, out2);
	}
}
