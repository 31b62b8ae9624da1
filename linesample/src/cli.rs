/*!
# Line Sample: CLI
*/

use argyle::Argument;
use dactyl::traits::BytesToUnsigned;
use linesample_core::{
	rate_from_probability,
	LineSampleError,
	SampleOptions,
};
use std::path::PathBuf;



/// # Parsed CLI State.
///
/// Final sampling options plus whatever file paths were named on the
/// command line (empty means "read stdin").
pub(super) type Parsed = (SampleOptions, Vec<PathBuf>);



/// # Parse Options.
pub(super) fn parse() -> Result<Parsed, LineSampleError> {
	let args = argyle::args()
		.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")));

	let mut opts = SampleOptions::default();
	let mut paths = Vec::new();
	let mut rate_set = false;
	let mut fixed_set = false;

	for arg in args {
		match arg {
			Argument::Key("-h" | "--help") => return Err(LineSampleError::PrintHelp),
			Argument::Key("-q" | "--quiet") => { opts = opts.with_quiet(true); },
			Argument::Key("-v" | "--verbose") => { opts = opts.with_verbose(true); },
			Argument::Key("-V" | "--version") => return Err(LineSampleError::PrintVersion),

			Argument::KeyWithValue("-H" | "--header", s) => {
				let v = parse_usize(&s, "-H/--header")?;
				opts = opts.with_header(v);
			},
			Argument::KeyWithValue("-f" | "--footer", s) => {
				let v = parse_usize(&s, "-f/--footer")?;
				opts = opts.with_footer(v);
			},
			Argument::KeyWithValue("-g" | "--girdle", s) => {
				let v = parse_usize(&s, "-g/--girdle")?;
				opts = opts.with_girdle(v);
			},
			Argument::KeyWithValue("-r" | "--rate", s) => {
				let v = parse_rate(&s)?;
				opts = opts.with_rate(v);
				rate_set = true;
			},
			Argument::KeyWithValue("-n" | "--fixed", s) => {
				let v = parse_usize(&s, "-n/--fixed")?;
				opts = opts.with_fixed(Some(v));
				fixed_set = true;
			},
			Argument::KeyWithValue("--seed", s) => {
				let v = u64::btou(s.trim_ascii().as_bytes())
					.ok_or(LineSampleError::CliParse("--seed"))?;
				opts = opts.with_seed(v);
			},

			Argument::Other(s) => { paths.push(PathBuf::from(s)); },

			_ => {},
		}
	}

	// With neither -r/--rate nor -n/--fixed given explicitly, and stdout
	// attached to a terminal, size the reservoir to whatever fits on
	// screen alongside the header and footer rather than defaulting to a
	// plain 10% Bernoulli rate nobody asked for.
	if ! rate_set && ! fixed_set {
		if let Some(k) = auto_fixed(opts.header(), opts.footer()) {
			opts = opts.with_fixed(Some(k));
		}
	}

	Ok((opts, paths))
}

/// # Auto-Size the Reservoir From the Terminal.
///
/// Returns `None` if stdout isn't a TTY, or the screen is too small to show
/// the header, footer, and at least a handful of sampled lines besides.
fn auto_fixed(header: usize, footer: usize) -> Option<usize> {
	use std::io::IsTerminal;
	if ! std::io::stdout().is_terminal() { return None; }

	let (_, rows) = terminal_size::terminal_size()?;
	let rows = usize::from(rows.0);
	let reserved = header + footer + 5;
	if rows <= reserved { None }
	else { Some(rows - reserved) }
}



/// # Parse an Unsigned CLI Value.
fn parse_usize(s: &str, key: &'static str) -> Result<usize, LineSampleError> {
	let v = u32::btou(s.trim_ascii().as_bytes()).ok_or(LineSampleError::CliParse(key))?;
	Ok(v as usize)
}

/// # Parse a Rate.
///
/// A trailing `%` reads the number as a percentage; otherwise the value is
/// read as a raw probability, with anything greater than `1` inverted to
/// `1/x` (so `--rate 100` and `--rate 1%` are equivalent).
fn parse_rate(s: &str) -> Result<u32, LineSampleError> {
	let raw = s.trim_ascii();
	let (num, pct) = raw.strip_suffix('%').map_or((raw, false), |s| (s, true));
	let p: f64 = num.parse().map_err(|_| LineSampleError::CliParse("-r/--rate"))?;

	if p < 0.0 {
		return Err(LineSampleError::Config(format!("-r/--rate cannot be negative: {raw}")));
	}
	if pct && p > 100.0 {
		return Err(LineSampleError::Config(format!("-r/--rate percentage cannot exceed 100%: {raw}")));
	}

	Ok(rate_from_probability(if pct { p / 100.0 } else { p }))
}
