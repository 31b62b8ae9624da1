/*!
# Line Sample!
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

mod cli;

use fyi_msg::Msg;
use linesample_core::{
	LineSampleError,
	Sampler,
	Stats,
};
use std::{
	fs::File,
	io::{
		BufWriter,
		Write,
	},
	path::{
		Path,
		PathBuf,
	},
};



/// # Main.
fn main() {
	match _main() {
		Ok(true) => {},
		Ok(false) => { std::process::exit(1); },
		Err(LineSampleError::PrintHelp) => { println!("{}", LineSampleError::PrintHelp); },
		Err(LineSampleError::PrintVersion) => {
			println!(concat!("linesample v", env!("CARGO_PKG_VERSION")));
		},
		Err(e) => {
			Msg::from(e).eprint();
			std::process::exit(1);
		},
	}
}

#[inline]
/// # Actual Main.
///
/// Returns `Ok(true)` if every input was sampled without error, `Ok(false)`
/// if at least one failed (details having already been printed to stderr).
fn _main() -> Result<bool, LineSampleError> {
	let (opts, paths) = cli::parse()?;
	let verbose = opts.verbose();
	let sampler = Sampler::new(opts);

	let mut ok = true;
	let mut failed: Vec<String> = Vec::new();

	if paths.is_empty() {
		ok &= run_one(&sampler, None, verbose, &mut failed);
	}
	else {
		for path in &paths {
			let label = if path.as_os_str() == "-" { None } else { Some(path.as_path()) };
			ok &= run_one(&sampler, label, verbose, &mut failed);
		}
	}

	if ! failed.is_empty() {
		use oxford_join::OxfordJoin;
		Msg::warning(format!("Unable to read {}.", failed.oxford_and())).eprint();
	}

	Ok(ok)
}

/// # Run One Input.
///
/// Sample a single file (or stdin, if `path` is `None`), writing results to
/// stdout and, if `verbose`, a one-line summary to stderr. Returns `false`
/// (and records `path` in `failed`) if the input couldn't be read.
fn run_one(sampler: &Sampler, path: Option<&Path>, verbose: bool, failed: &mut Vec<String>) -> bool {
	let stdout = std::io::stdout();
	let out = BufWriter::new(stdout.lock());

	let result = match path {
		Some(p) => File::open(p).map_err(|_| ()).and_then(|f| sampler.run(f, out).map_err(|_| ())),
		None => sampler.run(std::io::stdin().lock(), out).map_err(|_| ()),
	};

	match result {
		Ok(stats) => {
			if verbose { print_summary(path, &stats); }
			true
		},
		Err(()) => {
			failed.push(path.map_or_else(|| "<stdin>".to_owned(), |p| p.display().to_string()));
			false
		},
	}
}

/// # Print a Verbose Summary.
fn print_summary(path: Option<&Path>, stats: &Stats) {
	let label: PathBuf = path.map_or_else(|| PathBuf::from("<stdin>"), Path::to_path_buf);
	// A closed/broken stderr has nothing useful to report the failure to
	// either, and the run itself already succeeded; best effort only.
	let _res = writeln!(
		std::io::stderr(),
		"{}: read {} line(s), kept {} ({})",
		label.display(),
		stats.lines_read,
		stats.lines_kept,
		stats.mode,
	);
}
