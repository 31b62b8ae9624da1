/*!
# Line Sample: Errors
*/

use fyi_msg::Msg;
use std::{
	error::Error,
	fmt,
	path::PathBuf,
};



#[cfg(feature = "bin")]
/// # Help Text.
const HELP: &str = concat!(r#"
   _)          _|
    |   _ \    |   -_)   __|   _` |  __ `__ \    __ \    |   _ \
    |   __/    |  \__ \  (     (   |  |   |  |   |   |  (    __/
   _| \___|   _|  ____/ \___| \__,_| _|  _|  _|  .__/  \___\___|
                                                _|
"#, " linesample v", env!("CARGO_PKG_VERSION"), r#"
 A streaming head/tail/reservoir line sampler.

USAGE:
    linesample [OPTIONS] [FILE(S)]...

OPTIONS:
    -H, --header <NUM>    Always keep the first <NUM> lines. [default: 5]
    -f, --footer <NUM>    Always keep the last <NUM> lines. [default: 5]
    -g, --girdle <NUM>    Shorthand for --header <NUM> --footer <NUM>.
    -r, --rate <NUM>      Keep each interior line independently with this
                          probability. A trailing % reads as a percentage;
                          a value greater than 1 reads as 1/<NUM>.
                          [default: 0.1]
    -n, --fixed <NUM>     Keep a uniform random sample of exactly <NUM>
                          interior lines instead. 0 disables sampling.
                          Overrides --rate when set.
        --seed <NUM>      Seed the random number generator.
                          [default: derived from the clock and process id]
    -q, --quiet           Suppress the "..." elision markers.
    -v, --verbose         Print a one-line run summary to STDERR.
    -h, --help            Print help information and exit.
    -V, --version         Print version information and exit.

    With no FILE, or when FILE is "-", standard input is read.
"#);



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Errors.
pub enum LineSampleError {
	/// # Invalid/out-of-range CLI value.
	Config(String),

	/// # I/O failure reading or writing a particular path.
	Io(PathBuf),

	/// # I/O failure with no associated path (e.g. stdin/stdout).
	IoGeneric,

	#[cfg(feature = "bin")]
	/// # Invalid CLI arg.
	CliArg(String),

	#[cfg(feature = "bin")]
	/// # CLI Parsing failure.
	CliParse(&'static str),

	#[cfg(feature = "bin")]
	/// # Print Help (Not an Error).
	PrintHelp,

	#[cfg(feature = "bin")]
	/// # Print Version (Not an Error).
	PrintVersion,
}

impl Error for LineSampleError {}

impl From<LineSampleError> for Msg {
	#[inline]
	fn from(src: LineSampleError) -> Self { Self::error(src.to_string()) }
}

impl fmt::Display for LineSampleError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Config(s) => write!(f, "Invalid setting: {s}."),
			Self::Io(p) => write!(f, "Unable to read {}.", p.display()),
			Self::IoGeneric => f.write_str("Read error."),

			#[cfg(feature = "bin")]
			Self::CliArg(s) => write!(f, "Invalid CLI option: {s}"),

			#[cfg(feature = "bin")]
			Self::CliParse(s) => write!(f, "Unable to parse {s}."),

			#[cfg(feature = "bin")]
			Self::PrintHelp => f.write_str(HELP),

			#[cfg(feature = "bin")]
			Self::PrintVersion => f.write_str(concat!("linesample v", env!("CARGO_PKG_VERSION"))),
		}
	}
}
