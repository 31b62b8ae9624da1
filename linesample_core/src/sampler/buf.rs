/*!
# Line Sample: Input Buffer
*/

use std::io::Read;

/// # Initial Capacity.
///
/// Matches the original sampler's single `read()` chunk size.
const INITIAL_CAPACITY: usize = 65_536;



#[derive(Debug)]
/// # Input Buffer.
///
/// A growable byte region fed by repeated `read()` calls. Lines are scanned
/// out of it by the sampler; bytes a state still needs (an in-progress
/// footer window, say) are never discarded, but everything before that point
/// is reclaimed by [`InputBuffer::compact_or_grow`] once the buffer gets
/// more than half full.
pub(crate) struct InputBuffer {
	data: Vec<u8>,
	/// # Filled Length.
	nbuf: usize,
	/// # Scanned-To Offset.
	///
	/// Bytes `[0, ibuf)` have already been split into lines; `[ibuf, nbuf)`
	/// have not.
	ibuf: usize,
}

impl Default for InputBuffer {
	fn default() -> Self {
		Self {
			data: vec![0; INITIAL_CAPACITY],
			nbuf: 0,
			ibuf: 0,
		}
	}
}

impl InputBuffer {
	#[must_use]
	/// # Slice of Filled Bytes.
	pub(crate) fn filled(&self) -> &[u8] { &self.data[..self.nbuf] }

	#[must_use]
	/// # Fill Length.
	pub(crate) const fn nbuf(&self) -> usize { self.nbuf }

	#[must_use]
	/// # Scanned-To Offset.
	pub(crate) const fn ibuf(&self) -> usize { self.ibuf }

	/// # Advance the Scan Cursor.
	pub(crate) fn set_ibuf(&mut self, ibuf: usize) {
		debug_assert!(ibuf <= self.nbuf);
		self.ibuf = ibuf;
	}

	#[must_use]
	/// # Scan for the Next Newline.
	///
	/// Looks for a `\n` in `[ibuf, nbuf)`; if found, returns the offset just
	/// past it (the exclusive end of the line, newline included) without
	/// advancing the scan cursor — callers do that themselves via
	/// [`InputBuffer::set_ibuf`] once they've consumed the line.
	pub(crate) fn scan_next_newline(&self) -> Option<usize> {
		self.data[self.ibuf..self.nbuf].iter()
			.position(|&b| b == b'\n')
			.map(|pos| self.ibuf + pos + 1)
	}

	/// # Read More.
	///
	/// Fill whatever spare capacity remains from `src`, returning the
	/// number of bytes read (`0` signals EOF).
	pub(crate) fn read_more<R: Read + ?Sized>(&mut self, src: &mut R) -> std::io::Result<usize> {
		if self.data.len() == self.nbuf { self.grow(); }
		let n = src.read(&mut self.data[self.nbuf..])?;
		self.nbuf += n;
		Ok(n)
	}

	/// # Double Capacity.
	fn grow(&mut self) {
		let new_len = (self.data.len() * 2).max(INITIAL_CAPACITY);
		self.data.resize(new_len, 0);
	}

	/// # Compact or Grow.
	///
	/// Called once the buffer is at least half full. `live_from` is the
	/// lowest offset any outstanding state (the footer ring, the scan
	/// cursor, an in-progress header) still refers to. If that floor is
	/// zero nothing can be reclaimed, so capacity is doubled instead;
	/// otherwise the live tail is moved down to offset zero.
	///
	/// Returns the number of bytes everything was shifted down by; callers
	/// must subtract this from any offset they are holding into this
	/// buffer. A return of `0` means no shift happened (capacity may still
	/// have grown).
	pub(crate) fn compact_or_grow(&mut self, live_from: usize) -> usize {
		if self.nbuf < self.data.len() / 2 { return 0; }

		if live_from == 0 {
			self.grow();
			return 0;
		}

		debug_assert!(live_from <= self.nbuf);
		self.data.copy_within(live_from..self.nbuf, 0);
		self.nbuf -= live_from;
		self.ibuf = self.ibuf.saturating_sub(live_from);
		live_from
	}
}



#[cfg(test)]
mod test {
	use super::*;
	use std::io::Cursor;

	#[test]
	fn t_read_more_fills_and_tracks() {
		let mut buf = InputBuffer::default();
		let mut src = Cursor::new(b"hello world".to_vec());
		let n = buf.read_more(&mut src).expect("read");
		assert_eq!(n, 11);
		assert_eq!(buf.filled(), b"hello world");
		assert_eq!(buf.nbuf(), 11);
	}

	#[test]
	fn t_compact_shifts_and_rebases() {
		let mut buf = InputBuffer::default();
		// Force small capacity behavior by filling past half.
		let mut src = Cursor::new(vec![b'x'; INITIAL_CAPACITY]);
		buf.read_more(&mut src).expect("read");
		buf.set_ibuf(INITIAL_CAPACITY);

		let shift = buf.compact_or_grow(INITIAL_CAPACITY / 2);
		assert_eq!(shift, INITIAL_CAPACITY / 2);
		assert_eq!(buf.nbuf(), INITIAL_CAPACITY / 2);
		assert_eq!(buf.ibuf(), INITIAL_CAPACITY / 2);
	}

	#[test]
	fn t_compact_grows_when_nothing_live() {
		let mut buf = InputBuffer::default();
		let mut src = Cursor::new(vec![b'x'; INITIAL_CAPACITY]);
		buf.read_more(&mut src).expect("read");

		let shift = buf.compact_or_grow(0);
		assert_eq!(shift, 0);
		assert_eq!(buf.nbuf(), INITIAL_CAPACITY);
		assert!(buf.filled().len() <= INITIAL_CAPACITY);
	}
}
