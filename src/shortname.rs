//! Short name generator.
//!
//! Turns long filenames into DOS 8.3 short names: uppercased, stripped of
//! characters FAT cannot store, split into base and extension, and given a
//! `~N` tail when the name had to be changed.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// Width of the base name field.
pub const NAME_LEN: usize = 8;
/// Width of the extension field.
pub const EXT_LEN: usize = 3;
/// Length of the base kept in front of a numeric tail.
const TAIL_BASE_LEN: usize = 6;
/// Largest tail number the two-digit scheme can represent.
const MAX_TAIL: u8 = 99;

/// A fixed-width 8.3 short name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShortName {
	name: [u8; NAME_LEN],
	ext: [u8; EXT_LEN],
}

impl ShortName {
	/// Build a short name from a base and extension, padding with spaces and
	/// truncating anything past the field widths.
	pub fn new(base: &[u8], ext: &[u8]) -> Self {
		Self {
			name: padded(base),
			ext: padded(ext),
		}
	}

	/// The space-padded base name field.
	pub fn name(&self) -> &[u8; NAME_LEN] {
		&self.name
	}

	/// The space-padded extension field.
	pub fn ext(&self) -> &[u8; EXT_LEN] {
		&self.ext
	}

	/// The 12 byte `"NAME     EXT"` rendering.
	pub fn to_bytes(&self) -> [u8; NAME_LEN + 1 + EXT_LEN] {
		let mut out = [b' '; NAME_LEN + 1 + EXT_LEN];
		out[..NAME_LEN].copy_from_slice(&self.name);
		out[NAME_LEN + 1..].copy_from_slice(&self.ext);
		out
	}
}

/// Renders exactly 12 characters; bytes above 0x7f map to the Latin-1 code
/// point with the same value.
impl fmt::Display for ShortName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s: String = self.to_bytes().iter().map(|&b| b as char).collect();
		f.write_str(&s)
	}
}

fn padded<const N: usize>(src: &[u8]) -> [u8; N] {
	let mut field = [b' '; N];
	let len = src.len().min(N);
	field[..len].copy_from_slice(&src[..len]);
	field
}

/// Collision counters for one batch, keyed by the truncated base.
#[derive(Debug, Default, Clone)]
pub struct CollisionCounters {
	counts: HashMap<Vec<u8>, u8>,
}

impl CollisionCounters {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of collisions recorded so far for `base`.
	pub fn get(&self, base: &[u8]) -> u8 {
		self.counts.get(base).copied().unwrap_or(0)
	}

	/// Record one more collision on `base` and return the new count.
	///
	/// Fails without touching the table when the count would exceed 99.
	pub fn bump(&mut self, base: &[u8]) -> Result<u8> {
		let next = self.get(base) + 1;
		if next > MAX_TAIL {
			return Err(Error::collision_overflow(base));
		}
		self.counts.insert(base.to_vec(), next);
		Ok(next)
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}
}

/// Stateful generator for one batch of names.
///
/// Tail numbers depend on how many earlier names of the same batch collapsed
/// onto the same base, so a generator must see the batch in order and must
/// not be reused for another batch.
#[derive(Debug, Default)]
pub struct ShortNameGenerator {
	counters: CollisionCounters,
}

impl ShortNameGenerator {
	/// Create a generator with an empty collision table.
	pub fn new() -> Self {
		Self {
			counters: CollisionCounters::new(),
		}
	}

	/// Generate the short name for the next name in the batch.
	pub fn generate(&mut self, raw: impl AsRef<[u8]>) -> Result<ShortName> {
		generate(raw.as_ref(), &mut self.counters)
	}

	/// Like [`generate`](Self::generate), also reporting whether a numeric
	/// tail was appended.
	pub fn generate_tailed(&mut self, raw: impl AsRef<[u8]>) -> Result<(ShortName, bool)> {
		shorten(raw.as_ref(), &mut self.counters)
	}

	pub fn counters(&self) -> &CollisionCounters {
		&self.counters
	}
}

/// Generate the short name for `raw`, recording any collision in `counters`.
pub fn generate(raw: &[u8], counters: &mut CollisionCounters) -> Result<ShortName> {
	shorten(raw, counters).map(|(short, _)| short)
}

fn shorten(raw: &[u8], counters: &mut CollisionCounters) -> Result<(ShortName, bool)> {
	let mut name = raw.to_ascii_uppercase();
	let (separator, mut modified) = sanitize(&mut name);

	let ext = match separator {
		Some(idx) => {
			let ext = name[idx + 1..].to_vec();
			name.truncate(idx);
			ext
		}
		None => Vec::new(),
	};

	if name.len() > NAME_LEN || ext.len() > EXT_LEN {
		modified = true;
	}

	if modified {
		name.truncate(TAIL_BASE_LEN);
		let num = counters.bump(&name)?;
		if num < 10 {
			name.extend_from_slice(&[b'~', b'0' + num]);
		} else {
			name.pop();
			name.extend_from_slice(&[b'~', b'0' + num / 10, b'0' + num % 10]);
		}
	}

	Ok((ShortName::new(&name, &ext), modified))
}

/// Scan `name` from the last byte down to index 1, replacing unstorable
/// bytes, dropping spaces and extra periods, and locating the extension
/// separator. Index 0 is never touched.
///
/// Returns the separator index and whether the name was changed.
fn sanitize(name: &mut Vec<u8>) -> (Option<usize>, bool) {
	let mut separator: Option<usize> = None;
	let mut modified = false;

	let mut i = name.len();
	while i > 1 {
		i -= 1;
		let c = name[i];
		if c >= 0x80 || c == b'+' {
			name[i] = b'_';
			modified = true;
		} else if c == b'.' && separator.is_none() {
			separator = Some(i);
		} else if c == b' ' || c == b'.' {
			name.remove(i);
			// A separator at index 0 decremented again means there is none.
			separator = separator.and_then(|s| s.checked_sub(1));
			modified = true;
			// Look at whatever shifted into slot i, if anything did.
			if i < name.len() {
				i += 1;
			}
		}
	}

	(separator, modified)
}
