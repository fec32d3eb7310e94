//! Error type shared by the lister and the short name generator.

use std::io;
use std::path::PathBuf;

/// Errors produced while listing or shortening a batch of names.
#[derive(thiserror::Error, Debug)]
pub enum Error {
	/// The directory (or an entry below it) could not be enumerated.
	#[error("cannot read directory {}", path.display())]
	Listing {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The path exists but is not a directory.
	#[error("not a directory: {}", .0.display())]
	NotADirectory(PathBuf),

	/// More than 99 names collided on the same truncated base in one batch.
	#[error("too many names collide on short base {base:?} (limit is 99)")]
	CollisionOverflow { base: String },
}

impl Error {
	pub fn listing(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::Listing {
			path: path.into(),
			source,
		}
	}

	pub fn collision_overflow(base: &[u8]) -> Self {
		Self::CollisionOverflow {
			base: String::from_utf8_lossy(base).into_owned(),
		}
	}

	/// Whether this error came from enumerating the filesystem.
	pub fn is_listing(&self) -> bool {
		matches!(self, Self::Listing { .. } | Self::NotADirectory(_))
	}
}

/// Result alias for the library.
pub type Result<T> = std::result::Result<T, Error>;
