//! DOS 8.3 Short Name Library
//!
//! Provides functionality to compute the legacy FAT "8.3" short names of a
//! directory's entries, numbering names that collapse onto the same base.

pub mod error;
pub mod listing;
pub mod output;
pub mod shortname;

use log::{debug, info};
use rayon::prelude::*;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

pub use error::{Error, Result};
use listing::{list_batches, Batch, ListOptions};
pub use shortname::{generate, CollisionCounters, ShortName, ShortNameGenerator};

/// Configuration for a listing run
#[derive(Debug, Clone)]
pub struct Config {
	/// Directory whose entries are shortened
	pub path: PathBuf,
	/// Descend into subdirectories
	pub recursive: bool,
	/// Sort names within each directory before numbering
	pub sort: bool,
	/// Skip entries starting with a period
	pub skip_hidden: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			path: PathBuf::from("."),
			recursive: false,
			sort: false,
			skip_hidden: false,
		}
	}
}

impl Config {
	fn list_options(&self) -> ListOptions {
		ListOptions {
			recursive: self.recursive,
			sort: self.sort,
			skip_hidden: self.skip_hidden,
		}
	}
}

/// Statistics about a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
	pub directories: usize,
	pub names: usize,
	/// Names that needed a `~N` tail
	pub tailed: usize,
}

/// One long name and the short name assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	pub long_name: OsString,
	pub short: ShortName,
	pub tailed: bool,
}

/// Short names of one directory, in listing order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedBatch {
	pub directory: PathBuf,
	pub entries: Vec<Entry>,
}

/// Result of a run
#[derive(Debug, Default)]
pub struct Report {
	pub batches: Vec<ShortenedBatch>,
	pub stats: Stats,
}

/// Lists a directory and assigns short names batch by batch
pub struct Converter {
	config: Config,
}

impl Converter {
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Run the listing and shortening
	pub fn run(&self) -> Result<Report> {
		let batches = list_batches(&self.config.path, &self.config.list_options())?;

		// Each batch owns its own collision table, so directories are
		// independent and can be shortened in parallel.
		let batches: Vec<ShortenedBatch> = batches
			.into_par_iter()
			.map(shorten_batch)
			.collect::<Result<_>>()?;

		let mut stats = Stats {
			directories: batches.len(),
			..Default::default()
		};
		for batch in &batches {
			stats.names += batch.entries.len();
			stats.tailed += batch.entries.iter().filter(|e| e.tailed).count();
		}

		info!(
			"shortened {} names in {} directories ({} with numeric tails)",
			stats.names, stats.directories, stats.tailed
		);

		Ok(Report { batches, stats })
	}
}

fn shorten_batch(batch: Batch) -> Result<ShortenedBatch> {
	debug!(
		"shortening {} names in {}",
		batch.names.len(),
		batch.directory.display()
	);
	let entries = shorten_names(batch.names)?;
	Ok(ShortenedBatch {
		directory: batch.directory,
		entries,
	})
}

/// Shorten one batch of names in order, with a fresh collision table.
pub fn shorten_names<I, S>(names: I) -> Result<Vec<Entry>>
where
	I: IntoIterator<Item = S>,
	S: Into<OsString>,
{
	let mut generator = ShortNameGenerator::new();
	names
		.into_iter()
		.map(|name| {
			let long_name: OsString = name.into();
			let (short, tailed) = generator.generate_tailed(name_bytes(&long_name))?;
			Ok(Entry {
				long_name,
				short,
				tailed,
			})
		})
		.collect()
}

fn name_bytes(name: &OsStr) -> &[u8] {
	name.as_encoded_bytes()
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn shorts(entries: &[Entry]) -> Vec<String> {
		entries.iter().map(|e| e.short.to_string()).collect()
	}

	#[test]
	fn test_shorten_names_keeps_order() {
		let entries = shorten_names(["readme.txt", "longfilename.txt", "longfilename2.txt"]).unwrap();
		assert_eq!(
			shorts(&entries),
			vec!["README   TXT", "LONGFI~1 TXT", "LONGFI~2 TXT"]
		);
		assert_eq!(entries[0].long_name, OsString::from("readme.txt"));
		assert!(!entries[0].tailed);
		assert!(entries[1].tailed);
	}

	#[test]
	fn test_each_call_is_a_fresh_batch() {
		let first = shorten_names(["longfilename.txt"]).unwrap();
		let second = shorten_names(["longfilename.txt"]).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn test_overflow_aborts_batch() {
		let names = vec!["longfilename.txt"; 100];
		let err = shorten_names(names).unwrap_err();
		assert!(matches!(err, Error::CollisionOverflow { .. }));
	}

	#[test]
	fn test_default_config_lists_current_directory() {
		let config = Config::default();
		assert_eq!(config.path, PathBuf::from("."));
		assert!(!config.recursive);
	}
}
