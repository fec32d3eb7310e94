//! Directory listing.
//!
//! Produces the batches the generator runs over: one batch per directory,
//! holding the names of that directory's entries in listing order.

use crate::error::{Error, Result};
use log::debug;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options controlling how a directory is listed.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
	/// Descend into subdirectories, one batch per directory
	pub recursive: bool,
	/// Sort names byte-wise within each batch instead of keeping OS order
	pub sort: bool,
	/// Skip entries whose name starts with a period
	pub skip_hidden: bool,
}

/// Names of one directory's entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
	pub directory: PathBuf,
	pub names: Vec<OsString>,
}

/// List `root` into batches.
///
/// Fails if `root` is not a readable directory, or if any directory below it
/// cannot be read in recursive mode.
pub fn list_batches(root: &Path, options: &ListOptions) -> Result<Vec<Batch>> {
	let meta = fs::metadata(root).map_err(|e| Error::listing(root, e))?;
	if !meta.is_dir() {
		return Err(Error::NotADirectory(root.to_path_buf()));
	}

	let mut walker = WalkDir::new(root).min_depth(1);
	if !options.recursive {
		walker = walker.max_depth(1);
	}
	if options.sort {
		walker = walker.sort_by(|a, b| {
			a.file_name()
				.as_encoded_bytes()
				.cmp(b.file_name().as_encoded_bytes())
		});
	}

	// Walk order interleaves a directory's children with its descendants, so
	// group by parent while keeping the order directories were first seen.
	let mut batches = vec![Batch {
		directory: root.to_path_buf(),
		names: Vec::new(),
	}];
	let mut index: HashMap<PathBuf, usize> = HashMap::new();
	index.insert(root.to_path_buf(), 0);

	let skip_hidden = options.skip_hidden;
	let entries = walker
		.into_iter()
		.filter_entry(move |e| {
			e.depth() == 0 || !(skip_hidden && is_hidden(e.file_name().as_encoded_bytes()))
		});

	for entry in entries {
		let entry = entry.map_err(|e| walk_error(root, e))?;
		let parent = entry.path().parent().unwrap_or(root).to_path_buf();

		let slot = match index.get(&parent) {
			Some(&slot) => slot,
			None => {
				index.insert(parent.clone(), batches.len());
				batches.push(Batch {
					directory: parent,
					names: Vec::new(),
				});
				batches.len() - 1
			}
		};
		batches[slot].names.push(entry.file_name().to_os_string());

		if options.recursive && entry.file_type().is_dir() && !index.contains_key(entry.path()) {
			index.insert(entry.path().to_path_buf(), batches.len());
			batches.push(Batch {
				directory: entry.path().to_path_buf(),
				names: Vec::new(),
			});
		}
	}

	debug!(
		"listed {} director{} under {}",
		batches.len(),
		if batches.len() == 1 { "y" } else { "ies" },
		root.display()
	);

	Ok(batches)
}

fn is_hidden(name: &[u8]) -> bool {
	name.first() == Some(&b'.')
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
	let path = err.path().unwrap_or(root).to_path_buf();
	let source = err
		.into_io_error()
		.unwrap_or_else(|| io::Error::other("filesystem loop detected"));
	Error::listing(path, source)
}
