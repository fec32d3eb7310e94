//! Output writers.
//!
//! Writes shortened batches as plain 12 byte lines or as a JSON document.

use crate::ShortenedBatch;
use anyhow::Result;
use serde_json::{json, Value};
use std::io::Write;

/// Options for the text writer
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
	/// Append the original name after each short name
	pub long: bool,
	/// Print a `<directory>:` header before each batch
	pub headers: bool,
}

/// Write short names, one per line, in batch order.
pub fn write_text<W: Write>(out: &mut W, batches: &[ShortenedBatch], options: TextOptions) -> Result<()> {
	for (i, batch) in batches.iter().enumerate() {
		if options.headers {
			if i > 0 {
				out.write_all(b"\n")?;
			}
			writeln!(out, "{}:", batch.directory.display())?;
		}
		for entry in &batch.entries {
			out.write_all(&entry.short.to_bytes())?;
			if options.long {
				out.write_all(b"  ")?;
				out.write_all(entry.long_name.as_encoded_bytes())?;
			}
			out.write_all(b"\n")?;
		}
	}
	out.flush()?;
	Ok(())
}

/// Build the JSON document for `batches`.
pub fn to_json(batches: &[ShortenedBatch]) -> Value {
	Value::Array(
		batches
			.iter()
			.map(|batch| {
				let entries: Vec<Value> = batch
					.entries
					.iter()
					.map(|entry| {
						json!({
							"name": entry.long_name.to_string_lossy(),
							"short": entry.short.to_string(),
						})
					})
					.collect();
				json!({
					"directory": batch.directory.to_string_lossy(),
					"entries": entries,
				})
			})
			.collect(),
	)
}

/// Write the JSON document for `batches`, pretty printed.
pub fn write_json<W: Write>(out: &mut W, batches: &[ShortenedBatch]) -> Result<()> {
	serde_json::to_writer_pretty(&mut *out, &to_json(batches))?;
	out.write_all(b"\n")?;
	out.flush()?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::shorten_names;
	use pretty_assertions::assert_eq;
	use std::path::PathBuf;

	fn sample() -> Vec<ShortenedBatch> {
		vec![
			ShortenedBatch {
				directory: PathBuf::from("docs"),
				entries: shorten_names(["readme.txt", "longfilename.txt"]).unwrap(),
			},
			ShortenedBatch {
				directory: PathBuf::from("docs/sub"),
				entries: shorten_names(["noext"]).unwrap(),
			},
		]
	}

	#[test]
	fn test_write_text_plain() {
		let mut buf = Vec::new();
		write_text(&mut buf, &sample(), TextOptions::default()).unwrap();
		assert_eq!(
			String::from_utf8(buf).unwrap(),
			"README   TXT\nLONGFI~1 TXT\nNOEXT       \n"
		);
	}

	#[test]
	fn test_write_text_long_with_headers() {
		let mut buf = Vec::new();
		let options = TextOptions {
			long: true,
			headers: true,
		};
		write_text(&mut buf, &sample(), options).unwrap();
		assert_eq!(
			String::from_utf8(buf).unwrap(),
			"docs:\n\
			 README   TXT  readme.txt\n\
			 LONGFI~1 TXT  longfilename.txt\n\
			 \n\
			 docs/sub:\n\
			 NOEXT         noext\n"
		);
	}

	#[test]
	fn test_json_shape() {
		let value = to_json(&sample());
		assert_eq!(value[0]["directory"], "docs");
		assert_eq!(value[0]["entries"][1]["name"], "longfilename.txt");
		assert_eq!(value[0]["entries"][1]["short"], "LONGFI~1 TXT");
		assert_eq!(value[1]["entries"].as_array().unwrap().len(), 1);
	}
}
