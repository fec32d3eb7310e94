//! DOS 8.3 Short Name CLI
//!
//! Lists the entries of a directory as the 8.3 short names a FAT filesystem
//! would assign them.

use anyhow::{Context, Result};
use clap::Parser;
use fat_shortname::output::{write_json, write_text, TextOptions};
use fat_shortname::{Config, Converter};
use log::LevelFilter;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fat-shortname")]
#[command(version)]
#[command(about = "Print the DOS 8.3 short names of a directory's entries", long_about = None)]
struct Args {
	/// Directory to list
	#[arg(value_name = "PATH", default_value = ".")]
	path: PathBuf,

	/// List subdirectories too, numbering each directory separately
	#[arg(short, long)]
	recursive: bool,

	/// Sort names before numbering instead of using the OS listing order
	#[arg(short, long)]
	sort: bool,

	/// Skip entries whose name starts with a period
	#[arg(long)]
	skip_hidden: bool,

	/// Print the original name after each short name
	#[arg(short, long)]
	long: bool,

	/// Print a JSON document instead of plain lines
	#[arg(long, conflicts_with = "long")]
	json: bool,

	/// Print progress details to stderr
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<()> {
	let args = Args::parse();

	let level = if args.verbose {
		LevelFilter::Debug
	} else {
		LevelFilter::Warn
	};
	env_logger::Builder::from_default_env()
		.filter_level(level)
		.init();

	let config = Config {
		path: args.path.clone(),
		recursive: args.recursive,
		sort: args.sort,
		skip_hidden: args.skip_hidden,
	};

	let report = Converter::new(config)
		.run()
		.with_context(|| format!("Failed to list {}", args.path.display()))?;

	let stdout = io::stdout();
	let mut out = BufWriter::new(stdout.lock());
	if args.json {
		write_json(&mut out, &report.batches)?;
	} else {
		let options = TextOptions {
			long: args.long,
			headers: args.recursive,
		};
		write_text(&mut out, &report.batches, options)?;
	}

	Ok(())
}
