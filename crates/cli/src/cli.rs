use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rulebook_primitives::{EntityKind, Revision};

#[derive(Parser, Debug)]
#[command(name = "rulebook")]
#[command(about = "Inspect the token registry and load rules data")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config file (TOML)
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging; overrides the configured filter
	#[arg(long, short = 'v')]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// List interned token families
	Families,
	/// List keywords resolvable for an entity kind
	Tokens {
		/// Entity kind, such as Equipment
		kind: EntityKind,
		/// Data revision (defaults to the configured revision)
		#[arg(long, short = 'r')]
		revision: Option<Revision>,
	},
	/// Load a tab-separated record file and print the unparsed records
	Load {
		/// Record file
		file: PathBuf,
		/// Entity kind of every record in the file
		#[arg(long, short = 'k', default_value = "Equipment")]
		kind: EntityKind,
		/// Data revision (defaults to the configured revision)
		#[arg(long, short = 'r')]
		revision: Option<Revision>,
	},
}
