//! Subcommand implementations. Output goes to the supplied writer.

use std::collections::BTreeMap;
use std::io::Write;

use rulebook_primitives::{CdomObject, EntityKind, ObjectId, ObjectStore, Revision};
use rulebook_registry::{
	CdomToken, CollectingSink, DiagnosticKind, LoadContext, TokenFamilyPool, WELL_KNOWN,
};

use crate::lst::{self, Field};

/// Prints one line per interned family: revision, well-known name, token count.
pub fn families(pool: &TokenFamilyPool, out: &mut impl Write) -> anyhow::Result<()> {
	for family in pool.all_families() {
		let name = WELL_KNOWN
			.iter()
			.find(|w| w.revision == family.revision())
			.map_or("-", |w| w.name);
		let tokens: usize = family
			.token_kinds()
			.into_iter()
			.map(|kind| family.get_tokens(kind).len())
			.sum();
		writeln!(out, "{}\t{name}\t{tokens}", family.revision())?;
	}
	Ok(())
}

/// Prints every keyword `kind` resolves through the chain for `revision`,
/// with the revision of the family that supplies it.
pub fn tokens(
	pool: &TokenFamilyPool,
	kind: EntityKind,
	revision: Revision,
	out: &mut impl Write,
) -> anyhow::Result<()> {
	let ctx = LoadContext::new(pool, revision);
	let mut resolved: BTreeMap<String, (Revision, &'static str)> = BTreeMap::new();
	for family in ctx.chain() {
		for token in family.get_tokens(kind) {
			resolved
				.entry(token.token_name().to_string())
				.or_insert((family.revision(), token.impl_name()));
		}
	}
	for (name, (revision, impl_name)) in resolved {
		writeln!(out, "{name}\t{revision}\t{impl_name}")?;
	}
	Ok(())
}

/// Counts reported while loading one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
	pub records: usize,
	pub errors: usize,
	pub warnings: usize,
	pub unknown: usize,
}

impl LoadSummary {
	pub fn failed(&self) -> bool {
		self.errors > 0
	}
}

/// Applies every record in `text` to a fresh store, resolves deferred
/// references, and prints each object as `name<TAB>KEY:value...`.
pub fn load(
	ctx: &LoadContext<'_>,
	sink: &CollectingSink,
	kind: EntityKind,
	text: &str,
	out: &mut impl Write,
) -> anyhow::Result<LoadSummary> {
	let before = sink.len();
	let mut store = ObjectStore::new();
	let mut records = 0;

	for record in lst::records(text) {
		let id = ObjectId::new(kind, record.name);
		let mut obj = if record.modify {
			match store.get(&id) {
				Some(existing) => existing.clone(),
				None => {
					ctx.lst_error(format!(
						"line {}: unable to find {} to modify",
						record.line, record.name
					));
					continue;
				}
			}
		} else {
			if store.contains(&id) {
				ctx.lst_warning(format!(
					"line {}: {} redefined; earlier definition replaced",
					record.line, record.name
				));
			}
			CdomObject::new(kind, record.name)
		};

		for field in &record.fields {
			match field {
				Field::Token { key, value } => {
					if ctx.process_token(&mut obj, key, value).is_fail() {
						tracing::debug!(line = record.line, %key, %value, "field rejected");
					}
				}
				Field::Malformed(raw) => ctx.lst_error(format!(
					"line {}: field '{raw}' is missing a ':' separator",
					record.line
				)),
			}
		}
		store.insert(obj);
		records += 1;
	}

	if !ctx.resolve_deferred(&mut store) {
		tracing::debug!("deferred resolution reported failures");
	}

	for obj in store.iter() {
		let mut line = obj.name().to_string();
		for field in ctx.unparse(obj) {
			line.push('\t');
			line.push_str(&field);
		}
		writeln!(out, "{line}")?;
	}

	let reported = sink.diagnostics().split_off(before);
	let count = |kind: DiagnosticKind| reported.iter().filter(|d| d.kind == kind).count();
	let summary = LoadSummary {
		records,
		errors: count(DiagnosticKind::LstError),
		warnings: count(DiagnosticKind::LstWarning),
		unknown: count(DiagnosticKind::UnknownToken),
	};
	writeln!(
		out,
		"# {} records, {} errors, {} warnings, {} unknown tokens",
		summary.records, summary.errors, summary.warnings, summary.unknown
	)?;
	Ok(summary)
}
