//! Versioned token registry for the rules-data interpreter.
//!
//! Parser units ("tokens") register against structured keys: the entity kind
//! they target, their keyword, and for sub-tokens the parent keyword. Each
//! registration lands in a [`TokenFamily`], the set of tokens valid for one
//! data-format [`Revision`]. A [`TokenFamilyPool`] interns one family per
//! revision and carries the well-known families declared at startup.
//!
//! # Lifecycle
//!
//! 1. [`TokenFamilyPool::init`] declares the well-known families.
//! 2. Discovery ([`plugin::discover`]) and builtin registration populate them.
//! 3. A [`LoadContext`] resolves keywords for a data set's declared revision and
//!    invokes each token's parse contract against a target object.
//!
//! Registration is a one-shot, single-writer phase that must complete before
//! lookups begin. [`TokenFamily::clear_tokens`] and [`TokenFamilyPool::reset`]
//! are administrative operations; callers quiesce readers first.
//!
//! [`Revision`]: rulebook_primitives::Revision

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod family;
pub mod plugin;
pub mod pool;
pub mod prereq;
pub mod token;

pub use config::RegistryConfig;
pub use context::LoadContext;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
pub use error::RegistryError;
pub use family::TokenFamily;
#[doc(hidden)]
pub use inventory;
pub use plugin::{PluginRecord, TokenPlugin};
pub use pool::{TokenFamilyPool, WELL_KNOWN, WellKnown};
pub use prereq::{Prerequisite, PrerequisiteError, PrerequisiteOperator, PrerequisiteParser};
pub use token::{CdomToken, DeferredToken, GroupDefinition, ParseResult, PrimaryToken, SecondaryToken};
