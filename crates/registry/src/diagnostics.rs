//! Diagnostics sink for data errors and registration warnings.
//!
//! Every report is fire-and-forget: sinks never fail and never abort the
//! caller. Keyword-level parse failures, unknown keywords, and registry
//! warnings (duplicate group definitions, tokens without an entity kind) all
//! flow through here.

use std::fmt;

use parking_lot::Mutex;

/// Category of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
	/// Malformed data value.
	LstError,
	/// Suspicious but accepted data value.
	LstWarning,
	/// Keyword with no matching token in any applicable family.
	UnknownToken,
	/// Registry construction problem that did not abort registration.
	RegistrationError,
}

impl fmt::Display for DiagnosticKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::LstError => write!(f, "lst_error"),
			Self::LstWarning => write!(f, "lst_warning"),
			Self::UnknownToken => write!(f, "unknown_token"),
			Self::RegistrationError => write!(f, "registration_error"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub kind: DiagnosticKind,
	pub message: String,
}

impl Diagnostic {
	pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
		Self {
			kind,
			message: message.into(),
		}
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}] {}", self.kind, self.message)
	}
}

/// Receives diagnostics. Implementations must not panic.
pub trait DiagnosticSink: Send + Sync {
	fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
	fn report(&self, diagnostic: Diagnostic) {
		emit(&diagnostic);
	}
}

fn emit(diagnostic: &Diagnostic) {
	match diagnostic.kind {
		DiagnosticKind::LstError | DiagnosticKind::RegistrationError => {
			tracing::error!(kind = %diagnostic.kind, "{}", diagnostic.message);
		}
		DiagnosticKind::LstWarning | DiagnosticKind::UnknownToken => {
			tracing::warn!(kind = %diagnostic.kind, "{}", diagnostic.message);
		}
	}
}

/// Records every diagnostic it receives.
#[derive(Debug, Default)]
pub struct CollectingSink {
	entries: Mutex<Vec<Diagnostic>>,
	forward: bool,
}

impl CollectingSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Collects and also forwards each diagnostic to `tracing`.
	pub fn forwarding() -> Self {
		Self {
			entries: Mutex::new(Vec::new()),
			forward: true,
		}
	}

	/// Returns a copy of everything collected so far, in report order.
	pub fn diagnostics(&self) -> Vec<Diagnostic> {
		self.entries.lock().clone()
	}

	pub fn len(&self) -> usize {
		self.entries.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}

	pub fn count(&self, kind: DiagnosticKind) -> usize {
		self.entries.lock().iter().filter(|d| d.kind == kind).count()
	}

	/// Removes and returns everything collected so far.
	pub fn take(&self) -> Vec<Diagnostic> {
		std::mem::take(&mut *self.entries.lock())
	}
}

impl DiagnosticSink for CollectingSink {
	fn report(&self, diagnostic: Diagnostic) {
		if self.forward {
			emit(&diagnostic);
		}
		self.entries.lock().push(diagnostic);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_collecting_sink_preserves_order() {
		let sink = CollectingSink::new();
		sink.report(Diagnostic::new(DiagnosticKind::LstError, "first"));
		sink.report(Diagnostic::new(DiagnosticKind::UnknownToken, "second"));

		let messages: Vec<_> = sink.diagnostics().into_iter().map(|d| d.message).collect();
		assert_eq!(messages, ["first", "second"]);
		assert_eq!(sink.count(DiagnosticKind::LstError), 1);
		assert_eq!(sink.count(DiagnosticKind::RegistrationError), 0);
	}

	#[test]
	fn test_take_drains() {
		let sink = CollectingSink::forwarding();
		sink.report(Diagnostic::new(DiagnosticKind::LstWarning, "w"));
		assert_eq!(sink.take().len(), 1);
		assert!(sink.is_empty());
	}

	#[test]
	fn test_display() {
		let d = Diagnostic::new(DiagnosticKind::LstError, "bad value");
		assert_eq!(d.to_string(), "[lst_error] bad value");
	}
}
