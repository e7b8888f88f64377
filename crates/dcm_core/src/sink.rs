//! Event/message sink (§4.13): a pluggable diagnostic collector installed
//! per owning context, never as a process-wide singleton.

use std::fmt;
use std::sync::{Arc, RwLock};

/// Truncation limit applied to every formatted message before it reaches a
/// sink.
pub const MAX_MESSAGE_BYTES: usize = 512;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
	/// An operation failed or is about to fail.
	Error,
	/// An operation succeeded despite a questionable input.
	Warning,
	/// Purely informational progress.
	Info,
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Severity::Error => "error",
			Severity::Warning => "warning",
			Severity::Info => "info",
		};
		write!(f, "{s}")
	}
}

/// A diagnostic collector a library consumer installs on an owning object
/// (an image, a transforms chain, a renderer).
pub trait MessageSink: Send + Sync {
	/// Receives a single, already-truncated message at the given severity.
	fn message(&self, severity: Severity, message: &str);
}

/// A no-op sink, used as the implicit default so contexts never need an
/// `Option` at the call site.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl MessageSink for NullSink {
	fn message(&self, _severity: Severity, _message: &str) {}
}

/// A per-context, atomically replaceable slot holding an optional sink.
///
/// Cloning a [`SinkSlot`] shares the same installed sink (it is a handle,
/// not a copy) — the same sharing discipline the teacher's owning types use
/// for their `Arc`-backed fields.
#[derive(Clone)]
pub struct SinkSlot {
	inner: Arc<RwLock<Option<Arc<dyn MessageSink>>>>,
}

impl fmt::Debug for SinkSlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let installed = self.inner.read().map(|g| g.is_some()).unwrap_or(false);
		f.debug_struct("SinkSlot").field("installed", &installed).finish()
	}
}

impl Default for SinkSlot {
	fn default() -> Self {
		Self { inner: Arc::new(RwLock::new(None)) }
	}
}

impl SinkSlot {
	/// Creates an empty slot (messages sent to it are discarded silently).
	pub fn new() -> Self {
		Self::default()
	}

	/// Installs `sink`, replacing whatever was previously installed.
	pub fn install(&self, sink: Arc<dyn MessageSink>) {
		if let Ok(mut guard) = self.inner.write() {
			*guard = Some(sink);
		}
	}

	/// Atomically swaps in `sink`, returning whatever was previously
	/// installed.
	pub fn replace(&self, sink: Option<Arc<dyn MessageSink>>) -> Option<Arc<dyn MessageSink>> {
		match self.inner.write() {
			Ok(mut guard) => std::mem::replace(&mut *guard, sink),
			Err(_) => None,
		}
	}

	/// Returns the currently installed sink, if any.
	pub fn get(&self) -> Option<Arc<dyn MessageSink>> {
		self.inner.read().ok().and_then(|g| g.clone())
	}

	/// Truncates `message` to [`MAX_MESSAGE_BYTES`] (on a UTF-8 boundary)
	/// and forwards it to the installed sink, if any. Discards silently
	/// when no sink is installed.
	pub fn emit(&self, severity: Severity, message: &str) {
		let Some(sink) = self.get() else { return };
		let truncated = truncate_utf8(message, MAX_MESSAGE_BYTES);
		sink.message(severity, truncated);
	}
}

fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
	if s.len() <= max_bytes {
		return s;
	}
	let mut end = max_bytes;
	while end > 0 && !s.is_char_boundary(end) {
		end -= 1;
	}
	&s[..end]
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Mutex;

	struct RecordingSink {
		messages: Mutex<Vec<(Severity, String)>>,
	}

	impl MessageSink for RecordingSink {
		fn message(&self, severity: Severity, message: &str) {
			self.messages.lock().unwrap().push((severity, message.to_string()));
		}
	}

	#[test]
	fn missing_sink_discards_silently() {
		let slot = SinkSlot::new();
		slot.emit(Severity::Error, "nobody home");
	}

	#[test]
	fn installed_sink_receives_message() {
		let slot = SinkSlot::new();
		let recorder = Arc::new(RecordingSink { messages: Mutex::new(Vec::new()) });
		slot.install(recorder.clone());

		slot.emit(Severity::Warning, "hello");

		let messages = recorder.messages.lock().unwrap();
		assert_eq!(messages.len(), 1);
		assert_eq!(messages[0], (Severity::Warning, "hello".to_string()));
	}

	#[test]
	fn replace_returns_previous_sink() {
		let slot = SinkSlot::new();
		let first = Arc::new(RecordingSink { messages: Mutex::new(Vec::new()) });
		slot.install(first.clone());

		let second = Arc::new(RecordingSink { messages: Mutex::new(Vec::new()) });
		let previous = slot.replace(Some(second));
		assert!(previous.is_some());
	}

	#[test]
	fn long_messages_are_truncated() {
		let slot = SinkSlot::new();
		let recorder = Arc::new(RecordingSink { messages: Mutex::new(Vec::new()) });
		slot.install(recorder.clone());

		let long = "x".repeat(1000);
		slot.emit(Severity::Info, &long);

		let messages = recorder.messages.lock().unwrap();
		assert_eq!(messages[0].1.len(), MAX_MESSAGE_BYTES);
	}
}
