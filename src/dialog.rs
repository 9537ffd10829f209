//! Modal dialog requests and their results.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogPayload {
    Message { title: String, body: String },
    Confirm { title: String, prompt: String },
    Input { title: String, prompt: String, default: String },
}

impl DialogPayload {
    pub fn title(&self) -> &str {
        match self {
            DialogPayload::Message { title, .. }
            | DialogPayload::Confirm { title, .. }
            | DialogPayload::Input { title, .. } => title,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            DialogPayload::Message { body, .. } => body,
            DialogPayload::Confirm { prompt, .. } | DialogPayload::Input { prompt, .. } => prompt,
        }
    }
}

/// Outcome delivered to a dialog's callback. Cancellation is an ordinary
/// result, not an interrupt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    Confirmed,
    Submitted(String),
    Cancelled,
}

impl DialogResult {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DialogResult::Cancelled)
    }
}

pub type DialogCallback = Box<dyn FnOnce(DialogResult) + Send>;

pub struct DialogRequest {
    pub id: String,
    pub kind: String,
    pub payload: DialogPayload,
    callback: DialogCallback,
}

impl DialogRequest {
    pub fn new<F>(
        id: impl Into<String>,
        kind: impl Into<String>,
        payload: DialogPayload,
        on_result: F,
    ) -> Self
    where
        F: FnOnce(DialogResult) + Send + 'static,
    {
        Self {
            id: id.into(),
            kind: kind.into(),
            payload,
            callback: Box::new(on_result),
        }
    }

    /// A message box whose result nobody waits for.
    pub fn message(
        id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            "message",
            DialogPayload::Message {
                title: title.into(),
                body: body.into(),
            },
            |_| {},
        )
    }

    /// Consume the request and hand `result` to its callback. Consuming
    /// `self` is what makes delivery at-most-once. A panicking callback is
    /// contained and reported as `false`.
    pub(crate) fn deliver(self, result: DialogResult) -> bool {
        let DialogRequest { id, callback, .. } = self;
        match panic::catch_unwind(AssertUnwindSafe(move || callback(result))) {
            Ok(()) => true,
            Err(_) => {
                tracing::error!(dialog_id = %id, "dialog callback panicked");
                false
            }
        }
    }
}

impl fmt::Debug for DialogRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogRequest")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}
