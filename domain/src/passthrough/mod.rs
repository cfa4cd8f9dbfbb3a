//! Passthrough content slot
//!
//! Some tools produce content meant for the user's eyes only — rendered
//! documents, receipts, formatted reports. That content must never enter
//! the decision model's context. The gateway client parks it in a
//! [`PassthroughSlot`]; the presentation layer drains the slot after each
//! turn and shows the content directly.
//!
//! The slot holds at most one item. A second write overwrites the first,
//! and a read clears it. Losing an undrained item to an overwrite is
//! acceptable; showing stale content twice is not.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

/// One unit of user-facing content with its gateway metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PassthroughContent {
    pub content: String,
    pub metadata: HashMap<String, Value>,
}

impl PassthroughContent {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Content type as reported by the gateway, defaulting to "content".
    pub fn content_type(&self) -> &str {
        self.metadata
            .get("contentType")
            .and_then(|v| v.as_str())
            .unwrap_or("content")
    }
}

/// Single-item, overwrite-on-write, clear-on-read holder.
#[derive(Debug, Default)]
pub struct PassthroughSlot {
    inner: Mutex<Option<PassthroughContent>>,
}

impl PassthroughSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store content, replacing anything already held.
    pub fn put(&self, content: PassthroughContent) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(content);
    }

    /// Remove and return the held content, leaving the slot empty.
    pub fn take(&self) -> Option<PassthroughContent> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_take_clears_slot() {
        let slot = PassthroughSlot::new();
        slot.put(PassthroughContent::new("# Receipt"));

        let first = slot.take();
        assert_eq!(first.unwrap().content, "# Receipt");
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_second_write_overwrites_first() {
        let slot = PassthroughSlot::new();
        slot.put(PassthroughContent::new("old"));
        slot.put(PassthroughContent::new("new"));

        assert_eq!(slot.take().unwrap().content, "new");
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_content_type_from_metadata() {
        let content =
            PassthroughContent::new("body").with_metadata("contentType", json!("markdown"));
        assert_eq!(content.content_type(), "markdown");

        let plain = PassthroughContent::new("body");
        assert_eq!(plain.content_type(), "content");
    }
}
