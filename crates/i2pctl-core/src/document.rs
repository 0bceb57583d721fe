// crates/i2pctl-core/src/document.rs
//
// Rendering surface: a document of named display slots, and the helper that
// writes a map of values into it.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ControlError;

/// A document whose elements are addressable by identifier and accept markup
/// text as content.
pub trait Document {
    /// Replace the content of element `id`.
    ///
    /// Returns [`ControlError::MissingElement`] if there is no such element.
    fn set_inner_html(&mut self, id: &str, markup: String) -> Result<(), ControlError>;
}

/// Coerce a JSON value to markup text: strings verbatim, everything else as
/// its JSON text.
pub fn to_markup(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Write each value into the element named by its key.
///
/// Stops at the first identifier the document lacks; earlier writes stay.
pub fn update_document<D>(document: &mut D, values: &Map<String, Value>) -> Result<(), ControlError>
where
    D: Document + ?Sized,
{
    for (id, value) in values {
        document.set_inner_html(id, to_markup(value))?;
    }
    Ok(())
}

/// One display slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    /// Element identifier.
    pub id: String,
    /// Human-readable caption.
    pub label: String,
    /// Current markup content; empty until written.
    pub content: String,
}

/// In-memory [`Document`] with a fixed set of slots, kept in declaration
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotDocument {
    slots: Vec<Slot>,
}

impl SlotDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a slot. Re-declaring an id only updates its label.
    pub fn with_slot(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        let id = id.into();
        let label = label.into();
        match self.slots.iter_mut().find(|s| s.id == id) {
            Some(slot) => slot.label = label,
            None => self.slots.push(Slot {
                id,
                label,
                content: String::new(),
            }),
        }
        self
    }

    /// Content of slot `id`, if declared.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.content.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.iter().any(|s| s.id == id)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Document for SlotDocument {
    fn set_inner_html(&mut self, id: &str, markup: String) -> Result<(), ControlError> {
        match self.slots.iter_mut().find(|s| s.id == id) {
            Some(slot) => {
                tracing::trace!("slot {} <- {}", id, markup);
                slot.content = markup;
                Ok(())
            }
            None => Err(ControlError::MissingElement(id.to_string())),
        }
    }
}
