use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::domain::{FieldId, FieldKind, FormValues};

const DRAFT_PREFIX: &str = "form_";
pub const PRACTICE_AREA_DRAFT_KEY: &str = "form_practice-area";

/// String key-value persistence in the shape of browser local storage.
/// Last write wins; nothing expires.
pub trait KeyValueStore {
    type Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

pub fn draft_key(field: FieldId) -> String {
    format!("{DRAFT_PREFIX}{}", field.as_str())
}

fn text_fields() -> impl Iterator<Item = FieldId> {
    FieldId::ALL
        .into_iter()
        .filter(|field| field.kind() == FieldKind::Text)
}

/// Prefills text fields from saved drafts. Checkboxes always start unchecked.
pub fn load_drafts<S: KeyValueStore>(store: &S) -> Result<FormValues, S::Error> {
    let mut values = FormValues::default();
    for field in text_fields() {
        if let Some(saved) = store.get(&draft_key(field))? {
            if let Some(target) = values.text_mut(field) {
                *target = saved;
            }
        }
    }
    if let Some(saved) = store.get(PRACTICE_AREA_DRAFT_KEY)? {
        values.practice_area = saved;
    }
    Ok(values)
}

/// Checkbox fields are never saved.
pub fn save_draft<S: KeyValueStore>(store: &S, field: FieldId, value: &str) -> Result<(), S::Error> {
    if field.kind() == FieldKind::Checkbox {
        return Ok(());
    }
    store.set(&draft_key(field), value)
}

pub fn save_practice_area_draft<S: KeyValueStore>(store: &S, value: &str) -> Result<(), S::Error> {
    store.set(PRACTICE_AREA_DRAFT_KEY, value)
}

pub fn clear_drafts<S: KeyValueStore>(store: &S) -> Result<(), S::Error> {
    for field in FieldId::ALL {
        store.remove(&draft_key(field))?;
    }
    store.remove(PRACTICE_AREA_DRAFT_KEY)
}
