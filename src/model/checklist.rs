//! Checklist entity
//!
//! A checklist owns its items by value. Templates are authored and never
//! filled out; instances are derived from them (see `lifecycle`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::item::ChecklistItem;
use crate::consts::MAX_ITEMS;
use crate::error::ChecklistError;
use crate::serial;

/// Where a checklist is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChecklistState {
    /// Reusable definition
    Template,
    /// Instance being filled out
    InProgress,
    /// Instance signed off
    Completed,
}

impl ChecklistState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistState::Template => "template",
            ChecklistState::InProgress => "inProgress",
            ChecklistState::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub id: Uuid,
    pub name: String,
    pub subtitle: String,
    pub revision_number: u32,
    pub revision_date: DateTime<Utc>,
    pub approved_by: String,
    /// Display order
    pub items: Vec<ChecklistItem>,
    pub serial_number: String,
    pub state: ChecklistState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<DateTime<Utc>>,
}

impl Checklist {
    /// New empty template at revision 1 with a fresh serial
    pub fn new_template(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            subtitle: String::new(),
            revision_number: 1,
            revision_date: Utc::now(),
            approved_by: String::new(),
            items: Vec::new(),
            serial_number: serial::template_serial(),
            state: ChecklistState::Template,
            created_date: None,
            completion_date: None,
        }
    }

    pub fn is_template(&self) -> bool {
        self.state == ChecklistState::Template
    }

    /// Whether this checklist was spawned from `template`
    pub fn is_instance_of(&self, template: &Checklist) -> bool {
        serial::is_instance_of(&self.serial_number, template.id)
    }

    pub fn item(&self, id: Uuid) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: Uuid) -> Option<&mut ChecklistItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Append an item, refusing past [`MAX_ITEMS`]
    pub fn add_item(&mut self, item: ChecklistItem) -> Result<(), ChecklistError> {
        if self.items.len() >= MAX_ITEMS {
            return Err(ChecklistError::TooManyItems { max: MAX_ITEMS });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove_item(&mut self, id: Uuid) -> Result<ChecklistItem, ChecklistError> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(ChecklistError::ItemNotFound(id))?;
        Ok(self.items.remove(pos))
    }

    /// Move the item at `from` so it ends up at index `to`
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), ChecklistError> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(ChecklistError::IndexOutOfBounds { index, len });
            }
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(())
    }
}
