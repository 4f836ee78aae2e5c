//! Ship details aggregate
//!
//! Area tags feed location suggestions; particulars and crew are carried
//! alongside but not read by the checklist core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::serial;

/// Reusable short label, e.g. a named space on board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    pub serial_number: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            serial_number: serial::tag_serial(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// The three area classes a location can come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagSection {
    Deck,
    Engine,
    Enclosed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AreasAndSpaces {
    pub deck_areas: Vec<Tag>,
    pub engine_spaces: Vec<Tag>,
    pub enclosed_spaces: Vec<Tag>,
    pub is_locked: bool,
}

impl AreasAndSpaces {
    pub fn section(&self, section: TagSection) -> &[Tag] {
        match section {
            TagSection::Deck => &self.deck_areas,
            TagSection::Engine => &self.engine_spaces,
            TagSection::Enclosed => &self.enclosed_spaces,
        }
    }

    pub fn section_mut(&mut self, section: TagSection) -> &mut Vec<Tag> {
        match section {
            TagSection::Deck => &mut self.deck_areas,
            TagSection::Engine => &mut self.engine_spaces,
            TagSection::Enclosed => &mut self.enclosed_spaces,
        }
    }

    /// Append a new tag unless the section already has one with this text.
    /// Returns the added tag.
    pub fn add_tag(&mut self, text: &str, section: TagSection) -> Option<&Tag> {
        let tags = self.section_mut(section);
        if tags.iter().any(|tag| tag.text == text) {
            return None;
        }
        tags.push(Tag::new(text));
        tags.last()
    }

    /// Remove a tag by id from whichever section holds it
    pub fn remove_tag(&mut self, id: Uuid) -> Option<Tag> {
        for section in [TagSection::Deck, TagSection::Engine, TagSection::Enclosed] {
            let tags = self.section_mut(section);
            if let Some(pos) = tags.iter().position(|tag| tag.id == id) {
                return Some(tags.remove(pos));
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.deck_areas.len() + self.engine_spaces.len() + self.enclosed_spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipParticulars {
    pub ship_name: String,
    pub imo_number: String,
    pub call_sign: String,
    pub flag: String,
    pub ship_type: String,
    pub is_locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewPosition {
    pub id: Uuid,
    pub position: String,
}

impl CrewPosition {
    pub fn new(position: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: position.into(),
        }
    }
}
