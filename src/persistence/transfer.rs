//! Import/export documents
//!
//! Exports are plain JSON arrays of checklists (or the tag aggregate). Imports
//! skip any checklist whose serial number is already present, so importing the
//! same file twice adds nothing the second time.

use std::collections::HashSet;

use super::{ChecklistStore, ShipDetailsStore};
use crate::error::TransferError;
use crate::model::{AreasAndSpaces, Checklist};
use crate::platform::KeyValueStore;

/// Decode an exported checklist array
pub fn decode_checklists(json: &str) -> Result<Vec<Checklist>, TransferError> {
    serde_json::from_str(json).map_err(TransferError::Decode)
}

fn encode<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, TransferError> {
    serde_json::to_string_pretty(value).map_err(TransferError::Encode)
}

impl<S: KeyValueStore> ChecklistStore<S> {
    /// All templates as a JSON document
    pub fn export_templates(&self) -> Result<String, TransferError> {
        let templates: Vec<&Checklist> = self.templates().collect();
        log::info!("Exporting {} templates", templates.len());
        encode(&templates)
    }

    /// All in-progress and completed checklists as a JSON document
    pub fn export_history(&self) -> Result<String, TransferError> {
        let history: Vec<&Checklist> = self
            .checklists()
            .iter()
            .filter(|c| !c.is_template())
            .collect();
        log::info!("Exporting {} checklists", history.len());
        encode(&history)
    }

    /// Append every imported checklist whose serial number is new and save.
    /// Returns how many were added.
    pub fn import_checklists(&mut self, json: &str) -> Result<usize, TransferError> {
        let imported = decode_checklists(json)?;
        let total = imported.len();

        let mut known: HashSet<String> = self
            .checklists()
            .iter()
            .map(|c| c.serial_number.clone())
            .collect();
        let fresh: Vec<Checklist> = imported
            .into_iter()
            .filter(|c| known.insert(c.serial_number.clone()))
            .collect();

        let added = fresh.len();
        if added < total {
            log::info!("Skipped {} duplicate checklist(s)", total - added);
        }
        if added == 0 {
            return Ok(0);
        }

        let mut updated = self.checklists().to_vec();
        updated.extend(fresh);
        self.save(updated)?;
        log::info!("Imported {} checklists", added);
        Ok(added)
    }
}

impl<S: KeyValueStore> ShipDetailsStore<S> {
    pub fn export_tags(&self) -> Result<String, TransferError> {
        encode(self.areas_and_spaces())
    }

    /// Replace the tag lists with an exported aggregate
    pub fn import_tags(&mut self, json: &str) -> Result<(), TransferError> {
        let areas: AreasAndSpaces = serde_json::from_str(json).map_err(TransferError::Decode)?;
        self.set_areas_and_spaces(areas)?;
        log::info!("Successfully imported tags");
        Ok(())
    }
}
