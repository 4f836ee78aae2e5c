//! Storage settings
//!
//! The stable keys every persisted document lives under. Two apps sharing a
//! backend (e.g. one LocalStorage origin) separate themselves with a namespace.

use serde::{Deserialize, Serialize};

/// Keys for the persisted documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    // === Checklists ===
    /// Full checklist collection
    pub checklists_key: String,
    /// Tombstone set of deleted ids and serial numbers
    pub deleted_ids_key: String,

    // === Ship details ===
    /// Deck/engine/enclosed tag lists
    pub areas_and_spaces_key: String,
    /// Snapshot written by `backup_tags`
    pub areas_and_spaces_backup_key: String,
    pub ship_particulars_key: String,
    pub crew_positions_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            checklists_key: "savedChecklists".to_string(),
            deleted_ids_key: "deletedChecklistIDs".to_string(),

            areas_and_spaces_key: "areasAndSpaces".to_string(),
            areas_and_spaces_backup_key: "areasAndSpaces_backup".to_string(),
            ship_particulars_key: "shipParticulars".to_string(),
            crew_positions_key: "crewPositions".to_string(),
        }
    }
}

impl Settings {
    /// Default keys, each prefixed with `namespace.`
    pub fn with_namespace(namespace: &str) -> Self {
        let mut settings = Self::default();
        settings.apply_namespace(namespace);
        settings
    }

    /// Prefix every key with `namespace.` (empty namespace leaves keys alone)
    pub fn apply_namespace(&mut self, namespace: &str) {
        if namespace.is_empty() {
            return;
        }
        for key in [
            &mut self.checklists_key,
            &mut self.deleted_ids_key,
            &mut self.areas_and_spaces_key,
            &mut self.areas_and_spaces_backup_key,
            &mut self.ship_particulars_key,
            &mut self.crew_positions_key,
        ] {
            *key = format!("{}.{}", namespace, key);
        }
    }
}
