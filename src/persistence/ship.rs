//! Ship details store
//!
//! Areas/spaces tags, ship particulars and crew positions, each under its own
//! key. Edits run on a copy and only replace the cached value once written.

use uuid::Uuid;

use super::{read_document, write_document};
use crate::error::StoreResult;
use crate::location;
use crate::model::{
    AreasAndSpaces, CrewPosition, LocationSettings, ShipParticulars, Tag, TagSection,
};
use crate::platform::KeyValueStore;
use crate::settings::Settings;

pub struct ShipDetailsStore<S> {
    storage: S,
    settings: Settings,
    areas_and_spaces: AreasAndSpaces,
    ship_particulars: ShipParticulars,
    crew_positions: Vec<CrewPosition>,
}

impl<S: KeyValueStore> ShipDetailsStore<S> {
    pub fn open(storage: S) -> Self {
        Self::with_settings(storage, Settings::default())
    }

    pub fn with_settings(storage: S, settings: Settings) -> Self {
        let areas_and_spaces: AreasAndSpaces =
            read_document(&storage, &settings.areas_and_spaces_key).unwrap_or_default();
        let ship_particulars: ShipParticulars =
            read_document(&storage, &settings.ship_particulars_key).unwrap_or_default();
        let crew_positions: Vec<CrewPosition> =
            read_document(&storage, &settings.crew_positions_key).unwrap_or_default();

        log::info!("Loaded ship details ({} crew positions)", crew_positions.len());

        Self {
            storage,
            settings,
            areas_and_spaces,
            ship_particulars,
            crew_positions,
        }
    }

    // === Areas and spaces ===

    pub fn areas_and_spaces(&self) -> &AreasAndSpaces {
        &self.areas_and_spaces
    }

    /// Edit the tag lists and persist the result
    pub fn update_areas_and_spaces<R>(
        &mut self,
        update: impl FnOnce(&mut AreasAndSpaces) -> R,
    ) -> StoreResult<R> {
        let mut copy = self.areas_and_spaces.clone();
        let result = update(&mut copy);
        write_document(&self.storage, &self.settings.areas_and_spaces_key, &copy)?;
        log::info!(
            "Saved areas and spaces with {} deck areas, {} engine spaces, and {} enclosed spaces",
            copy.deck_areas.len(),
            copy.engine_spaces.len(),
            copy.enclosed_spaces.len()
        );
        self.areas_and_spaces = copy;
        Ok(result)
    }

    /// Add a tag unless its section already has the same text
    pub fn add_tag(&mut self, text: &str, section: TagSection) -> StoreResult<Option<Tag>> {
        self.update_areas_and_spaces(|areas| areas.add_tag(text, section).cloned())
    }

    pub fn remove_tag(&mut self, id: Uuid) -> StoreResult<Option<Tag>> {
        self.update_areas_and_spaces(|areas| areas.remove_tag(id))
    }

    pub fn set_areas_and_spaces(&mut self, areas: AreasAndSpaces) -> StoreResult<()> {
        self.update_areas_and_spaces(|current| *current = areas)
    }

    /// Snapshot the tag lists under the backup key
    pub fn backup_tags(&self) -> StoreResult<()> {
        write_document(
            &self.storage,
            &self.settings.areas_and_spaces_backup_key,
            &self.areas_and_spaces,
        )?;
        log::info!("Tags backed up successfully");
        Ok(())
    }

    /// Restore the last backup. `Ok(false)` when there is none.
    pub fn restore_tags(&mut self) -> StoreResult<bool> {
        let Some(backup) = read_document::<AreasAndSpaces, _>(
            &self.storage,
            &self.settings.areas_and_spaces_backup_key,
        ) else {
            return Ok(false);
        };
        self.set_areas_and_spaces(backup)?;
        log::info!("Tags restored successfully");
        Ok(true)
    }

    /// Location suggestions for an item with `settings`
    pub fn suggest_locations(&self, settings: &LocationSettings, query: &str) -> Vec<&Tag> {
        location::suggest(settings, &self.areas_and_spaces, query)
    }

    // === Particulars ===

    pub fn ship_particulars(&self) -> &ShipParticulars {
        &self.ship_particulars
    }

    pub fn update_particulars(
        &mut self,
        update: impl FnOnce(&mut ShipParticulars),
    ) -> StoreResult<()> {
        let mut copy = self.ship_particulars.clone();
        update(&mut copy);
        write_document(&self.storage, &self.settings.ship_particulars_key, &copy)?;
        self.ship_particulars = copy;
        Ok(())
    }

    pub fn toggle_particulars_lock(&mut self) -> StoreResult<()> {
        self.update_particulars(|particulars| particulars.is_locked = !particulars.is_locked)
    }

    // === Crew ===

    pub fn crew_positions(&self) -> &[CrewPosition] {
        &self.crew_positions
    }

    pub fn add_crew_position(&mut self, position: &str) -> StoreResult<CrewPosition> {
        let crew = CrewPosition::new(position);
        let mut updated = self.crew_positions.clone();
        updated.push(crew.clone());
        self.save_crew(updated)?;
        Ok(crew)
    }

    pub fn remove_crew_position(&mut self, id: Uuid) -> StoreResult<Option<CrewPosition>> {
        let Some(pos) = self.crew_positions.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        let mut updated = self.crew_positions.clone();
        let removed = updated.remove(pos);
        self.save_crew(updated)?;
        Ok(Some(removed))
    }

    fn save_crew(&mut self, crew: Vec<CrewPosition>) -> StoreResult<()> {
        write_document(&self.storage, &self.settings.crew_positions_key, &crew)?;
        self.crew_positions = crew;
        Ok(())
    }
}
