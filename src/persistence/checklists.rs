//! Checklist store
//!
//! Sole writer of the checklist collection and the tombstone set. Every
//! write replaces the whole document; the in-memory cache only changes after
//! the backend accepted the write.

use std::collections::BTreeSet;

use uuid::Uuid;

use super::{read_document, write_document};
use crate::error::StoreResult;
use crate::model::{Checklist, ChecklistState};
use crate::platform::KeyValueStore;
use crate::settings::Settings;

pub struct ChecklistStore<S> {
    storage: S,
    settings: Settings,
    checklists: Vec<Checklist>,
}

impl<S: KeyValueStore> ChecklistStore<S> {
    /// Open with the default keys and load the persisted collection
    pub fn open(storage: S) -> Self {
        Self::with_settings(storage, Settings::default())
    }

    pub fn with_settings(storage: S, settings: Settings) -> Self {
        let mut store = Self {
            storage,
            settings,
            checklists: Vec::new(),
        };
        store.load();
        store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read the persisted collection minus anything tombstoned.
    ///
    /// Missing or corrupt data reads as empty and leaves the cache as it was.
    pub fn load(&mut self) -> Vec<Checklist> {
        let Some(stored) =
            read_document::<Vec<Checklist>, _>(&self.storage, &self.settings.checklists_key)
        else {
            log::info!("No checklists found");
            return Vec::new();
        };

        let deleted = self.deleted_ids();
        let filtered: Vec<Checklist> = stored
            .into_iter()
            .filter(|checklist| !is_tombstoned(&deleted, checklist))
            .collect();

        log::info!(
            "Loaded {} checklists ({} templates)",
            filtered.len(),
            count_templates(&filtered)
        );

        self.checklists = filtered.clone();
        filtered
    }

    /// Overwrite the persisted collection.
    ///
    /// On failure nothing changes, in storage or in the cache.
    pub fn save(&mut self, checklists: Vec<Checklist>) -> StoreResult<()> {
        if let Err(e) = write_document(&self.storage, &self.settings.checklists_key, &checklists) {
            log::warn!("Dropped save of {} checklists: {}", checklists.len(), e);
            return Err(e);
        }

        log::info!(
            "Checklists saved ({} entries, {} templates)",
            checklists.len(),
            count_templates(&checklists)
        );
        self.checklists = checklists;
        Ok(())
    }

    /// Tombstone `checklist` and persist the rest.
    ///
    /// Deleting a template also tombstones every cached checklist whose
    /// serial starts with `{template_id}_`. Deleting an instance leaves its
    /// template alone.
    ///
    /// Once the tombstones are written the cache drops the deleted entries,
    /// even if saving the remaining collection then fails.
    pub fn delete(&mut self, checklist: &Checklist) -> StoreResult<()> {
        let mut deleted = self.deleted_ids();
        deleted.insert(checklist.id.to_string());
        deleted.insert(checklist.serial_number.clone());

        if checklist.state == ChecklistState::Template {
            for related in self.checklists.iter().filter(|c| c.is_instance_of(checklist)) {
                log::debug!("Cascading delete to instance {}", related.serial_number);
                deleted.insert(related.id.to_string());
                deleted.insert(related.serial_number.clone());
            }
        }

        write_document(&self.storage, &self.settings.deleted_ids_key, &deleted)?;

        let remaining: Vec<Checklist> = self
            .checklists
            .iter()
            .filter(|c| c.id != checklist.id && !is_tombstoned(&deleted, c))
            .cloned()
            .collect();
        self.checklists = remaining.clone();
        self.save(remaining)
    }

    /// Drop the collection and the tombstone set
    pub fn delete_all(&mut self) -> StoreResult<()> {
        self.checklists.clear();
        let removed_checklists = self.storage.remove(&self.settings.checklists_key);
        let removed_tombstones = self.storage.remove(&self.settings.deleted_ids_key);
        log::info!("All checklists deleted");
        removed_checklists?;
        removed_tombstones?;
        Ok(())
    }

    /// Replace the checklist with the same id, or append it, then save
    pub fn upsert(&mut self, checklist: Checklist) -> StoreResult<()> {
        let mut updated = self.checklists.clone();
        match updated.iter_mut().find(|c| c.id == checklist.id) {
            Some(existing) => *existing = checklist,
            None => updated.push(checklist),
        }
        self.save(updated)
    }

    /// Ids and serial numbers that must never load again
    pub fn deleted_ids(&self) -> BTreeSet<String> {
        read_document(&self.storage, &self.settings.deleted_ids_key).unwrap_or_default()
    }

    /// Cached collection as of the last successful load or save
    pub fn checklists(&self) -> &[Checklist] {
        &self.checklists
    }

    pub fn get(&self, id: Uuid) -> Option<&Checklist> {
        self.checklists.iter().find(|c| c.id == id)
    }

    pub fn with_state(&self, state: ChecklistState) -> impl Iterator<Item = &Checklist> {
        self.checklists.iter().filter(move |c| c.state == state)
    }

    pub fn templates(&self) -> impl Iterator<Item = &Checklist> {
        self.with_state(ChecklistState::Template)
    }

    pub fn in_progress(&self) -> impl Iterator<Item = &Checklist> {
        self.with_state(ChecklistState::InProgress)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Checklist> {
        self.with_state(ChecklistState::Completed)
    }

    /// Instances spawned from `template`
    pub fn instances_of<'a>(
        &'a self,
        template: &'a Checklist,
    ) -> impl Iterator<Item = &'a Checklist> + 'a {
        self.checklists
            .iter()
            .filter(move |c| c.id != template.id && c.is_instance_of(template))
    }
}

fn is_tombstoned(deleted: &BTreeSet<String>, checklist: &Checklist) -> bool {
    deleted.contains(&checklist.id.to_string()) || deleted.contains(&checklist.serial_number)
}

fn count_templates(checklists: &[Checklist]) -> usize {
    checklists.iter().filter(|c| c.is_template()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChecklistItem, ChecklistItemType};
    use crate::persistence::test_support::FlakyStorage;
    use crate::platform::MemoryStorage;
    use chrono::{Duration, TimeZone, Utc};

    fn template(name: &str) -> Checklist {
        let mut template = Checklist::new_template(name);
        template
            .add_item(ChecklistItem::with_text(
                ChecklistItemType::SingleLineCheck,
                "Gas free",
                "",
            ))
            .unwrap();
        template
    }

    fn ids(checklists: &[Checklist]) -> Vec<Uuid> {
        checklists.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_open_empty_storage() {
        let mut store = ChecklistStore::open(MemoryStorage::new());
        assert!(store.load().is_empty());
        assert!(store.checklists().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        let t = template("Bunkering");
        let i = t.create_instance();

        let mut store = ChecklistStore::open(&storage);
        store.save(vec![t.clone(), i.clone()]).unwrap();

        let mut reopened = ChecklistStore::open(&storage);
        assert_eq!(reopened.checklists(), [t.clone(), i.clone()]);
        assert_eq!(reopened.load(), vec![t, i]);
    }

    #[test]
    fn test_save_of_load_is_idempotent() {
        let storage = MemoryStorage::new();
        let mut store = ChecklistStore::open(&storage);
        store.save(vec![template("A"), template("B")]).unwrap();

        let before = storage.get("savedChecklists").unwrap();
        let loaded = store.load();
        store.save(loaded.clone()).unwrap();
        store.save(loaded.clone()).unwrap();
        assert_eq!(storage.get("savedChecklists").unwrap(), before);
        assert_eq!(store.load(), loaded);
    }

    #[test]
    fn test_corrupt_collection_loads_empty() {
        let storage = MemoryStorage::new();
        storage.set("savedChecklists", "[{\"id\": 12").unwrap();
        let mut store = ChecklistStore::open(&storage);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_tombstones_ignored() {
        let storage = MemoryStorage::new();
        let mut store = ChecklistStore::open(&storage);
        store.save(vec![template("A")]).unwrap();
        storage.set("deletedChecklistIDs", "nope").unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_delete_template_cascades_to_instances() {
        let storage = MemoryStorage::new();
        let t = template("Enclosed space");
        let other = template("Hot work");
        let first = t.create_instance();
        let second = t.create_instance_at(Utc::now() + Duration::milliseconds(1));
        let unrelated = other.create_instance();

        let mut store = ChecklistStore::open(&storage);
        store
            .save(vec![
                t.clone(),
                first.clone(),
                second.clone(),
                other.clone(),
                unrelated.clone(),
            ])
            .unwrap();
        assert_eq!(store.instances_of(&t).count(), 2);

        store.delete(&t).unwrap();
        assert_eq!(ids(store.checklists()), [other.id, unrelated.id]);

        let loaded = store.load();
        assert_eq!(ids(&loaded), [other.id, unrelated.id]);

        let deleted = store.deleted_ids();
        for c in [&t, &first, &second] {
            assert!(deleted.contains(&c.id.to_string()));
            assert!(deleted.contains(&c.serial_number));
        }
    }

    #[test]
    fn test_delete_instance_keeps_template() {
        let storage = MemoryStorage::new();
        let t = template("Mooring");
        let i = t.create_instance();

        let mut store = ChecklistStore::open(&storage);
        store.save(vec![t.clone(), i.clone()]).unwrap();
        store.delete(&i).unwrap();

        assert_eq!(ids(&store.load()), [t.id]);
    }

    #[test]
    fn test_delete_instance_spares_same_second_sibling() {
        let storage = MemoryStorage::new();
        let t = template("Crane inspection");
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let a = t.create_instance_at(now);
        let b = t.create_instance_at(now + Duration::milliseconds(1));
        assert_ne!(a.serial_number, b.serial_number);

        let mut store = ChecklistStore::open(&storage);
        store.save(vec![t.clone(), a.clone(), b.clone()]).unwrap();
        store.delete(&a).unwrap();

        assert_eq!(ids(&store.load()), [t.id, b.id]);
        assert!(!store.deleted_ids().contains(&b.serial_number));
    }

    #[test]
    fn test_tombstoned_checklist_never_reappears() {
        let storage = MemoryStorage::new();
        let t = template("Ghost");
        let mut store = ChecklistStore::open(&storage);
        store.save(vec![t.clone()]).unwrap();
        store.delete(&t).unwrap();

        // A stale writer puts it back; load still hides it
        store.save(vec![t.clone()]).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_delete_all_clears_tombstones() {
        let storage = MemoryStorage::new();
        let t = template("Reset");
        let mut store = ChecklistStore::open(&storage);
        store.save(vec![t.clone()]).unwrap();
        store.delete(&t).unwrap();

        store.delete_all().unwrap();
        assert!(store.checklists().is_empty());
        assert!(store.deleted_ids().is_empty());
        assert!(storage.is_empty());

        // With tombstones gone the same checklist can come back
        store.save(vec![t.clone()]).unwrap();
        assert_eq!(ids(&store.load()), [t.id]);
    }

    #[test]
    fn test_failed_save_leaves_cache_untouched() {
        let storage = FlakyStorage::default();
        let t = template("Kept");
        let mut store = ChecklistStore::open(&storage);
        store.save(vec![t.clone()]).unwrap();

        storage.fail_writes.set(true);
        assert!(store.save(Vec::new()).is_err());
        assert_eq!(ids(store.checklists()), [t.id]);

        assert!(store.delete(&t).is_err());
        assert_eq!(ids(store.checklists()), [t.id]);

        storage.fail_writes.set(false);
        assert_eq!(ids(&store.load()), [t.id]);
    }

    #[test]
    fn test_delete_prunes_cache_when_save_fails() {
        let storage = FlakyStorage::default();
        let t = template("Half written");
        let i = t.create_instance();
        let mut store = ChecklistStore::open(&storage);
        store.save(vec![t.clone(), i.clone()]).unwrap();

        // Tombstone write goes through, the collection write does not
        storage.writes_left.set(Some(1));
        assert!(store.delete(&t).is_err());
        assert!(store.checklists().is_empty());

        storage.writes_left.set(None);
        assert!(store.load().is_empty());
        assert!(store.deleted_ids().contains(&i.serial_number));
    }

    #[test]
    fn test_unreadable_backend_reads_empty() {
        let storage = FlakyStorage::default();
        let mut store = ChecklistStore::open(&storage);
        store.save(vec![template("A")]).unwrap();

        storage.fail_reads.set(true);
        assert!(store.load().is_empty());
        // Stale cache survives
        assert_eq!(store.checklists().len(), 1);
    }

    #[test]
    fn test_upsert_and_state_views() {
        let storage = MemoryStorage::new();
        let mut store = ChecklistStore::open(&storage);

        let mut t = template("Views");
        store.upsert(t.clone()).unwrap();
        let mut i = t.create_instance();
        store.upsert(i.clone()).unwrap();
        let mut done = t.create_instance();
        done.mark_completed();
        store.upsert(done.clone()).unwrap();

        t.name = "Views rev 2".to_string();
        t.revision_number = 2;
        store.upsert(t.clone()).unwrap();
        i.items[0].selected_option = Some(crate::model::CheckOption::Yes);
        store.upsert(i.clone()).unwrap();

        assert_eq!(store.checklists().len(), 3);
        assert_eq!(store.get(t.id).unwrap().revision_number, 2);
        assert_eq!(store.templates().count(), 1);
        assert_eq!(store.in_progress().next().unwrap().completion_percentage(), 100);
        assert_eq!(store.completed().next().unwrap().id, done.id);
    }

    #[test]
    fn test_namespaced_stores_are_isolated() {
        let storage = MemoryStorage::new();
        let mut a = ChecklistStore::with_settings(&storage, Settings::with_namespace("a"));
        let mut b = ChecklistStore::with_settings(&storage, Settings::with_namespace("b"));
        a.save(vec![template("Only in a")]).unwrap();
        assert_eq!(a.load().len(), 1);
        assert!(b.load().is_empty());
    }
}
