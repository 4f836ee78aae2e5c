//! Checklist Core entry point
//!
//! Opens the stores on the platform backend (files on native, LocalStorage
//! on web) and reports what they hold.

use checklist_core::platform::KeyValueStore;
use checklist_core::{ChecklistStore, ShipDetailsStore};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Human-readable overview of the stored checklists and ship details
fn summary<S: KeyValueStore>(
    checklists: &ChecklistStore<S>,
    ship: &ShipDetailsStore<S>,
) -> Vec<String> {
    let mut lines = vec!["Templates:".to_string()];
    for template in checklists.templates() {
        lines.push(format!(
            "  {} [{}] rev {} - {} items",
            template.name,
            template.serial_number,
            template.revision_number,
            template.items.len()
        ));
    }

    lines.push("In progress:".to_string());
    for checklist in checklists.in_progress() {
        lines.push(format!(
            "  {} [{}] {}% complete",
            checklist.name,
            checklist.serial_number,
            checklist.completion_percentage()
        ));
    }

    lines.push("Completed:".to_string());
    for checklist in checklists.completed() {
        let when = checklist
            .completion_date
            .map(|d| d.format("%d.%m.%Y %H:%M").to_string())
            .unwrap_or_default();
        lines.push(format!(
            "  {} [{}] {}",
            checklist.name, checklist.serial_number, when
        ));
    }

    let particulars = ship.ship_particulars();
    if !particulars.ship_name.is_empty() {
        lines.push(format!(
            "Ship: {} (IMO {})",
            particulars.ship_name, particulars.imo_number
        ));
    }
    lines.push(format!("Area tags: {}", ship.areas_and_spaces().len()));
    lines
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    use checklist_core::platform::LocalStorage;

    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    let storage = match LocalStorage::open() {
        Ok(storage) => storage,
        Err(e) => {
            log::error!("Checklist Core (web) has no storage: {}", e);
            return;
        }
    };
    log::info!("Checklist Core (web) using LocalStorage");

    let checklists = ChecklistStore::open(&storage);
    let ship = ShipDetailsStore::open(&storage);
    for line in summary(&checklists, &ship) {
        log::info!("{}", line);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use checklist_core::platform::FileStorage;
    use std::path::PathBuf;

    env_logger::init();

    let dir = std::env::var("CHECKLIST_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("checklist-data"));
    log::info!("Checklist Core (native) using {}", dir.display());

    let storage = match FileStorage::open(&dir) {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("Cannot open {}: {}", dir.display(), e);
            std::process::exit(1);
        }
    };

    let checklists = ChecklistStore::open(&storage);
    let ship = ShipDetailsStore::open(&storage);
    for line in summary(&checklists, &ship) {
        println!("{}", line);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
