//! Checklist lifecycle
//!
//! Template -> in-progress instance -> completed. Templates never change state
//! themselves; `create_instance` produces an independent copy.
//!
//! Completion only counts items whose type requires input:
//! - check items need a selected option
//! - location/purpose items need non-blank text
//!
//! Everything else is informational and always satisfied.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{Checklist, ChecklistItem, ChecklistItemType, ChecklistState};
use crate::serial;

impl ChecklistItem {
    /// Copy of a template item with a fresh id and no answers.
    ///
    /// Validity items start their window at `now` and keep the template's
    /// duration; every other type drops both.
    pub fn instance_copy(&self, now: DateTime<Utc>) -> ChecklistItem {
        let is_validity = self.item_type == ChecklistItemType::ValidityDetails;

        let mut copy = ChecklistItem::new(self.item_type);
        copy.header_text = self.header_text.clone();
        copy.body_text = self.body_text.clone();
        copy.support_text = self.support_text.clone();
        copy.user_input = None;
        copy.check_options = self.check_options;
        copy.formatting = self.formatting;
        copy.selected_option = None;
        copy.validity_start_date = is_validity.then_some(now);
        copy.validity_duration_hours = if is_validity {
            self.validity_duration_hours
        } else {
            None
        };
        copy.max_validity_hours = self.max_validity_hours;
        if let Some(settings) = &self.location_settings {
            copy.location_settings = Some(settings.clone());
        }
        copy
    }

    /// Whether this item needs an answer before completion
    pub fn requires_input(&self) -> bool {
        self.item_type.requires_input()
    }

    /// Whether the item counts as answered
    pub fn is_satisfied(&self) -> bool {
        if self.item_type.is_check() {
            self.selected_option.is_some()
        } else if self.item_type.is_text_input() {
            self.input_text().is_some_and(|text| !text.trim().is_empty())
        } else {
            true
        }
    }
}

impl Checklist {
    /// Derive an in-progress instance, stamped with the current time
    pub fn create_instance(&self) -> Checklist {
        self.create_instance_at(Utc::now())
    }

    /// Derive an in-progress instance created at `now`
    pub fn create_instance_at(&self, now: DateTime<Utc>) -> Checklist {
        let items: Vec<ChecklistItem> = self
            .items
            .iter()
            .map(|item| item.instance_copy(now))
            .collect();

        log::debug!(
            "Instantiating '{}' ({} items) from {}",
            self.name,
            items.len(),
            self.id
        );

        Checklist {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            subtitle: self.subtitle.clone(),
            revision_number: self.revision_number,
            revision_date: self.revision_date,
            approved_by: self.approved_by.clone(),
            items,
            serial_number: serial::instance_serial(self.id, now),
            state: ChecklistState::InProgress,
            created_date: Some(now),
            completion_date: None,
        }
    }

    /// Percentage (0-100, rounded down) of required items answered.
    /// A checklist with nothing to answer is 100% complete.
    pub fn completion_percentage(&self) -> u8 {
        let (required, satisfied) = self
            .items
            .iter()
            .filter(|item| item.requires_input())
            .fold((0usize, 0usize), |(required, satisfied), item| {
                (required + 1, satisfied + usize::from(item.is_satisfied()))
            });

        if required == 0 {
            return 100;
        }
        (satisfied * 100 / required) as u8
    }

    /// Every required item is answered
    pub fn is_complete(&self) -> bool {
        self.completion_percentage() == 100
    }

    /// Sign off the instance now. Must not be called on a template.
    pub fn mark_completed(&mut self) {
        self.mark_completed_at(Utc::now());
    }

    pub fn mark_completed_at(&mut self, now: DateTime<Utc>) {
        debug_assert!(!self.is_template(), "templates are never completed");
        self.state = ChecklistState::Completed;
        self.completion_date = Some(now);
    }
}
