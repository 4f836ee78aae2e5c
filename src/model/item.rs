//! Checklist items
//!
//! An item's type decides which of its optional fields mean anything.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::DEFAULT_MAX_LOCATIONS;

/// Kind of checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ChecklistItemType {
    /// Free-form informational text
    #[default]
    DescriptionText,
    /// Where the work takes place (filled from ship area tags)
    LocationDetails,
    /// Why the work takes place
    PurposeDetails,
    /// Validity window (start + duration)
    ValidityDetails,
    /// Section heading
    ParagraphHeader,
    /// Yes/No/N/A on one line
    SingleLineCheck,
    /// Yes/No/N/A with header and body
    DoubleLineCheck,
}

impl ChecklistItemType {
    pub const ALL: [ChecklistItemType; 7] = [
        ChecklistItemType::DescriptionText,
        ChecklistItemType::LocationDetails,
        ChecklistItemType::PurposeDetails,
        ChecklistItemType::ValidityDetails,
        ChecklistItemType::ParagraphHeader,
        ChecklistItemType::SingleLineCheck,
        ChecklistItemType::DoubleLineCheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistItemType::DescriptionText => "descriptionText",
            ChecklistItemType::LocationDetails => "locationDetails",
            ChecklistItemType::PurposeDetails => "purposeDetails",
            ChecklistItemType::ValidityDetails => "validityDetails",
            ChecklistItemType::ParagraphHeader => "paragraphHeader",
            ChecklistItemType::SingleLineCheck => "singleLineCheck",
            ChecklistItemType::DoubleLineCheck => "doubleLineCheck",
        }
    }

    /// Answered with a Yes/No/N/A selection
    pub fn is_check(&self) -> bool {
        matches!(
            self,
            ChecklistItemType::SingleLineCheck | ChecklistItemType::DoubleLineCheck
        )
    }

    /// Answered with free text
    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            ChecklistItemType::LocationDetails | ChecklistItemType::PurposeDetails
        )
    }

    /// Must be answered before the checklist can reach 100%
    pub fn requires_input(&self) -> bool {
        self.is_check() || self.is_text_input()
    }
}

/// Answer to a check item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckOption {
    #[serde(rename = "Yes")]
    Yes,
    #[serde(rename = "No")]
    No,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl CheckOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckOption::Yes => "Yes",
            CheckOption::No => "No",
            CheckOption::NotApplicable => "N/A",
        }
    }
}

/// Which answers a check item offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOptions {
    pub yes: bool,
    pub no: bool,
    pub na: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            yes: true,
            no: true,
            na: true,
        }
    }
}

impl CheckOptions {
    pub fn allows(&self, option: CheckOption) -> bool {
        match option {
            CheckOption::Yes => self.yes,
            CheckOption::No => self.no,
            CheckOption::NotApplicable => self.na,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextFormatting {
    pub is_bold: bool,
    pub alignment: TextAlignment,
}

/// Text captured while filling out an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistUserInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl ChecklistUserInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Which area classes a location item may pick from, and how many
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSettings {
    pub description: String,
    pub allow_deck_areas: bool,
    pub allow_engine_spaces: bool,
    pub allow_enclosed_spaces: bool,
    pub max_locations: u32,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            description: String::new(),
            allow_deck_areas: true,
            allow_engine_spaces: true,
            allow_enclosed_spaces: true,
            max_locations: DEFAULT_MAX_LOCATIONS,
        }
    }
}

/// A single checklist entry
///
/// `location_settings` is always present on `LocationDetails` items: every
/// constructor, [`set_item_type`](Self::set_item_type) and deserialization
/// fill in the defaults when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ChecklistItemRecord")]
pub struct ChecklistItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub item_type: ChecklistItemType,
    pub header_text: String,
    pub body_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_input: Option<ChecklistUserInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_options: Option<CheckOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<TextFormatting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<CheckOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_duration_hours: Option<u32>,
    /// Upper bound for `validity_duration_hours`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_validity_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_settings: Option<LocationSettings>,
}

/// Wire shape of [`ChecklistItem`]; converting restores the location invariant
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChecklistItemRecord {
    id: Uuid,
    #[serde(rename = "type", default)]
    item_type: ChecklistItemType,
    #[serde(default)]
    header_text: String,
    #[serde(default)]
    body_text: String,
    support_text: Option<String>,
    user_input: Option<ChecklistUserInput>,
    check_options: Option<CheckOptions>,
    formatting: Option<TextFormatting>,
    selected_option: Option<CheckOption>,
    validity_start_date: Option<DateTime<Utc>>,
    validity_duration_hours: Option<u32>,
    max_validity_hours: Option<u32>,
    location_settings: Option<LocationSettings>,
}

impl From<ChecklistItemRecord> for ChecklistItem {
    fn from(record: ChecklistItemRecord) -> Self {
        let mut item = Self {
            id: record.id,
            item_type: record.item_type,
            header_text: record.header_text,
            body_text: record.body_text,
            support_text: record.support_text,
            user_input: record.user_input,
            check_options: record.check_options,
            formatting: record.formatting,
            selected_option: record.selected_option,
            validity_start_date: record.validity_start_date,
            validity_duration_hours: record.validity_duration_hours,
            max_validity_hours: record.max_validity_hours,
            location_settings: record.location_settings,
        };
        item.ensure_location_settings();
        item
    }
}

impl ChecklistItem {
    /// Create an empty item of the given type
    pub fn new(item_type: ChecklistItemType) -> Self {
        let mut item = Self {
            id: Uuid::new_v4(),
            item_type,
            header_text: String::new(),
            body_text: String::new(),
            support_text: None,
            user_input: None,
            check_options: None,
            formatting: None,
            selected_option: None,
            validity_start_date: None,
            validity_duration_hours: None,
            max_validity_hours: None,
            location_settings: None,
        };
        item.ensure_location_settings();
        item
    }

    /// Create an item with header and body text
    pub fn with_text(
        item_type: ChecklistItemType,
        header_text: impl Into<String>,
        body_text: impl Into<String>,
    ) -> Self {
        let mut item = Self::new(item_type);
        item.header_text = header_text.into();
        item.body_text = body_text.into();
        item
    }

    /// Change the item type, keeping the location invariant
    pub fn set_item_type(&mut self, item_type: ChecklistItemType) {
        self.item_type = item_type;
        self.ensure_location_settings();
    }

    fn ensure_location_settings(&mut self) {
        if self.item_type == ChecklistItemType::LocationDetails && self.location_settings.is_none()
        {
            self.location_settings = Some(LocationSettings::default());
        }
    }

    /// End of the validity window, derived from start + duration
    pub fn validity_end_date(&self) -> Option<DateTime<Utc>> {
        let start = self.validity_start_date?;
        let hours = self.validity_duration_hours?;
        start.checked_add_signed(Duration::hours(i64::from(hours)))
    }

    /// Set the validity duration, clamped to `max_validity_hours` when present
    pub fn set_validity_duration(&mut self, hours: u32) {
        let hours = match self.max_validity_hours {
            Some(max) => hours.min(max),
            None => hours,
        };
        self.validity_duration_hours = Some(hours);
    }

    /// Record a check answer. Returns false when the item's options forbid it.
    pub fn select_option(&mut self, option: CheckOption) -> bool {
        let allowed = self.check_options.unwrap_or_default().allows(option);
        if allowed {
            self.selected_option = Some(option);
        }
        allowed
    }

    /// Captured free text, if any
    pub fn input_text(&self) -> Option<&str> {
        self.user_input.as_ref()?.text.as_deref()
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.user_input
            .get_or_insert_with(ChecklistUserInput::default)
            .text = Some(text.into());
    }
}
