//! Location suggestions for `LocationDetails` items
//!
//! Candidates come from the ship's area tags, limited to the area classes the
//! item allows, in deck -> engine -> enclosed order.

use crate::model::{AreasAndSpaces, LocationSettings, Tag, TagSection};

/// Sections a location item may draw from
pub fn allowed_sections(settings: &LocationSettings) -> Vec<TagSection> {
    [
        (settings.allow_deck_areas, TagSection::Deck),
        (settings.allow_engine_spaces, TagSection::Engine),
        (settings.allow_enclosed_spaces, TagSection::Enclosed),
    ]
    .into_iter()
    .filter_map(|(allowed, section)| allowed.then_some(section))
    .collect()
}

/// Tags whose text contains `query`, ignoring case. Empty query suggests nothing.
pub fn suggest<'a>(
    settings: &LocationSettings,
    areas: &'a AreasAndSpaces,
    query: &str,
) -> Vec<&'a Tag> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    allowed_sections(settings)
        .into_iter()
        .flat_map(move |section| areas.section(section))
        .filter(|tag| tag.text.to_lowercase().contains(&query))
        .collect()
}

/// Add `tag` to the selection if there is room and it isn't picked already
pub fn select_location(selected: &mut Vec<Tag>, tag: &Tag, settings: &LocationSettings) -> bool {
    if selected.len() >= settings.max_locations as usize {
        return false;
    }
    if selected.iter().any(|t| t.id == tag.id) {
        return false;
    }
    selected.push(tag.clone());
    true
}

/// Joined text of the selected locations, as stored in the item's user input
pub fn selection_text(selected: &[Tag]) -> String {
    selected
        .iter()
        .map(|tag| tag.text.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
