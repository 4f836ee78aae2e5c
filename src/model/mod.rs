//! Data model
//!
//! Plain serde values. No storage or clock access beyond fresh ids and
//! creation timestamps.

pub mod checklist;
pub mod item;
pub mod ship;

pub use checklist::{Checklist, ChecklistState};
pub use item::{
    CheckOption, CheckOptions, ChecklistItem, ChecklistItemType, ChecklistUserInput,
    LocationSettings, TextAlignment, TextFormatting,
};
pub use ship::{AreasAndSpaces, CrewPosition, ShipParticulars, Tag, TagSection};

/// proptest strategies shared by the model and lifecycle tests
#[cfg(test)]
pub(crate) mod strategies {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn any_uuid() -> impl Strategy<Value = Uuid> {
        any::<u128>().prop_map(Uuid::from_u128)
    }

    fn any_date() -> impl Strategy<Value = DateTime<Utc>> {
        (0i64..4_000_000_000, 0u32..1_000_000_000)
            .prop_map(|(secs, nanos)| Utc.timestamp_opt(secs, nanos).unwrap())
    }

    fn any_item_type() -> impl Strategy<Value = ChecklistItemType> {
        proptest::sample::select(ChecklistItemType::ALL.to_vec())
    }

    fn any_check_option() -> impl Strategy<Value = CheckOption> {
        prop_oneof![
            Just(CheckOption::Yes),
            Just(CheckOption::No),
            Just(CheckOption::NotApplicable),
        ]
    }

    fn any_formatting() -> impl Strategy<Value = TextFormatting> {
        (
            any::<bool>(),
            prop_oneof![
                Just(TextAlignment::Left),
                Just(TextAlignment::Center),
                Just(TextAlignment::Justified),
            ],
        )
            .prop_map(|(is_bold, alignment)| TextFormatting { is_bold, alignment })
    }

    fn any_user_input() -> impl Strategy<Value = ChecklistUserInput> {
        (
            proptest::option::of(".{0,12}"),
            proptest::option::of(any_date()),
            proptest::option::of(any_date()),
        )
            .prop_map(|(text, start_date, end_date)| ChecklistUserInput {
                text,
                start_date,
                end_date,
            })
    }

    fn any_location_settings() -> impl Strategy<Value = LocationSettings> {
        (".{0,12}", any::<[bool; 3]>(), 0u32..10).prop_map(|(description, allow, max)| {
            LocationSettings {
                description,
                allow_deck_areas: allow[0],
                allow_engine_spaces: allow[1],
                allow_enclosed_spaces: allow[2],
                max_locations: max,
            }
        })
    }

    pub(crate) fn any_item() -> impl Strategy<Value = ChecklistItem> {
        let text = (
            any_uuid(),
            any_item_type(),
            ".{0,16}",
            ".{0,16}",
            proptest::option::of(".{0,16}"),
        );
        let answers = (
            proptest::option::of(any_user_input()),
            proptest::option::of(any::<[bool; 3]>()),
            proptest::option::of(any_formatting()),
            proptest::option::of(any_check_option()),
        );
        let validity = (
            proptest::option::of(any_date()),
            proptest::option::of(0u32..1000),
            proptest::option::of(0u32..1000),
            proptest::option::of(any_location_settings()),
        );
        (text, answers, validity).prop_map(
            |(
                (id, item_type, header_text, body_text, support_text),
                (user_input, check, formatting, selected_option),
                (
                    validity_start_date,
                    validity_duration_hours,
                    max_validity_hours,
                    location_settings,
                ),
            )| {
                let mut item = ChecklistItem {
                    id,
                    item_type,
                    header_text,
                    body_text,
                    support_text,
                    user_input,
                    check_options: check.map(|[yes, no, na]| CheckOptions { yes, no, na }),
                    formatting,
                    selected_option,
                    validity_start_date,
                    validity_duration_hours,
                    max_validity_hours,
                    location_settings,
                };
                item.set_item_type(item_type);
                item
            },
        )
    }

    pub(crate) fn any_checklist() -> impl Strategy<Value = Checklist> {
        let header = (any_uuid(), ".{0,16}", ".{0,16}", 0u32..50, any_date(), ".{0,16}");
        let body = (
            proptest::collection::vec(any_item(), 0..6),
            "[A-Z0-9_]{0,20}",
            prop_oneof![
                Just(ChecklistState::Template),
                Just(ChecklistState::InProgress),
                Just(ChecklistState::Completed),
            ],
            proptest::option::of(any_date()),
            proptest::option::of(any_date()),
        );
        (header, body).prop_map(
            |(
                (id, name, subtitle, revision_number, revision_date, approved_by),
                (items, serial_number, state, created_date, completion_date),
            )| Checklist {
                id,
                name,
                subtitle,
                revision_number,
                revision_date,
                approved_by,
                items,
                serial_number,
                state,
                created_date,
                completion_date,
            },
        )
    }

}

#[cfg(test)]
mod tests {
    use super::strategies::{any_checklist, any_item};
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_item_json_roundtrip(item in any_item()) {
            let json = serde_json::to_string(&item).unwrap();
            let decoded: ChecklistItem = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(&decoded, &item);
            prop_assert_eq!(serde_json::to_string(&decoded).unwrap(), json);
        }

        #[test]
        fn prop_checklist_json_roundtrip(checklist in any_checklist()) {
            let json = serde_json::to_string(&checklist).unwrap();
            let decoded: Checklist = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(&decoded, &checklist);
            prop_assert_eq!(serde_json::to_string(&decoded).unwrap(), json);
        }
    }

    #[test]
    fn test_all_optional_fields_null() {
        let item = ChecklistItem::new(ChecklistItemType::SingleLineCheck);
        let json = serde_json::to_string(&item).unwrap();
        let decoded: ChecklistItem = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, item);

        let mut checklist = Checklist::new_template("Bare");
        checklist.items.push(item);
        let json = serde_json::to_string(&checklist).unwrap();
        assert!(!json.contains("createdDate"));
        let decoded: Checklist = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, checklist);
    }
}
