//! Serial numbers
//!
//! Templates and tags carry short random codes. Instances carry
//! `{template_id}_{epoch_seconds}` so every instance names its source template.
//! The seconds keep six fractional digits so instances spawned within the same
//! second stay distinct.

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::consts::{SERIAL_ALPHABET, TAG_SERIAL_LEN, TEMPLATE_SERIAL_LEN};

/// Random code of `len` characters drawn from `A-Z0-9`
pub fn random_code<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| SERIAL_ALPHABET[rng.random_range(0..SERIAL_ALPHABET.len())] as char)
        .collect()
}

/// Fresh 10-character template serial
pub fn template_serial() -> String {
    random_code(&mut rand::rng(), TEMPLATE_SERIAL_LEN)
}

/// Fresh 6-character tag serial
pub fn tag_serial() -> String {
    random_code(&mut rand::rng(), TAG_SERIAL_LEN)
}

/// Prefix shared by every instance spawned from `template_id`
pub fn instance_prefix(template_id: Uuid) -> String {
    format!("{}_", template_id)
}

/// Serial for an instance of `template_id` created at `created`
pub fn instance_serial(template_id: Uuid, created: DateTime<Utc>) -> String {
    format!(
        "{}{}.{:06}",
        instance_prefix(template_id),
        created.timestamp(),
        created.timestamp_subsec_micros()
    )
}

/// Whether `serial` belongs to an instance of `template_id`.
///
/// Plain prefix test: any unrelated serial that happens to start with the
/// same `{id}_` text also matches.
pub fn is_instance_of(serial: &str, template_id: Uuid) -> bool {
    serial.starts_with(&instance_prefix(template_id))
}
