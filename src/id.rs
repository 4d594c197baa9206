//! Record id generation.
//!
//! Every record carries an opaque string id, assigned at creation and never
//! reused. Ids are lowercase ULIDs: a millisecond time prefix plus random
//! suffix, unique with overwhelming probability on a single device and
//! needing no coordination or network.

use ulid::Ulid;

/// Generate a new record id.
pub fn generate_id() -> String {
    Ulid::new().to_string().to_ascii_lowercase()
}
