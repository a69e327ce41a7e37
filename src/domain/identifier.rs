//! Identifier assignment for new aggregates.

use uuid::Uuid;

/// Assigns opaque identifiers.
///
/// Idempotent: an aggregate that already carries an identifier keeps it.
/// Otherwise a fresh random UUID (v4) is generated. Never consults storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierPolicy;

impl IdentifierPolicy {
    pub fn assign(current: Option<String>) -> String {
        match current {
            Some(id) => id,
            None => Uuid::new_v4().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_id_is_kept() {
        assert_eq!(IdentifierPolicy::assign(Some("car-42".into())), "car-42");
    }

    #[test]
    fn test_new_ids_are_distinct_uuids() {
        let first = IdentifierPolicy::assign(None);
        let second = IdentifierPolicy::assign(None);

        assert_ne!(first, second);
        for id in [&first, &second] {
            let parsed = Uuid::parse_str(id).unwrap();
            assert_eq!(parsed.get_version_num(), 4);
        }
    }
}
