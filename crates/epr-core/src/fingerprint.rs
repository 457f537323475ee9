//! Content fingerprints for receivers and groups.
//!
//! A fingerprint is the lowercase hex SHA-256 of a seed string built from a
//! fixed, sorted subset of a record's fields:
//!
//! ```text
//! v1 <value of key 1> <value of key 2> ...
//! ```
//!
//! - arrays contribute each element, in order
//! - objects contribute each `key value` pair in `serde_json::Map` order,
//!   which is sorted by key (neither key set below holds an object today)
//! - scalars contribute their string form (strings unquoted, booleans as
//!   `True`/`False` so digests match records fingerprinted by existing EPR
//!   clients)
//!
//! Every key must be present and truthy. If one is not, there is not enough
//! data to identify the record and no fingerprint is produced.

use serde_json::{Map, Value};
use tracing::debug;

use crate::hash::hash_string;

/// Seed version tag. Changing the seed layout requires a new tag.
pub const SEED_VERSION: &str = "v1";

/// Fields identifying an event receiver.
pub const RECEIVER_KEYS: &[&str] = &["type", "description", "name", "version"];

/// Fields identifying an event receiver group.
pub const GROUP_KEYS: &[&str] = &[
    "type",
    "description",
    "name",
    "version",
    "enabled",
    "event_receiver_ids",
];

/// Record kinds that carry a fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FingerprintKind {
    /// Event receiver: type, description, name, version.
    Receiver,
    /// Event receiver group: receiver keys plus enabled and member ids.
    Group,
}

impl FingerprintKind {
    /// Key set for this kind, in declaration order.
    pub const fn keys(self) -> &'static [&'static str] {
        match self {
            Self::Receiver => RECEIVER_KEYS,
            Self::Group => GROUP_KEYS,
        }
    }

    /// Fingerprint `fields` using this kind's key set.
    pub fn compute(self, fields: &Map<String, Value>) -> Option<String> {
        compute_fingerprint(fields, self.keys())
    }
}

/// Compute the fingerprint of `fields` over `keys`.
///
/// Keys are sorted before use, so the caller's ordering does not matter.
/// Returns `None` when any key is missing or falsy.
pub fn compute_fingerprint(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    let mut keys = keys.to_vec();
    keys.sort_unstable();

    if !keys
        .iter()
        .all(|k| fields.get(*k).is_some_and(is_truthy))
    {
        return None;
    }

    let seed = build_seed(fields, &keys);
    debug!(%seed, "fingerprint seed");
    Some(hash_string(&seed))
}

/// Truthiness used for fingerprint preconditions and filter projections.
///
/// Null, `false`, zero, and empty strings/arrays/objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn build_seed(fields: &Map<String, Value>, sorted_keys: &[&str]) -> String {
    let mut seed = String::from(SEED_VERSION);
    for key in sorted_keys {
        match fields.get(*key) {
            Some(Value::Array(items)) => {
                for item in items {
                    push_part(&mut seed, &render(item));
                }
            }
            Some(Value::Object(map)) => {
                for (k, v) in map {
                    push_part(&mut seed, k);
                    push_part(&mut seed, &render(v));
                }
            }
            Some(other) => push_part(&mut seed, &render(other)),
            None => {}
        }
    }
    seed
}

fn push_part(seed: &mut String, part: &str) {
    seed.push(' ');
    seed.push_str(part);
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn receiver_fields() -> Map<String, Value> {
        fields(json!({
            "name": "foo",
            "type": "dev.cdevents.build.finished",
            "version": "1.0.0",
            "description": "build finished",
        }))
    }

    #[test]
    fn seed_uses_sorted_keys() {
        let f = receiver_fields();
        let mut keys = RECEIVER_KEYS.to_vec();
        keys.sort_unstable();
        assert_eq!(
            build_seed(&f, &keys),
            "v1 build finished foo dev.cdevents.build.finished 1.0.0"
        );
    }

    #[test]
    fn receiver_fingerprint_is_digest_of_seed() {
        let expected = hash_string("v1 build finished foo dev.cdevents.build.finished 1.0.0");
        assert_eq!(
            FingerprintKind::Receiver.compute(&receiver_fields()),
            Some(expected)
        );
    }

    #[test]
    fn key_order_does_not_matter() {
        let f = receiver_fields();
        let a = compute_fingerprint(&f, &["type", "description", "name", "version"]);
        let b = compute_fingerprint(&f, &["version", "name", "description", "type"]);
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn digest_is_lowercase_hex_without_prefix() {
        let fp = FingerprintKind::Receiver.compute(&receiver_fields()).unwrap();
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn missing_key_yields_none() {
        let mut f = receiver_fields();
        let _ = f.remove("type");
        assert_eq!(FingerprintKind::Receiver.compute(&f), None);
    }

    #[test]
    fn falsy_key_yields_none() {
        let mut f = receiver_fields();
        let _ = f.insert("description".into(), json!(""));
        assert_eq!(FingerprintKind::Receiver.compute(&f), None);
    }

    #[test]
    fn unrelated_fields_are_ignored() {
        let mut f = receiver_fields();
        let base = FingerprintKind::Receiver.compute(&f);
        let _ = f.insert("id".into(), json!("01HXYZ"));
        let _ = f.insert("schema".into(), json!({"a": "b"}));
        assert_eq!(FingerprintKind::Receiver.compute(&f), base);
    }

    #[test]
    fn group_seed_expands_ids_and_renders_bool() {
        let f = fields(json!({
            "name": "g",
            "type": "t",
            "version": "1",
            "description": "d",
            "enabled": true,
            "event_receiver_ids": ["r1", "r2"],
        }));
        let mut keys = GROUP_KEYS.to_vec();
        keys.sort_unstable();
        assert_eq!(build_seed(&f, &keys), "v1 d True r1 r2 g t 1");
    }

    #[test]
    fn group_disabled_has_no_fingerprint() {
        let f = fields(json!({
            "name": "g",
            "type": "t",
            "version": "1",
            "description": "d",
            "enabled": false,
            "event_receiver_ids": ["r1"],
        }));
        assert_eq!(FingerprintKind::Group.compute(&f), None);
    }

    fn group_fields() -> Map<String, Value> {
        fields(json!({
            "name": "g",
            "type": "t",
            "version": "1",
            "description": "d",
            "enabled": true,
            "event_receiver_ids": ["r1", "r2"],
        }))
    }

    #[test]
    fn changing_a_member_id_changes_group_digest() {
        let base = FingerprintKind::Group.compute(&group_fields());
        let mut f = group_fields();
        let _ = f.insert("event_receiver_ids".into(), json!(["r1", "r3"]));
        let changed = FingerprintKind::Group.compute(&f);
        assert!(base.is_some() && changed.is_some());
        assert_ne!(base, changed);
    }

    #[test]
    fn changing_each_group_string_key_changes_digest() {
        let base = FingerprintKind::Group.compute(&group_fields());
        for key in ["name", "type", "version", "description"] {
            let mut f = group_fields();
            let _ = f.insert(key.into(), json!("other"));
            let changed = FingerprintKind::Group.compute(&f);
            assert!(changed.is_some(), "{key}");
            assert_ne!(base, changed, "{key}");
        }
    }

    #[test]
    fn adding_a_member_changes_group_digest() {
        let mut f = group_fields();
        let _ = f.insert("event_receiver_ids".into(), json!(["r1", "r2", "r3"]));
        assert_ne!(
            FingerprintKind::Group.compute(&group_fields()),
            FingerprintKind::Group.compute(&f)
        );
    }

    #[test]
    fn object_values_contribute_pairs() {
        let f = fields(json!({"schema": {"a": "1", "b": 2}}));
        assert_eq!(build_seed(&f, &["schema"]), "v1 a 1 b 2");
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([0])));
        assert!(is_truthy(&json!({"k": null})));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn receiver(name: &str, kind: &str, version: &str, description: &str) -> Map<String, Value> {
            fields(json!({
                "name": name,
                "type": kind,
                "version": version,
                "description": description,
            }))
        }

        proptest! {
            #[test]
            fn identical_keys_identical_digest(
                name in "[a-z]{1,12}",
                kind in "[a-z.]{1,12}",
                version in "[0-9.]{1,8}",
                description in "[ -~]{1,24}",
                id_a in "[A-Z0-9]{0,10}",
                id_b in "[A-Z0-9]{0,10}",
            ) {
                let mut a = receiver(&name, &kind, &version, &description);
                let mut b = receiver(&name, &kind, &version, &description);
                let _ = a.insert("id".into(), json!(id_a));
                let _ = b.insert("id".into(), json!(id_b));
                let fa = FingerprintKind::Receiver.compute(&a);
                prop_assert!(fa.is_some());
                prop_assert_eq!(fa, FingerprintKind::Receiver.compute(&b));
            }

            #[test]
            fn changing_any_receiver_key_changes_digest(
                values in proptest::collection::vec("[a-z0-9.]{1,12}", 4),
                replacement in "[a-z0-9.]{1,12}",
                index in 0..4usize,
            ) {
                prop_assume!(values[index] != replacement);
                let a = receiver(&values[0], &values[1], &values[2], &values[3]);
                let mut changed = values.clone();
                changed[index] = replacement;
                let b = receiver(&changed[0], &changed[1], &changed[2], &changed[3]);
                prop_assert_ne!(
                    FingerprintKind::Receiver.compute(&a),
                    FingerprintKind::Receiver.compute(&b)
                );
            }
        }
    }
}
