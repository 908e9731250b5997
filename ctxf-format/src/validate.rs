//! Structural validation of wire-format transactions.
//!
//! The validator is the gate in front of deserialization and assembly: it
//! checks every entry of the untyped wire JSON against the schema its
//! position selects, reports violations, and returns the conjunction of the
//! per-entry outcomes. It never errors — a violation is a finding, not a
//! failure, and the caller decides whether to abort submission.

use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Exact hex length of a compressed commitment or token on the wire.
pub const COMMITMENT_HEX_LEN: usize = 66;

/// Expected JSON kind of a schema field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Sequence,
    Text,
}

/// One row of a schema table: field name, expected kind, optional exact
/// length, and the human-readable description used in reports.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub len: Option<usize>,
    pub description: &'static str,
}

/// Schema for the entry at the sender's position.
///
/// `P_A` must be a sequence; an alternate on-chain representation expects a
/// mapping here, but that variant is not implemented and only the sequence
/// contract is active.
pub const SENDER_SCHEMA: &[FieldRule] = &[
    FieldRule {
        name: "P_A",
        kind: FieldKind::Sequence,
        len: None,
        description: "asset validity proof",
    },
    FieldRule {
        name: "P_C_",
        kind: FieldKind::Text,
        len: None,
        description: "complementary consistency proof",
    },
    FieldRule {
        name: "cm_",
        kind: FieldKind::Text,
        len: Some(COMMITMENT_HEX_LEN),
        description: "complementary commitment",
    },
    FieldRule {
        name: "token_",
        kind: FieldKind::Text,
        len: Some(COMMITMENT_HEX_LEN),
        description: "complementary token",
    },
    FieldRule {
        name: "P_C",
        kind: FieldKind::Text,
        len: None,
        description: "consistency proof",
    },
    FieldRule {
        name: "cm",
        kind: FieldKind::Text,
        len: Some(COMMITMENT_HEX_LEN),
        description: "commitment",
    },
    FieldRule {
        name: "token",
        kind: FieldKind::Text,
        len: Some(COMMITMENT_HEX_LEN),
        description: "token",
    },
];

/// Schema for every entry not at the sender's position.
pub const OTHER_SCHEMA: &[FieldRule] = &[
    FieldRule {
        name: "P_A",
        kind: FieldKind::Sequence,
        len: None,
        description: "asset validity proof",
    },
    FieldRule {
        name: "P_C",
        kind: FieldKind::Text,
        len: None,
        description: "consistency proof",
    },
    FieldRule {
        name: "cm",
        kind: FieldKind::Text,
        len: Some(COMMITMENT_HEX_LEN),
        description: "commitment",
    },
    FieldRule {
        name: "token",
        kind: FieldKind::Text,
        len: Some(COMMITMENT_HEX_LEN),
        description: "token",
    },
];

/// Reported-only finding: the first field of an entry that failed its rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaViolation {
    pub group: usize,
    pub position: usize,
    pub field: &'static str,
    pub description: &'static str,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry ({}, {}): {} field '{}' has the wrong type or length",
            self.group, self.position, self.description, self.field
        )
    }
}

fn rule_matches(rule: &FieldRule, value: Option<&Value>) -> bool {
    match (rule.kind, value) {
        (FieldKind::Sequence, Some(Value::Array(_))) => true,
        (FieldKind::Text, Some(Value::String(s))) => rule.len.map_or(true, |len| s.len() == len),
        _ => false,
    }
}

/// Check a single entry against the schema its position selects, stopping at
/// the first failing field.
pub fn check_entry(
    entry: &Value,
    group: usize,
    position: usize,
    send_id: usize,
) -> Result<(), SchemaViolation> {
    let schema = if position == send_id {
        SENDER_SCHEMA
    } else {
        OTHER_SCHEMA
    };
    for rule in schema {
        if !rule_matches(rule, entry.get(rule.name)) {
            return Err(SchemaViolation {
                group,
                position,
                field: rule.name,
                description: rule.description,
            });
        }
    }
    Ok(())
}

/// Check every entry of a wire-format transaction.
///
/// `send_id` is the sender's position within each group. Each violation is
/// logged and checking continues across the remaining entries; the result is
/// the conjunction of all per-entry outcomes.
pub fn check_transaction_structure(tx: &Value, send_id: usize) -> bool {
    let groups = match tx.as_array() {
        Some(groups) => groups,
        None => {
            warn!("transaction is not an array of asset groups");
            return false;
        }
    };

    let mut all_ok = true;
    for (group, entries) in groups.iter().enumerate() {
        let entries = match entries.as_array() {
            Some(entries) => entries,
            None => {
                warn!(group, "asset group is not an array of entries");
                all_ok = false;
                continue;
            }
        };
        for (position, entry) in entries.iter().enumerate() {
            if let Err(violation) = check_entry(entry, group, position, send_id) {
                warn!(%violation, "transaction structure check failed");
                all_ok = false;
            }
        }
    }
    all_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hex66() -> String {
        "ab".repeat(33)
    }

    fn sender_entry() -> Value {
        json!({
            "P_A": [{}, "eq-proof"],
            "P_C_": "{}",
            "cm_": hex66(),
            "token_": hex66(),
            "P_C": "{}",
            "cm": hex66(),
            "token": hex66()
        })
    }

    fn other_entry() -> Value {
        json!({
            "P_A": [],
            "P_C": "{}",
            "cm": hex66(),
            "token": hex66()
        })
    }

    #[test]
    fn conforming_transaction_passes() {
        let tx = json!([
            [other_entry(), sender_entry()],
            [other_entry(), sender_entry()]
        ]);
        assert!(check_transaction_structure(&tx, 1));
    }

    #[test]
    fn schema_selection_follows_send_id() {
        // A sender-shaped entry satisfies the non-sender schema (superset),
        // but a non-sender entry at the sender's position does not.
        let tx = json!([[sender_entry(), other_entry()]]);
        assert!(check_transaction_structure(&tx, 0));
        assert!(!check_transaction_structure(&tx, 1));
    }

    #[test]
    fn short_complementary_commitment_is_reported_by_field() {
        let mut entry = sender_entry();
        entry["cm_"] = json!("ab".repeat(32) + "a"); // 65 chars
        let violation = check_entry(&entry, 0, 1, 1).unwrap_err();
        assert_eq!(violation.field, "cm_");
        assert_eq!(violation.description, "complementary commitment");
    }

    #[test]
    fn one_bad_entry_fails_the_conjunction() {
        let mut bad_sender = sender_entry();
        bad_sender["cm_"] = json!("too short");
        let tx = json!([
            [other_entry(), bad_sender],
            [other_entry(), sender_entry()]
        ]);
        // The other three entries still pass individually.
        let groups = tx.as_array().unwrap();
        assert!(check_entry(&groups[0][0], 0, 0, 1).is_ok());
        assert!(check_entry(&groups[1][0], 1, 0, 1).is_ok());
        assert!(check_entry(&groups[1][1], 1, 1, 1).is_ok());
        assert!(!check_transaction_structure(&tx, 1));
    }

    #[test]
    fn first_failing_field_wins() {
        // P_A precedes cm_ in the sender table; with both wrong, P_A reports.
        let mut entry = sender_entry();
        entry["P_A"] = json!("not a sequence");
        entry["cm_"] = json!("short");
        let violation = check_entry(&entry, 0, 0, 0).unwrap_err();
        assert_eq!(violation.field, "P_A");
    }

    #[test]
    fn missing_field_is_a_violation() {
        let mut entry = other_entry();
        entry.as_object_mut().unwrap().remove("token");
        let violation = check_entry(&entry, 0, 0, 5).unwrap_err();
        assert_eq!(violation.field, "token");
    }

    #[test]
    fn non_array_shapes_fail() {
        assert!(!check_transaction_structure(&json!({}), 0));
        assert!(!check_transaction_structure(&json!([{}]), 0));
    }
}
