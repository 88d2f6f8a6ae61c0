//! Plain save records.
//!
//! Mastery and status effects are persisted by an outside save manager as a
//! flat map of field name to primitive value. JSON objects are used as that
//! map so the records serialize without any extra schema.

pub type Record = serde_json::Map<String, serde_json::Value>;
