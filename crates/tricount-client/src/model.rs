//! Normalized domain model for one registry snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub uuid: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub name: String,
    pub uuid: String,
    pub value: f64,
    pub currency: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub share_ratio: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub uuid: String,
    pub created: String,
    pub updated: String,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    pub category: Option<String>,
    pub category_custom: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub type_transaction: Option<String>,
    pub who_paid: String,
    pub allocations: Vec<Allocation>,
    /// Opaque upstream attachment objects, passed through unmodified.
    #[serde(default)]
    pub attachment: Vec<Value>,
}

/// Best-effort display metadata. Every field is optional: extraction never
/// fails, it just yields less.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryMetadata {
    pub id: Option<i64>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub uuid: Option<String>,
    pub currency: Option<String>,
    pub emoji: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    /// Passed through as-is; upstream has emitted both numbers and strings.
    pub last_activity_timestamp: Option<Value>,
    pub public_identifier_token: Option<String>,
}

/// The complete normalized view of one registry at one point in time.
/// Immutable once produced; a new fetch produces a new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub title: Option<String>,
    pub emoji: Option<String>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub memberships: Vec<Member>,
    pub transactions: Vec<Transaction>,
}
