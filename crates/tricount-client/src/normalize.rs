//! Schema validation for the raw registry payload.
//!
//! Two extraction paths with deliberately different failure contracts:
//! `registry_metadata` is lenient (display data is best-effort, absence
//! yields `None`), while `normalize` is strict (membership and entry arrays
//! must be present and well-shaped, anything else is a structural error).

use serde::Deserialize;
use serde_json::Value;

use crate::error::TricountError;
use crate::model::{Allocation, LedgerSnapshot, Member, RegistryMetadata, Transaction};

/// Lenient metadata extraction. A missing or ill-shaped
/// `Response[0].Registry` yields `None`; individual fields that are absent
/// or of an unexpected type are simply left unset.
#[must_use]
pub fn registry_metadata(raw: &Value) -> Option<RegistryMetadata> {
    let registry = raw.get("Response")?.get(0)?.get("Registry")?;
    if !registry.is_object() {
        return None;
    }
    Some(RegistryMetadata {
        id: registry.get("id").and_then(Value::as_i64),
        created: string_field(registry, "created"),
        updated: string_field(registry, "updated"),
        uuid: string_field(registry, "uuid"),
        currency: string_field(registry, "currency"),
        emoji: string_field(registry, "emoji"),
        title: string_field(registry, "title"),
        description: string_field(registry, "description"),
        category: string_field(registry, "category"),
        status: string_field(registry, "status"),
        last_activity_timestamp: registry.get("last_activity_timestamp").cloned(),
        public_identifier_token: string_field(registry, "public_identifier_token"),
    })
}

/// Strict normalization into a typed snapshot. Requires
/// `Response[0].Registry` with `memberships` and `all_registry_entry`
/// arrays; any absence or shape mismatch (including unparseable amount
/// strings) is a `Structural` error. Entry order is preserved as delivered.
pub fn normalize(raw: &Value) -> Result<LedgerSnapshot, TricountError> {
    let envelope = RawEnvelope::deserialize(raw)
        .map_err(|error| TricountError::structural(error.to_string()))?;
    let registry = envelope
        .response
        .into_iter()
        .next()
        .and_then(|item| item.registry)
        .ok_or_else(|| TricountError::structural("registry object missing from response"))?;

    let memberships = registry
        .memberships
        .ok_or_else(|| TricountError::structural("memberships array missing"))?;
    let entries = registry
        .entries
        .ok_or_else(|| TricountError::structural("all_registry_entry array missing"))?;

    let memberships = memberships
        .into_iter()
        .map(member_from)
        .collect::<Result<Vec<_>, _>>()?;
    let transactions = entries
        .into_iter()
        .map(|item| transaction_from(item.entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LedgerSnapshot {
        title: registry.title,
        emoji: registry.emoji,
        currency: registry.currency,
        description: registry.description,
        category: registry.category,
        memberships,
        transactions,
    })
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "Response", default)]
    response: Vec<RawResponseItem>,
}

#[derive(Debug, Deserialize)]
struct RawResponseItem {
    #[serde(rename = "Registry", default)]
    registry: Option<RawRegistry>,
}

#[derive(Debug, Deserialize)]
struct RawRegistry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    emoji: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    memberships: Option<Vec<RawMembershipRef>>,
    #[serde(rename = "all_registry_entry", default)]
    entries: Option<Vec<RawEntryItem>>,
}

#[derive(Debug, Deserialize)]
struct RawMembershipRef {
    #[serde(rename = "RegistryMembershipNonUser", default)]
    non_user: Option<RawMembership>,
}

#[derive(Debug, Deserialize)]
struct RawMembership {
    alias: RawAlias,
    uuid: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct RawAlias {
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct RawEntryItem {
    #[serde(rename = "RegistryEntry")]
    entry: RawEntry,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    id: i64,
    uuid: String,
    created: String,
    updated: String,
    amount: RawAmount,
    #[serde(default)]
    description: Option<String>,
    date: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    category_custom: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    type_transaction: Option<String>,
    membership_owned: RawMembershipRef,
    #[serde(default)]
    allocations: Vec<RawAllocation>,
    #[serde(default)]
    attachment: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawAllocation {
    membership: RawMembershipRef,
    amount: RawAmount,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    share_ratio: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawAmount {
    value: RawDecimal,
    currency: String,
}

// Upstream emits decimal amounts as strings; tolerate plain numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Text(String),
    Number(f64),
}

impl RawDecimal {
    fn parse(self) -> Result<f64, TricountError> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                TricountError::structural(format!("amount value {text:?} is not a decimal"))
            }),
        }
    }
}

fn member_from(reference: RawMembershipRef) -> Result<Member, TricountError> {
    let membership = reference
        .non_user
        .ok_or_else(|| TricountError::structural("membership reference is missing"))?;
    Ok(Member {
        name: membership.alias.display_name,
        uuid: membership.uuid,
        status: membership.status,
    })
}

fn transaction_from(entry: RawEntry) -> Result<Transaction, TricountError> {
    let payer = member_from(entry.membership_owned)?;
    let allocations = entry
        .allocations
        .into_iter()
        .map(allocation_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Transaction {
        id: entry.id,
        uuid: entry.uuid,
        created: entry.created,
        updated: entry.updated,
        amount: entry.amount.value.parse()?,
        currency: entry.amount.currency,
        description: entry.description.unwrap_or_default(),
        date: entry.date,
        category: entry.category,
        category_custom: entry.category_custom,
        kind: entry.kind,
        type_transaction: entry.type_transaction,
        who_paid: payer.name,
        allocations,
        attachment: entry.attachment,
    })
}

fn allocation_from(allocation: RawAllocation) -> Result<Allocation, TricountError> {
    let member = member_from(allocation.membership)?;
    Ok(Allocation {
        name: member.name,
        uuid: member.uuid,
        value: allocation.amount.value.parse()?,
        currency: allocation.amount.currency,
        kind: allocation.kind,
        share_ratio: allocation.share_ratio,
    })
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
