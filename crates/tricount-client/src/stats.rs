//! Payer-based summary totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Sum of absolute transaction amounts, rounded to 2 decimals for display.
    pub total: String,
    pub num_transactions: usize,
    pub per_person: BTreeMap<String, f64>,
}

/// Aggregates per-payer advances: `per_person[name]` is the absolute amount
/// the payer named `name` fronted across all transactions. This is "how much
/// did each member advance", not "how much does each member owe": the
/// allocation-based breakdown is a different quantity and is out of scope
/// here.
#[must_use]
pub fn aggregate(transactions: &[Transaction]) -> StatsSummary {
    let mut total = 0.0_f64;
    let mut per_person: BTreeMap<String, f64> = BTreeMap::new();
    for transaction in transactions {
        let amount = transaction.amount.abs();
        total += amount;
        *per_person.entry(transaction.who_paid.clone()).or_insert(0.0) += amount;
    }
    StatsSummary {
        total: format!("{total:.2}"),
        num_transactions: transactions.len(),
        per_person,
    }
}

#[cfg(test)]
mod tests {
    use super::aggregate;
    use crate::model::Transaction;

    fn transaction(amount: f64, who_paid: &str) -> Transaction {
        Transaction {
            id: 1,
            uuid: "uuid-1".to_string(),
            created: "2024-05-01 10:00:00.000000".to_string(),
            updated: "2024-05-01 10:00:00.000000".to_string(),
            amount,
            currency: "EUR".to_string(),
            description: String::new(),
            date: "2024-05-01".to_string(),
            category: None,
            category_custom: None,
            kind: Some("NORMAL".to_string()),
            type_transaction: None,
            who_paid: who_paid.to_string(),
            allocations: Vec::new(),
            attachment: Vec::new(),
        }
    }

    #[test]
    fn single_payment_totals_match_the_payer() {
        let stats = aggregate(&[transaction(100.0, "Alice")]);
        assert_eq!(stats.total, "100.00");
        assert_eq!(stats.num_transactions, 1);
        assert_eq!(stats.per_person.len(), 1);
        assert_eq!(stats.per_person.get("Alice"), Some(&100.0));
    }

    #[test]
    fn negative_amounts_count_by_absolute_value() {
        let stats = aggregate(&[transaction(-50.0, "Alice"), transaction(30.0, "Bob")]);
        assert_eq!(stats.total, "80.00");
        assert_eq!(stats.num_transactions, 2);
        assert_eq!(stats.per_person.get("Alice"), Some(&50.0));
        assert_eq!(stats.per_person.get("Bob"), Some(&30.0));
    }

    #[test]
    fn per_person_totals_sum_to_the_overall_total() {
        let transactions = vec![
            transaction(12.34, "Alice"),
            transaction(-7.66, "Bob"),
            transaction(5.0, "Alice"),
        ];
        let stats = aggregate(&transactions);
        let per_person_sum: f64 = stats.per_person.values().sum();
        assert!((per_person_sum - 25.0).abs() < 1e-9);
        assert_eq!(stats.total, "25.00");
        let alice = stats.per_person.get("Alice").copied().unwrap_or_default();
        assert!((alice - 17.34).abs() < 1e-9);
    }

    #[test]
    fn empty_ledger_aggregates_to_zero() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total, "0.00");
        assert_eq!(stats.num_transactions, 0);
        assert!(stats.per_person.is_empty());
    }
}
