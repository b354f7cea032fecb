//! Transaction display formatting
//!
//! Formats transactions for terminal display as a register-style listing.

use crate::models::{Money, Transaction, TransactionKind};

/// Format a list of transactions as a register
pub fn format_transaction_list(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let category_width = transactions
        .iter()
        .map(|t| t.category.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<7}  {:<category_width$}  {:>12}  {}\n",
        "ID",
        "Date",
        "Kind",
        "Category",
        "Amount",
        "Memo",
        category_width = category_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<7}  {:-<category_width$}  {:->12}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        category_width = category_width,
    ));

    let mut spent = Money::zero();
    for txn in transactions {
        let marker = if txn.is_active { "" } else { " (inactive)" };
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<7}  {:<category_width$}  {:>12}  {}{}\n",
            txn.id.to_string(),
            txn.date.to_string(),
            txn.kind.to_string(),
            txn.category,
            txn.amount.to_string(),
            txn.memo,
            marker,
            category_width = category_width,
        ));

        if txn.is_active && txn.kind == TransactionKind::Expense {
            spent += txn.amount;
        }
    }

    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<7}  {:-<category_width$}  {:->12}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        category_width = category_width,
    ));
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<7}  {:<category_width$}  {:>12}\n",
        "TOTAL SPENT",
        "",
        "",
        "",
        spent.to_string(),
        category_width = category_width,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use chrono::NaiveDate;

    fn create_test_transaction(cents: i64, category: &str) -> Transaction {
        Transaction::expense(
            UserId::new(),
            Money::from_cents(cents),
            category,
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        )
    }

    #[test]
    fn test_format_transaction_list() {
        let transactions = vec![
            create_test_transaction(2500, "Groceries"),
            create_test_transaction(1200, "Dining"),
        ];

        let output = format_transaction_list(&transactions);
        assert!(output.contains("Groceries"));
        assert!(output.contains("$25.00"));
        assert!(output.contains("TOTAL SPENT"));
        assert!(output.contains("$37.00"));
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_transaction_list(&[]);
        assert!(output.contains("No transactions found"));
    }

    #[test]
    fn test_inactive_transactions_excluded_from_total() {
        let mut retired = create_test_transaction(9900, "Groceries");
        retired.deactivate();
        let transactions = vec![create_test_transaction(2500, "Groceries"), retired];

        let output = format_transaction_list(&transactions);
        assert!(output.contains("(inactive)"));
        assert!(output.contains("$25.00"));
    }
}
