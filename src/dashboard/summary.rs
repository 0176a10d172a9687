//! Totals and per-category rollups

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::model::{Transaction, TransactionKind};

/// Overall income and expense totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    /// Net balance: income minus expense.
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }

    /// Sum of both sides, the denominator for chart proportions.
    pub fn grand_total(&self) -> Decimal {
        self.income + self.expense
    }
}

/// Aggregate for one category. Grouping happens on the raw category key
/// (case-sensitive); `category` holds the display name with the first
/// character upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRollup {
    pub category: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub total: Decimal,
}

/// Sum incomes and expenses over the whole list.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut acc = Totals::default();

    for tx in transactions {
        match tx.kind {
            TransactionKind::Receita => acc.income += tx.amount(),
            TransactionKind::Despesa => acc.expense += tx.amount(),
        }
    }

    acc
}

/// Roll transactions up by category, sorted descending by total. The sort
/// is stable, so categories with equal totals keep first-seen order.
pub fn category_rollup(transactions: &[Transaction]) -> Vec<CategoryRollup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rollups: Vec<CategoryRollup> = Vec::new();

    for tx in transactions {
        let slot = *index.entry(tx.category.clone()).or_insert_with(|| {
            rollups.push(CategoryRollup {
                category: capitalize_first(&tx.category),
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
                total: Decimal::ZERO,
            });
            rollups.len() - 1
        });

        let value = tx.amount();
        match tx.kind {
            TransactionKind::Receita => rollups[slot].income += value,
            TransactionKind::Despesa => rollups[slot].expense += value,
        }
        rollups[slot].total += value;
    }

    rollups.sort_by(|a, b| b.total.cmp(&a.total));
    rollups
}

/// Upper-case only the first character, leaving the rest untouched.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn tx(kind: TransactionKind, category: &str, value: &str) -> Transaction {
        Transaction {
            id: format!("{}-{}", category, value),
            kind,
            category: category.to_string(),
            date: Utc::now(),
            value: value.to_string(),
            description: String::new(),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_list_is_all_zero() {
        let t = totals(&[]);
        assert_eq!(t.income, Decimal::ZERO);
        assert_eq!(t.expense, Decimal::ZERO);
        assert_eq!(t.net(), Decimal::ZERO);
        assert!(category_rollup(&[]).is_empty());
    }

    #[test]
    fn test_basic_totals() {
        let list = vec![
            tx(TransactionKind::Receita, "salario", "100"),
            tx(TransactionKind::Despesa, "comida", "40"),
        ];

        let t = totals(&list);
        assert_eq!(t.income, dec("100"));
        assert_eq!(t.expense, dec("40"));
        assert_eq!(t.net(), dec("60"));
        assert_eq!(t.grand_total(), dec("140"));
    }

    #[test]
    fn test_rollup_totals_match_overall_totals() {
        let list = vec![
            tx(TransactionKind::Receita, "salario", "1000"),
            tx(TransactionKind::Despesa, "comida", "123.45"),
            tx(TransactionKind::Despesa, "comida", "10.55"),
            tx(TransactionKind::Receita, "extra", "50"),
            tx(TransactionKind::Despesa, "transporte", "80"),
        ];

        let t = totals(&list);
        let rollups = category_rollup(&list);

        let rollup_sum: Decimal = rollups.iter().map(|r| r.total).sum();
        assert_eq!(rollup_sum, t.grand_total());

        for r in &rollups {
            assert_eq!(r.total, r.income + r.expense);
        }
    }

    #[test]
    fn test_rollup_sorted_descending() {
        let list = vec![
            tx(TransactionKind::Despesa, "b", "30"),
            tx(TransactionKind::Despesa, "c", "20"),
            tx(TransactionKind::Despesa, "a", "50"),
        ];

        let rollups = category_rollup(&list);
        let order: Vec<&str> = rollups.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        assert_eq!(rollups[0].total, dec("50"));
        assert_eq!(rollups[2].total, dec("20"));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let list = vec![
            tx(TransactionKind::Despesa, "zzz", "25"),
            tx(TransactionKind::Despesa, "aaa", "25"),
        ];

        let rollups = category_rollup(&list);
        assert_eq!(rollups[0].category, "Zzz");
        assert_eq!(rollups[1].category, "Aaa");
    }

    #[test]
    fn test_grouping_is_case_sensitive() {
        let list = vec![
            tx(TransactionKind::Despesa, "food", "10"),
            tx(TransactionKind::Despesa, "Food", "20"),
        ];

        let rollups = category_rollup(&list);
        assert_eq!(rollups.len(), 2);
        // Both display as "Food", but remain distinct groups
        assert!(rollups.iter().all(|r| r.category == "Food"));
        assert_eq!(rollups[0].total, dec("20"));
        assert_eq!(rollups[1].total, dec("10"));
    }

    #[test]
    fn test_rollup_splits_income_and_expense() {
        let list = vec![
            tx(TransactionKind::Receita, "vendas", "200"),
            tx(TransactionKind::Despesa, "vendas", "50"),
        ];

        let rollups = category_rollup(&list);
        assert_eq!(rollups.len(), 1);
        assert_eq!(rollups[0].income, dec("200"));
        assert_eq!(rollups[0].expense, dec("50"));
        assert_eq!(rollups[0].total, dec("250"));
    }

    #[test]
    fn test_unparsable_values_count_as_zero() {
        let list = vec![
            tx(TransactionKind::Receita, "salario", "abc"),
            tx(TransactionKind::Receita, "salario", "100"),
        ];

        assert_eq!(totals(&list).income, dec("100"));
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("comida"), "Comida");
        assert_eq!(capitalize_first("Comida"), "Comida");
        assert_eq!(capitalize_first("água"), "Água");
        assert_eq!(capitalize_first(""), "");
    }
}
