//! Chart data shaping
//!
//! Two chart views: the binary income-vs-expense split and the per-category
//! split. Colors come from a fixed cyclic palette indexed by rollup rank,
//! so the category panels and the chart legend agree on color assignment.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::summary::{CategoryRollup, Totals};

/// Cyclic color palette for category slices
pub const PALETTE: [&str; 12] = [
    "#22c55e", // green
    "#ef4444", // red
    "#3b82f6", // blue
    "#f59e0b", // amber
    "#8b5cf6", // violet
    "#06b6d4", // cyan
    "#ec4899", // pink
    "#10b981", // emerald
    "#f97316", // orange
    "#6366f1", // indigo
    "#84cc16", // lime
    "#14b8a6", // teal
];

const INCOME_COLOR: &str = "#22c55e";
const EXPENSE_COLOR: &str = "#ef4444";

/// One slice of the income-vs-expense chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSlice {
    pub name: String,
    pub value: Decimal,
    pub color: &'static str,
}

/// One slice of the per-category chart, with the income/expense breakdown
/// the detail tooltip shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySlice {
    pub name: String,
    pub value: Decimal,
    pub income: Decimal,
    pub expense: Decimal,
    pub color: &'static str,
}

/// Receitas-vs-Despesas slices. Zero-valued sides are excluded so an
/// all-income month renders as a single full slice.
pub fn income_expense_slices(totals: &Totals) -> Vec<ChartSlice> {
    let candidates = [
        ("Receitas", totals.income, INCOME_COLOR),
        ("Despesas", totals.expense, EXPENSE_COLOR),
    ];

    candidates
        .into_iter()
        .filter(|(_, value, _)| *value > Decimal::ZERO)
        .map(|(name, value, color)| ChartSlice {
            name: name.to_string(),
            value,
            color,
        })
        .collect()
}

/// One slice per rollup, colored by rank.
pub fn category_slices(rollups: &[CategoryRollup]) -> Vec<CategorySlice> {
    rollups
        .iter()
        .enumerate()
        .map(|(i, r)| CategorySlice {
            name: r.category.clone(),
            value: r.total,
            income: r.income,
            expense: r.expense,
            color: PALETTE[i % PALETTE.len()],
        })
        .collect()
}

/// Share of `value` in `grand_total`, as 0..=100. Zero denominator yields
/// zero rather than a panic (the empty-list case).
pub fn percent(value: Decimal, grand_total: Decimal) -> f64 {
    if grand_total.is_zero() {
        return 0.0;
    }
    (value / grand_total).to_f64().unwrap_or(0.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn rollup(category: &str, income: &str, expense: &str) -> CategoryRollup {
        CategoryRollup {
            category: category.to_string(),
            income: dec(income),
            expense: dec(expense),
            total: dec(income) + dec(expense),
        }
    }

    #[test]
    fn test_income_expense_slices_excludes_zero() {
        let totals = Totals {
            income: dec("100"),
            expense: Decimal::ZERO,
        };

        let slices = income_expense_slices(&totals);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].name, "Receitas");
        assert_eq!(slices[0].color, "#22c55e");
    }

    #[test]
    fn test_income_expense_slices_empty_for_no_data() {
        assert!(income_expense_slices(&Totals::default()).is_empty());
    }

    #[test]
    fn test_end_to_end_proportions() {
        let totals = Totals {
            income: dec("100"),
            expense: dec("40"),
        };

        let slices = income_expense_slices(&totals);
        assert_eq!(slices.len(), 2);

        let grand = totals.grand_total();
        let income_share = percent(slices[0].value, grand);
        let expense_share = percent(slices[1].value, grand);
        assert!((income_share - 100.0 / 140.0 * 100.0).abs() < 1e-9);
        assert!((expense_share - 40.0 / 140.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_slices_colored_by_rank() {
        let rollups = vec![
            rollup("Salario", "1000", "0"),
            rollup("Comida", "0", "300"),
            rollup("Transporte", "0", "100"),
        ];

        let slices = category_slices(&rollups);
        assert_eq!(slices[0].color, PALETTE[0]);
        assert_eq!(slices[1].color, PALETTE[1]);
        assert_eq!(slices[2].color, PALETTE[2]);
        assert_eq!(slices[1].expense, dec("300"));
    }

    #[test]
    fn test_palette_cycles_past_twelve() {
        let rollups: Vec<CategoryRollup> = (0..15)
            .map(|i| rollup(&format!("Cat{}", i), "1", "0"))
            .collect();

        let slices = category_slices(&rollups);
        assert_eq!(slices[12].color, PALETTE[0]);
        assert_eq!(slices[14].color, PALETTE[2]);
    }

    #[test]
    fn test_percent_zero_denominator() {
        assert_eq!(percent(dec("10"), Decimal::ZERO), 0.0);
    }
}
