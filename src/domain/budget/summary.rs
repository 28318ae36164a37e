//! Budget summary read model and consistency checks.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{Budget, BudgetCategory, CategoryLedger};
use crate::domain::foundation::{percentage_of, CurrencyCode};

/// Per-category line of a budget summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: BudgetCategory,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage_spent: Decimal,
    pub over_budget: bool,
    pub item_count: usize,
}

impl From<&CategoryLedger> for CategorySummary {
    fn from(ledger: &CategoryLedger) -> Self {
        Self {
            name: ledger.name,
            allocated: ledger.allocated,
            spent: ledger.spent,
            remaining: ledger.allocated.saturating_sub(ledger.spent),
            percentage_spent: percentage_of(ledger.spent, ledger.allocated),
            over_budget: ledger.spent > ledger.allocated,
            item_count: ledger.items.len(),
        }
    }
}

/// A category whose stored spend disagrees with its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyAnomaly {
    pub category: BudgetCategory,
    pub recorded_spent: Decimal,
    pub item_total: Decimal,
}

/// Computed overview of a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetSummary {
    pub total_budget: Decimal,
    pub total_allocated: Decimal,
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub currency: CurrencyCode,
    pub savings: Decimal,
    pub emergency_fund: Decimal,
    pub over_budget: bool,
    pub per_category: Vec<CategorySummary>,
    pub anomalies: Vec<ConsistencyAnomaly>,
}

impl BudgetSummary {
    /// Builds the summary from stored running totals.
    ///
    /// Anomalies are reported, never repaired or raised.
    pub fn of(budget: &Budget) -> Self {
        let total_spent = budget.total_spent();
        Self {
            total_budget: budget.total_budget(),
            total_allocated: budget.total_allocated(),
            total_spent,
            remaining: budget.remaining(),
            currency: budget.currency().clone(),
            savings: budget.savings(),
            emergency_fund: budget.emergency_fund(),
            over_budget: total_spent > budget.total_budget(),
            per_category: budget.categories().iter().map(CategorySummary::from).collect(),
            anomalies: detect_anomalies(budget),
        }
    }
}

/// Lists categories where `spent != Σ items.amount`.
pub fn detect_anomalies(budget: &Budget) -> Vec<ConsistencyAnomaly> {
    budget
        .categories()
        .iter()
        .filter(|ledger| !ledger.is_consistent())
        .map(|ledger| ConsistencyAnomaly {
            category: ledger.name,
            recorded_spent: ledger.spent,
            item_total: ledger.item_total(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::budget::{
        BudgetSettings, ExpenseItem, NewExpense, PaymentMethod,
    };
    use crate::domain::foundation::{BudgetId, Timestamp, TripId, MAX_AMOUNT};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn expense(amount: Decimal) -> ExpenseItem {
        ExpenseItem::create(NewExpense {
            description: "Ramen".to_string(),
            amount,
            date: "2024-04-02".parse().unwrap(),
            payment_method: PaymentMethod::Cash,
            receipt: None,
            notes: None,
        })
        .unwrap()
    }

    #[test]
    fn kyoto_food_expense_summary() {
        let mut budget = Budget::empty(BudgetId::new(), TripId::new());
        budget
            .apply_settings(&BudgetSettings {
                total_budget: dec!(2000),
                currency: CurrencyCode::usd(),
                allocations: vec![
                    (BudgetCategory::Accommodation, dec!(800)),
                    (BudgetCategory::Food, dec!(400)),
                ],
                savings: None,
                emergency_fund: None,
            })
            .unwrap();
        budget.append_expense(BudgetCategory::Food, expense(dec!(18.50))).unwrap();

        let summary = BudgetSummary::of(&budget);
        let food = summary
            .per_category
            .iter()
            .find(|c| c.name == BudgetCategory::Food)
            .unwrap();

        assert_eq!(food.spent, dec!(18.50));
        assert_eq!(food.remaining, dec!(381.50));
        assert_eq!(food.percentage_spent, dec!(4.63));
        assert_eq!(summary.total_allocated, dec!(1200));
        assert_eq!(summary.total_spent, dec!(18.50));
        assert_eq!(summary.remaining, dec!(1981.50));
        assert!(!summary.over_budget);
        assert!(summary.anomalies.is_empty());
    }

    #[test]
    fn zero_allocation_reports_zero_percentage() {
        let mut budget = Budget::empty(BudgetId::new(), TripId::new());
        budget.append_expense(BudgetCategory::Shopping, expense(dec!(99))).unwrap();

        let summary = BudgetSummary::of(&budget);
        let shopping = &summary.per_category[4];
        assert_eq!(shopping.name, BudgetCategory::Shopping);
        assert_eq!(shopping.percentage_spent, Decimal::ZERO);
        assert!(shopping.over_budget);
        assert!(summary.over_budget);
    }

    #[test]
    fn tiny_allocation_with_large_spend_saturates_percentage() {
        let mut budget = Budget::empty(BudgetId::new(), TripId::new());
        budget
            .set_allocation(BudgetCategory::Activities, Decimal::new(1, 28))
            .unwrap();
        budget
            .append_expense(BudgetCategory::Activities, expense(MAX_AMOUNT))
            .unwrap();

        let summary = BudgetSummary::of(&budget);
        let activities = &summary.per_category[3];
        assert_eq!(activities.name, BudgetCategory::Activities);
        assert_eq!(activities.percentage_spent, Decimal::MAX);
        assert!(activities.over_budget);
        assert_eq!(summary.total_spent, MAX_AMOUNT);
    }

    #[test]
    fn drifted_spend_is_flagged_not_fatal() {
        let mut food = CategoryLedger::empty(BudgetCategory::Food);
        food.items.push(expense(dec!(10)));
        food.spent = dec!(25);
        let budget = Budget::reconstitute(
            BudgetId::new(),
            TripId::new(),
            dec!(100),
            CurrencyCode::usd(),
            vec![food],
            Decimal::ZERO,
            Decimal::ZERO,
            None,
            Timestamp::now(),
        );

        let summary = BudgetSummary::of(&budget);
        assert_eq!(
            summary.anomalies,
            vec![ConsistencyAnomaly {
                category: BudgetCategory::Food,
                recorded_spent: dec!(25),
                item_total: dec!(10),
            }]
        );
        assert_eq!(summary.total_spent, dec!(25));
    }

    proptest! {
        #[test]
        fn percentage_is_zero_whenever_allocation_is_zero(spent_cents in 0i64..10_000_000) {
            let mut ledger = CategoryLedger::empty(BudgetCategory::Food);
            ledger.spent = Decimal::new(spent_cents, 2);
            prop_assert_eq!(CategorySummary::from(&ledger).percentage_spent, Decimal::ZERO);
        }

        #[test]
        fn remaining_is_total_minus_spent(total in 0i64..1_000_000, amounts in proptest::collection::vec(1i64..50_000, 0..10)) {
            let mut budget = Budget::empty(BudgetId::new(), TripId::new());
            budget.apply_settings(&BudgetSettings {
                total_budget: Decimal::new(total, 2),
                currency: CurrencyCode::usd(),
                allocations: vec![],
                savings: None,
                emergency_fund: None,
            }).unwrap();
            for (i, cents) in amounts.iter().enumerate() {
                let category = BudgetCategory::ALL[i % 6];
                budget.append_expense(category, expense(Decimal::new(*cents, 2))).unwrap();
            }
            let summary = BudgetSummary::of(&budget);
            let spent: Decimal = summary.per_category.iter().map(|c| c.spent).sum();
            prop_assert_eq!(summary.remaining, summary.total_budget - spent);
        }
    }
}
