//! Budget aggregate: per-trip allocation and spend ledger.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BudgetCategory, ExpenseItem, ExpenseUpdate};
use crate::domain::foundation::{
    saturating_sum, BudgetId, CurrencyCode, DomainError, ErrorCode, ExpenseId, Timestamp,
    TripId, MAX_AMOUNT,
};

/// Allocation, running spend and expense items of one category.
///
/// `spent` is maintained incrementally alongside `items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLedger {
    pub name: BudgetCategory,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub items: Vec<ExpenseItem>,
}

impl CategoryLedger {
    pub fn empty(name: BudgetCategory) -> Self {
        Self {
            name,
            allocated: Decimal::ZERO,
            spent: Decimal::ZERO,
            items: Vec::new(),
        }
    }

    /// Sum of item amounts, independent of the running `spent`.
    pub fn item_total(&self) -> Decimal {
        saturating_sum(self.items.iter().map(|item| item.amount))
    }

    pub fn is_consistent(&self) -> bool {
        self.spent == self.item_total()
    }
}

/// Cached result of the last exchange-rate lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRateSnapshot {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: Decimal,
    pub fetched_at: DateTime<Utc>,
}

/// Replacement settings for `setBudget`.
///
/// Categories not named in `allocations` keep their current allocation.
#[derive(Debug, Clone)]
pub struct BudgetSettings {
    pub total_budget: Decimal,
    pub currency: CurrencyCode,
    pub allocations: Vec<(BudgetCategory, Decimal)>,
    pub savings: Option<Decimal>,
    pub emergency_fund: Option<Decimal>,
}

impl BudgetSettings {
    /// Checks that every amount lies in `0..=MAX_AMOUNT`.
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_non_negative("total_budget", self.total_budget)?;
        for (category, amount) in &self.allocations {
            ensure_non_negative(&format!("allocations.{}", category), *amount)?;
        }
        if let Some(savings) = self.savings {
            ensure_non_negative("savings", savings)?;
        }
        if let Some(emergency_fund) = self.emergency_fund {
            ensure_non_negative("emergency_fund", emergency_fund)?;
        }
        Ok(())
    }
}

/// Validates an amount that may be zero but not negative, capped at `MAX_AMOUNT`.
pub fn ensure_non_negative(field: &str, amount: Decimal) -> Result<(), DomainError> {
    if amount < Decimal::ZERO {
        return Err(DomainError::validation(
            field,
            format!("{} must not be negative", field),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(DomainError::validation(
            field,
            format!("{} must not exceed {}", field, MAX_AMOUNT),
        ));
    }
    Ok(())
}

fn spend_out_of_range() -> DomainError {
    DomainError::validation("amount", "Category spend would leave the supported range")
}

/// Budget aggregate.
///
/// # Invariants
///
/// - exactly one ledger per `BudgetCategory`, in canonical order
/// - `total_budget >= 0` and every `allocated >= 0`
/// - each ledger's `spent` equals the sum of its item amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    id: BudgetId,
    trip_id: TripId,
    total_budget: Decimal,
    currency: CurrencyCode,
    categories: Vec<CategoryLedger>,
    savings: Decimal,
    emergency_fund: Decimal,
    exchange_rate: Option<ExchangeRateSnapshot>,
    last_updated: Timestamp,
}

impl Budget {
    /// Empty budget created alongside its trip: zero total, USD, six empty ledgers.
    pub fn empty(id: BudgetId, trip_id: TripId) -> Self {
        Self {
            id,
            trip_id,
            total_budget: Decimal::ZERO,
            currency: CurrencyCode::usd(),
            categories: BudgetCategory::ALL
                .into_iter()
                .map(CategoryLedger::empty)
                .collect(),
            savings: Decimal::ZERO,
            emergency_fund: Decimal::ZERO,
            exchange_rate: None,
            last_updated: Timestamp::now(),
        }
    }

    /// Reconstitute from persistence. Missing category rows become empty ledgers.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: BudgetId,
        trip_id: TripId,
        total_budget: Decimal,
        currency: CurrencyCode,
        stored: Vec<CategoryLedger>,
        savings: Decimal,
        emergency_fund: Decimal,
        exchange_rate: Option<ExchangeRateSnapshot>,
        last_updated: Timestamp,
    ) -> Self {
        let mut stored = stored;
        let categories = BudgetCategory::ALL
            .into_iter()
            .map(|name| match stored.iter().position(|c| c.name == name) {
                Some(index) => stored.swap_remove(index),
                None => CategoryLedger::empty(name),
            })
            .collect();
        Self {
            id,
            trip_id,
            total_budget,
            currency,
            categories,
            savings,
            emergency_fund,
            exchange_rate,
            last_updated,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &BudgetId {
        &self.id
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    pub fn total_budget(&self) -> Decimal {
        self.total_budget
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn categories(&self) -> &[CategoryLedger] {
        &self.categories
    }

    pub fn category(&self, name: BudgetCategory) -> &CategoryLedger {
        // `categories` always holds every variant in `ALL` order.
        &self.categories[category_index(name)]
    }

    pub fn savings(&self) -> Decimal {
        self.savings
    }

    pub fn emergency_fund(&self) -> Decimal {
        self.emergency_fund
    }

    pub fn exchange_rate(&self) -> Option<&ExchangeRateSnapshot> {
        self.exchange_rate.as_ref()
    }

    pub fn last_updated(&self) -> &Timestamp {
        &self.last_updated
    }

    pub fn total_allocated(&self) -> Decimal {
        saturating_sum(self.categories.iter().map(|c| c.allocated))
    }

    pub fn total_spent(&self) -> Decimal {
        saturating_sum(self.categories.iter().map(|c| c.spent))
    }

    /// `total_budget - total_spent`; negative when over budget.
    pub fn remaining(&self) -> Decimal {
        self.total_budget.saturating_sub(self.total_spent())
    }

    /// Locates an expense by id, returning its category.
    pub fn find_expense(&self, expense_id: &ExpenseId) -> Option<(BudgetCategory, &ExpenseItem)> {
        self.categories.iter().find_map(|ledger| {
            ledger
                .items
                .iter()
                .find(|item| &item.id == expense_id)
                .map(|item| (ledger.name, item))
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces total, currency and the named allocations. Spend is preserved.
    pub fn apply_settings(&mut self, settings: &BudgetSettings) -> Result<(), DomainError> {
        settings.validate()?;
        self.total_budget = settings.total_budget;
        self.currency = settings.currency.clone();
        for (category, amount) in &settings.allocations {
            self.categories[category_index(*category)].allocated = *amount;
        }
        if let Some(savings) = settings.savings {
            self.savings = savings;
        }
        if let Some(emergency_fund) = settings.emergency_fund {
            self.emergency_fund = emergency_fund;
        }
        self.touch();
        Ok(())
    }

    /// Sets one category's allocation without touching its spend or items.
    pub fn set_allocation(&mut self, category: BudgetCategory, allocated: Decimal) -> Result<(), DomainError> {
        ensure_non_negative("allocated", allocated)?;
        self.categories[category_index(category)].allocated = allocated;
        self.touch();
        Ok(())
    }

    /// Appends an expense and increments the category's spend in one step.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the new spend would overflow the decimal range
    pub fn append_expense(
        &mut self,
        category: BudgetCategory,
        item: ExpenseItem,
    ) -> Result<(), DomainError> {
        let ledger = &mut self.categories[category_index(category)];
        ledger.spent = ledger
            .spent
            .checked_add(item.amount)
            .ok_or_else(spend_out_of_range)?;
        ledger.items.push(item);
        self.touch();
        Ok(())
    }

    /// Amends an expense in `category`, adjusting spend by the differential.
    ///
    /// # Errors
    ///
    /// - `ExpenseNotFound` if the id is not in the named category
    /// - `ValidationFailed` if the amended expense is invalid
    pub fn amend_expense(
        &mut self,
        category: BudgetCategory,
        expense_id: &ExpenseId,
        update: &ExpenseUpdate,
    ) -> Result<ExpenseItem, DomainError> {
        let ledger = &mut self.categories[category_index(category)];
        let item = ledger
            .items
            .iter_mut()
            .find(|item| &item.id == expense_id)
            .ok_or_else(|| expense_not_found(expense_id))?;

        let amended = item.amended(update)?;
        let spent = ledger
            .spent
            .checked_sub(item.amount)
            .and_then(|rest| rest.checked_add(amended.amount))
            .ok_or_else(spend_out_of_range)?;
        ledger.spent = spent;
        *item = amended.clone();
        self.touch();
        Ok(amended)
    }

    /// Removes an expense from `category`, subtracting its amount from spend.
    pub fn remove_expense(
        &mut self,
        category: BudgetCategory,
        expense_id: &ExpenseId,
    ) -> Result<ExpenseItem, DomainError> {
        let ledger = &mut self.categories[category_index(category)];
        let index = ledger
            .items
            .iter()
            .position(|item| &item.id == expense_id)
            .ok_or_else(|| expense_not_found(expense_id))?;

        let spent = ledger
            .spent
            .checked_sub(ledger.items[index].amount)
            .ok_or_else(spend_out_of_range)?;
        let removed = ledger.items.remove(index);
        ledger.spent = spent;
        self.touch();
        Ok(removed)
    }

    /// Caches an exchange-rate lookup on the budget.
    pub fn record_exchange_rate(&mut self, snapshot: ExchangeRateSnapshot) {
        self.exchange_rate = Some(snapshot);
        self.touch();
    }

    fn touch(&mut self) {
        self.last_updated = Timestamp::now();
    }
}

fn category_index(category: BudgetCategory) -> usize {
    match category {
        BudgetCategory::Accommodation => 0,
        BudgetCategory::Transportation => 1,
        BudgetCategory::Food => 2,
        BudgetCategory::Activities => 3,
        BudgetCategory::Shopping => 4,
        BudgetCategory::Miscellaneous => 5,
    }
}

fn expense_not_found(expense_id: &ExpenseId) -> DomainError {
    DomainError::not_found(ErrorCode::ExpenseNotFound, "expense_id", expense_id)
}
