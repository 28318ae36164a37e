//! Expense items recorded against a budget category.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ExpenseId, ValidationError, MAX_AMOUNT};

/// How an expense was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    MobilePayment,
    #[default]
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::MobilePayment,
        PaymentMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::MobilePayment => "mobile_payment",
            PaymentMethod::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "payment_method",
                    format!("unknown payment method '{}'", s),
                )
            })
    }
}

/// Input for recording a new expense.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub receipt: Option<String>,
    pub notes: Option<String>,
}

/// Partial amendment of an expense. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    pub receipt: Option<String>,
    pub notes: Option<String>,
}

/// One recorded spend event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub receipt: Option<String>,
    pub notes: Option<String>,
}

impl ExpenseItem {
    /// Validates input and assigns a fresh id.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the description is blank or `amount <= 0`
    pub fn create(input: NewExpense) -> Result<Self, DomainError> {
        let description = validate_description(&input.description)?;
        validate_amount(input.amount)?;
        Ok(Self {
            id: ExpenseId::new(),
            description,
            amount: input.amount,
            date: input.date,
            payment_method: input.payment_method,
            receipt: input.receipt,
            notes: input.notes,
        })
    }

    /// Returns the amended copy, validated as a whole.
    pub fn amended(&self, update: &ExpenseUpdate) -> Result<Self, DomainError> {
        let description = match &update.description {
            Some(description) => validate_description(description)?,
            None => self.description.clone(),
        };
        let amount = update.amount.unwrap_or(self.amount);
        validate_amount(amount)?;
        Ok(Self {
            id: self.id,
            description,
            amount,
            date: update.date.unwrap_or(self.date),
            payment_method: update.payment_method.unwrap_or(self.payment_method),
            receipt: update.receipt.clone().or_else(|| self.receipt.clone()),
            notes: update.notes.clone().or_else(|| self.notes.clone()),
        })
    }
}

fn validate_description(description: &str) -> Result<String, ValidationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("description"));
    }
    Ok(trimmed.to_string())
}

fn validate_amount(amount: Decimal) -> Result<(), DomainError> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::validation(
            "amount",
            "Expense amount must be greater than zero",
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(DomainError::validation(
            "amount",
            format!("Expense amount must not exceed {}", MAX_AMOUNT),
        ));
    }
    Ok(())
}
