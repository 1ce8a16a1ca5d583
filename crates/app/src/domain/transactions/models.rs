//! Transaction Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::errors::ValidationError, ids::TypedId};

/// Transaction Id. A paid transaction keeps the id of the cart it was promoted from.
pub type TransactionId = TypedId<Transaction>;

/// Transaction Model
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub total_amount: Decimal,
    pub payment_amount: Decimal,
    pub return_amount: Decimal,
    pub paid_at: Option<Timestamp>,
}

impl Transaction {
    /// An unpaid transaction for the given cart total.
    #[must_use]
    pub fn pending(id: TransactionId, total_amount: Decimal) -> Self {
        Self {
            id,
            total_amount,
            payment_amount: Decimal::ZERO,
            return_amount: Decimal::ZERO,
            paid_at: None,
        }
    }

    /// Records the payment and the change owed in one step.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InsufficientPayment`] when `payment_amount` is below the total.
    pub fn apply_payment(&mut self, payment_amount: Decimal) -> Result<(), ValidationError> {
        if payment_amount < self.total_amount {
            return Err(ValidationError::InsufficientPayment {
                total: self.total_amount,
                payment: payment_amount,
            });
        }

        self.payment_amount = payment_amount;
        self.return_amount = payment_amount - self.total_amount;

        Ok(())
    }
}
