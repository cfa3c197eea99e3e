//! Fee plan - installment schedule for a pack purchase.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// One scheduled payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub amount_cents: u64,
    pub due_date: NaiveDate,
}

impl Installment {
    pub fn new(amount_cents: u64, due_date: NaiveDate) -> Self {
        Self {
            amount_cents,
            due_date,
        }
    }
}

/// Reasons an installment schedule does not add up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeePlanError {
    #[error("Fee plan has no installments")]
    NoInstallments,

    #[error("Installment {index} has a zero amount")]
    ZeroAmount { index: usize },

    #[error("Installment {index} is due on {due_date}, not after the previous one")]
    DueDatesNotAscending { index: usize, due_date: NaiveDate },

    #[error("First installment is due on {due_date}, before the purchase on {purchased_on}")]
    DueBeforePurchase {
        due_date: NaiveDate,
        purchased_on: NaiveDate,
    },

    #[error("Installments sum to {actual} cents but the fee is {expected} cents")]
    TotalMismatch { expected: u64, actual: u64 },

    #[error("Installment amounts overflow at installment {index}")]
    AmountOverflow { index: usize },

    #[error("Cannot split a fee into {count} installments")]
    InvalidSplit { count: u32 },
}

impl From<FeePlanError> for DomainError {
    fn from(err: FeePlanError) -> Self {
        DomainError::new(ErrorCode::FeePlanInvalid, err.to_string())
    }
}

/// How a pack's fee is paid over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePlan {
    pub total_fee_cents: u64,
    pub installments: Vec<Installment>,
}

impl FeePlan {
    /// Longest schedule `even_split` will build.
    pub const MAX_INSTALLMENTS: u32 = 120;

    pub fn new(total_fee_cents: u64, installments: Vec<Installment>) -> Self {
        Self {
            total_fee_cents,
            installments,
        }
    }

    /// Splits `total_fee_cents` into `count` equal installments, `interval_days`
    /// apart, starting on `first_due`. Leftover cents go on the last one.
    pub fn even_split(
        total_fee_cents: u64,
        count: u32,
        first_due: NaiveDate,
        interval_days: u32,
    ) -> Result<Self, FeePlanError> {
        if count == 0
            || count > Self::MAX_INSTALLMENTS
            || total_fee_cents < u64::from(count)
            || (count > 1 && interval_days == 0)
        {
            return Err(FeePlanError::InvalidSplit { count });
        }

        let base = total_fee_cents / u64::from(count);
        let remainder = total_fee_cents % u64::from(count);

        let mut installments = Vec::with_capacity(count as usize);
        let mut due = first_due;
        for i in 0..count {
            if i > 0 {
                due = due
                    .checked_add_days(Days::new(u64::from(interval_days)))
                    .ok_or(FeePlanError::InvalidSplit { count })?;
            }
            let amount = if i + 1 == count { base + remainder } else { base };
            installments.push(Installment::new(amount, due));
        }

        Ok(Self::new(total_fee_cents, installments))
    }

    /// # Errors
    ///
    /// - `AmountOverflow` if the amounts do not fit in a `u64`
    pub fn installments_total(&self) -> Result<u64, FeePlanError> {
        sum_amounts(self.installments.iter().enumerate())
    }

    /// Checks the schedule against the purchase date and the fee.
    ///
    /// # Errors
    ///
    /// Rules are tested in order and the first failure is returned:
    /// non-empty, positive amounts, strictly ascending dates, first date on or
    /// after purchase, exact total. A total that overflows is `AmountOverflow`.
    pub fn reconcile(&self, purchased_on: NaiveDate) -> Result<(), FeePlanError> {
        let first = self
            .installments
            .first()
            .ok_or(FeePlanError::NoInstallments)?;

        if let Some(index) = self.installments.iter().position(|i| i.amount_cents == 0) {
            return Err(FeePlanError::ZeroAmount { index });
        }

        for (index, pair) in self.installments.windows(2).enumerate() {
            if pair[1].due_date <= pair[0].due_date {
                return Err(FeePlanError::DueDatesNotAscending {
                    index: index + 1,
                    due_date: pair[1].due_date,
                });
            }
        }

        if first.due_date < purchased_on {
            return Err(FeePlanError::DueBeforePurchase {
                due_date: first.due_date,
                purchased_on,
            });
        }

        let actual = self.installments_total()?;
        if actual != self.total_fee_cents {
            return Err(FeePlanError::TotalMismatch {
                expected: self.total_fee_cents,
                actual,
            });
        }

        Ok(())
    }

    /// First installment due on or after `today`.
    pub fn next_due(&self, today: NaiveDate) -> Option<&Installment> {
        self.installments.iter().find(|i| i.due_date >= today)
    }

    /// Sum of installments due strictly before `today`.
    pub fn amount_due_before(&self, today: NaiveDate) -> Result<u64, FeePlanError> {
        sum_amounts(
            self.installments
                .iter()
                .enumerate()
                .filter(|(_, i)| i.due_date < today),
        )
    }
}

fn sum_amounts<'a>(
    mut installments: impl Iterator<Item = (usize, &'a Installment)>,
) -> Result<u64, FeePlanError> {
    installments.try_fold(0u64, |total, (index, installment)| {
        total
            .checked_add(installment.amount_cents)
            .ok_or(FeePlanError::AmountOverflow { index })
    })
}
