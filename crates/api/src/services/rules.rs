//! Validation rules for credits.
//!
//! Pure functions with no I/O; "today" is passed in by the caller.

use std::ops::RangeInclusive;

use chrono::{Months, NaiveDate};

use credit_application_core::CustomerId;

use crate::models::Credit;

/// How far ahead, in calendar months, the first installment may fall.
pub const FIRST_INSTALLMENT_WINDOW_MONTHS: u32 = 3;

/// Allowed number of installments.
pub const INSTALLMENT_RANGE: RangeInclusive<i32> = 1..=48;

/// First date that is too late for a first installment.
///
/// Calendar month arithmetic: when the target month is shorter, the day is
/// clamped to its last day (Nov 30 + 3 months = Feb 28/29).
#[must_use]
pub fn first_installment_deadline(today: NaiveDate) -> Option<NaiveDate> {
    today.checked_add_months(Months::new(FIRST_INSTALLMENT_WINDOW_MONTHS))
}

/// Whether `day` is strictly before the first-installment deadline.
#[must_use]
pub fn is_valid_first_installment(day: NaiveDate, today: NaiveDate) -> bool {
    first_installment_deadline(today).is_some_and(|deadline| day < deadline)
}

/// Whether an installment count is within [`INSTALLMENT_RANGE`].
#[must_use]
pub fn installments_in_range(installments: i32) -> bool {
    INSTALLMENT_RANGE.contains(&installments)
}

/// Whether a credit belongs to the given customer.
#[must_use]
pub fn is_owned_by(credit: &Credit, customer_id: CustomerId) -> bool {
    credit.customer.id() == Some(customer_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use credit_application_core::Money;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deadline_uses_calendar_months() {
        assert_eq!(
            first_installment_deadline(date(2026, 1, 15)),
            Some(date(2026, 4, 15))
        );
        assert_eq!(
            first_installment_deadline(date(2025, 11, 30)),
            Some(date(2026, 2, 28))
        );
    }

    #[test]
    fn test_first_installment_window_is_exclusive() {
        let today = date(2026, 1, 15);
        assert!(is_valid_first_installment(date(2026, 4, 14), today));
        assert!(!is_valid_first_installment(date(2026, 4, 15), today));
        assert!(!is_valid_first_installment(date(2026, 6, 1), today));
    }

    #[test]
    fn test_installment_bounds() {
        assert!(installments_in_range(1));
        assert!(installments_in_range(48));
        assert!(!installments_in_range(0));
        assert!(!installments_in_range(49));
    }

    #[test]
    fn test_ownership() {
        let credit = Credit::new(Money::ZERO, date(2026, 2, 1), 5, CustomerId::new(1));
        assert!(is_owned_by(&credit, CustomerId::new(1)));
        assert!(!is_owned_by(&credit, CustomerId::new(2)));
    }
}
