//! Price and discount rules.
//!
//! Prices use [`rust_decimal::Decimal`] throughout; floating point is never
//! used for money. The one real invariant here is that a discount price, when
//! present, must be strictly below the list price.

use rust_decimal::Decimal;

/// Errors produced by price validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The list price is zero or negative.
    #[error("price must be positive")]
    NonPositive,
    /// The discount price is zero or negative.
    #[error("discount price must be positive")]
    NonPositiveDiscount,
    /// The discount price is not strictly below the list price.
    #[error("discount price must be less than the list price")]
    DiscountNotBelowPrice,
}

/// Validate a list price and optional discount price.
///
/// # Errors
///
/// Returns `PriceError::NonPositive` for a non-positive list price,
/// `PriceError::NonPositiveDiscount` for a non-positive discount, and
/// `PriceError::DiscountNotBelowPrice` when the discount does not undercut
/// the list price.
pub fn validate_discount(price: Decimal, discount_price: Option<Decimal>) -> Result<(), PriceError> {
    if price <= Decimal::ZERO {
        return Err(PriceError::NonPositive);
    }

    if let Some(discount) = discount_price {
        if discount <= Decimal::ZERO {
            return Err(PriceError::NonPositiveDiscount);
        }
        if discount >= price {
            return Err(PriceError::DiscountNotBelowPrice);
        }
    }

    Ok(())
}

/// The price a shopper actually pays: the discount price when set, otherwise
/// the list price.
#[must_use]
pub fn effective_price(price: Decimal, discount_price: Option<Decimal>) -> Decimal {
    discount_price.unwrap_or(price)
}

/// Derived discount percentage, rounded to whole percent.
///
/// Returns `None` when there is no discount or the price is non-positive.
/// The percentage is never stored; it is always derived so the two can't
/// drift apart.
#[must_use]
pub fn discount_percent(price: Decimal, discount_price: Option<Decimal>) -> Option<Decimal> {
    let discount = discount_price?;
    if price <= Decimal::ZERO || discount >= price {
        return None;
    }

    let percent = (price - discount) / price * Decimal::from(100);
    Some(percent.round())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_validate_discount_ok() {
        assert!(validate_discount(d(100), None).is_ok());
        assert!(validate_discount(d(100), Some(d(75))).is_ok());
    }

    #[test]
    fn test_validate_discount_must_undercut_price() {
        assert_eq!(
            validate_discount(d(100), Some(d(100))),
            Err(PriceError::DiscountNotBelowPrice)
        );
        assert_eq!(
            validate_discount(d(100), Some(d(120))),
            Err(PriceError::DiscountNotBelowPrice)
        );
    }

    #[test]
    fn test_validate_discount_rejects_non_positive() {
        assert_eq!(validate_discount(d(0), None), Err(PriceError::NonPositive));
        assert_eq!(
            validate_discount(d(100), Some(d(0))),
            Err(PriceError::NonPositiveDiscount)
        );
    }

    #[test]
    fn test_effective_price() {
        assert_eq!(effective_price(d(100), None), d(100));
        assert_eq!(effective_price(d(100), Some(d(80))), d(80));
    }

    #[test]
    fn test_discount_percent_derived() {
        assert_eq!(discount_percent(d(100), Some(d(75))), Some(d(25)));
        assert_eq!(discount_percent(d(200), Some(d(150))), Some(d(25)));
        assert_eq!(discount_percent(d(100), None), None);
    }

    #[test]
    fn test_discount_percent_rounds() {
        // 1/3 off rounds to 33%
        assert_eq!(discount_percent(d(30), Some(d(20))), Some(d(33)));
    }
}
