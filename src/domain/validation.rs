use thiserror::Error;

use super::Cents;

/// Rejected input for a single ledger operation. The ledger is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount must not be negative (got {0} cents)")]
    NegativeAmount(Cents),

    #[error("Category must not be empty")]
    EmptyCategory,

    #[error("Category must not contain control characters")]
    ControlCharacterInCategory,

    #[error("Amount of {0} cents would overflow the ledger total")]
    AmountTooLarge(Cents),

    #[error("Budget limit for '{category}' must be positive (got {limit} cents)")]
    NonPositiveLimit { category: String, limit: Cents },
}

pub fn validate_amount(amount: Cents) -> Result<Cents, ValidationError> {
    if amount < 0 {
        return Err(ValidationError::NegativeAmount(amount));
    }
    Ok(amount)
}

/// Trim a category label; whitespace-only labels count as empty.
pub fn validate_category(category: &str) -> Result<String, ValidationError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    // Reports print one label per line
    if category.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacterInCategory);
    }
    Ok(category.to_string())
}

pub fn validate_limit(category: &str, limit: Cents) -> Result<Cents, ValidationError> {
    if limit <= 0 {
        return Err(ValidationError::NonPositiveLimit {
            category: category.to_string(),
            limit,
        });
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_amount_is_valid() {
        assert_eq!(validate_amount(0), Ok(0));
        assert_eq!(validate_amount(-1), Err(ValidationError::NegativeAmount(-1)));
    }

    #[test]
    fn test_category_is_trimmed() {
        assert_eq!(validate_category("  Food "), Ok("Food".to_string()));
        assert_eq!(validate_category(" \t"), Err(ValidationError::EmptyCategory));
    }

    #[test]
    fn test_category_rejects_control_characters() {
        for label in ["Food\nIncome:", "Food\r", "Fo\u{7}od", "Food\tRent"] {
            assert_eq!(
                validate_category(label),
                Err(ValidationError::ControlCharacterInCategory),
                "{:?}",
                label
            );
        }
        assert_eq!(validate_category("Café & Bar"), Ok("Café & Bar".to_string()));
    }

    #[test]
    fn test_limit_must_be_positive() {
        assert!(validate_limit("Rent", 1).is_ok());
        assert!(matches!(
            validate_limit("Rent", 0),
            Err(ValidationError::NonPositiveLimit { limit: 0, .. })
        ));
    }
}
