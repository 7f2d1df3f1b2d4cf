//! Card number checksum
//!
//! Card numbers end in a check digit computed with a Luhn-style weighted sum.
//! The weighting counts positions from the left of the number: every digit at
//! an odd 1-based position is doubled (minus 9 when the result exceeds 9), the
//! check digit itself is never doubled. For the 16-digit card numbers issued
//! here this is exactly the standard Luhn scheme.

use crate::types::{BankError, CardNumber};

/// Issuer identification prefix of every card
pub const ISSUER_PREFIX: &str = "400000";

/// Number of digits in a card number
pub const CARD_NUMBER_LEN: usize = 16;

/// Sum of the weighted digits, doubling odd 1-based positions from the left
fn weighted_sum(digits: &str) -> Result<u32, BankError> {
    if digits.is_empty() {
        return Err(BankError::invalid_format(digits));
    }

    digits.chars().enumerate().try_fold(0u32, |sum, (pos, c)| {
        let digit = c
            .to_digit(10)
            .ok_or_else(|| BankError::invalid_format(digits))?;
        let weighted = if pos % 2 == 0 {
            let doubled = digit * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            digit
        };
        Ok(sum + weighted)
    })
}

/// Compute the check digit for a number that does not carry one yet
///
/// # Errors
///
/// Returns `InvalidFormat` if `partial_number` is empty or contains a non-digit.
pub fn compute_check_digit(partial_number: &str) -> Result<u8, BankError> {
    let sum = weighted_sum(partial_number)?;
    Ok(((10 - sum % 10) % 10) as u8)
}

/// Check whether a full number, check digit included, passes the checksum
///
/// Length is not checked here; callers that need a card number of the issued
/// length compare against [`CARD_NUMBER_LEN`] themselves.
///
/// # Errors
///
/// Returns `InvalidFormat` if `full_number` is empty or contains a non-digit.
pub fn validate(full_number: &str) -> Result<bool, BankError> {
    let (body, last) = match full_number.char_indices().last() {
        Some((idx, c)) => (&full_number[..idx], c),
        None => return Err(BankError::invalid_format(full_number)),
    };
    let check = last
        .to_digit(10)
        .ok_or_else(|| BankError::invalid_format(full_number))?;

    let sum = if body.is_empty() {
        0
    } else {
        weighted_sum(body).map_err(|_| BankError::invalid_format(full_number))?
    };

    Ok((sum + check) % 10 == 0)
}

/// Whether `number` is a well-formed card number of the issued length
///
/// Any malformed input is simply not a card number, so this never fails.
pub fn is_valid_card_number(number: &str) -> bool {
    number.len() == CARD_NUMBER_LEN && validate(number).unwrap_or(false)
}

/// Derive the card number for an account id
///
/// # Errors
///
/// Returns `InvalidFormat` if the account id contains a non-digit.
pub fn derive_card_number(account_id: &str) -> Result<CardNumber, BankError> {
    let mut number = format!("{}{}", ISSUER_PREFIX, account_id);
    let check = compute_check_digit(&number)?;
    number.push(char::from(b'0' + check));
    Ok(number)
}
