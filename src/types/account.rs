//! Account-related types for the banking system
//!
//! This module defines the Account and Card structures held by a session,
//! and the CardRecord row shape used by the persistence layer.

use rust_decimal::Decimal;

/// Account identifier
///
/// Always exactly 9 ASCII digits; leading zeros are significant.
pub type AccountId = String;

/// Card number
///
/// Issuer prefix, account id, and one check digit (16 digits in total).
pub type CardNumber = String;

/// Card PIN (4 ASCII digits)
pub type Pin = String;

/// Payment card issued for an account
///
/// Every account carries exactly one card. The number is derived from the
/// owning account id, so the card is never keyed separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Id of the account this card belongs to
    pub owner: AccountId,

    /// Full card number, passes checksum validation
    pub number: CardNumber,

    /// PIN used together with the number to log in
    pub pin: Pin,
}

/// Balance-holding account
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The 9-digit account id
    pub id: AccountId,

    /// The card issued for this account
    pub card: Card,

    /// Current balance
    ///
    /// Never negative after a committed transfer.
    pub balance: Decimal,
}

impl Account {
    /// Build an account from its parts
    ///
    /// The card owner is taken from `id`.
    pub fn new(id: AccountId, number: CardNumber, pin: Pin, balance: Decimal) -> Self {
        Account {
            card: Card {
                owner: id.clone(),
                number,
                pin,
            },
            id,
            balance,
        }
    }
}

/// Row of the `card` table
///
/// `balance` counts hundredths of a currency unit.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CardRecord {
    pub id: String,
    pub number: String,
    pub pin: String,
    pub balance: i64,
}

impl From<CardRecord> for Account {
    fn from(record: CardRecord) -> Self {
        Account::new(
            record.id,
            record.number,
            record.pin,
            Decimal::new(record.balance, 2),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_card_owner() {
        let account = Account::new(
            "844943340".to_string(),
            "4000008449433403".to_string(),
            "1234".to_string(),
            Decimal::ZERO,
        );

        assert_eq!(account.card.owner, account.id);
        assert_eq!(account.card.number, "4000008449433403");
    }

    #[test]
    fn test_from_record_scales_balance() {
        let account = Account::from(CardRecord {
            id: "000000001".to_string(),
            number: "4000000000000010".to_string(),
            pin: "0042".to_string(),
            balance: 7050,
        });

        assert_eq!(account.id, "000000001");
        assert_eq!(account.card.pin, "0042");
        assert_eq!(account.balance, Decimal::new(705, 1));
    }
}
