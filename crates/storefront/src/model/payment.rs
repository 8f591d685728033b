//! Payment methods a shopper can select at checkout.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// The enumerated set of accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Card,
    PayPal,
    Wallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::Card, Self::PayPal, Self::Wallet];

    /// Human readable label, as shown to shoppers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::PayPal => "PayPal",
            Self::Wallet => "Digital Wallet",
        }
    }

    /// Short selection token.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::PayPal => "paypal",
            Self::Wallet => "wallet",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown payment method: {0:?}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    /// Accepts either the token or the label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| {
                m.token().eq_ignore_ascii_case(wanted) || m.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownPaymentMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tokens_and_labels() {
        assert_eq!("card".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert_eq!("PAYPAL".parse::<PaymentMethod>(), Ok(PaymentMethod::PayPal));
        assert_eq!(" Digital Wallet ".parse::<PaymentMethod>(), Ok(PaymentMethod::Wallet));
        assert_eq!("credit/debit card".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
    }

    #[test]
    fn rejects_unknown_tokens() {
        let err = "cash".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err, UnknownPaymentMethod("cash".into()));
        assert!("".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(PaymentMethod::Wallet.to_string(), "Digital Wallet");
    }
}
