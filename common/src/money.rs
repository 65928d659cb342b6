//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Adds the provided [`Money`] to this one.
    ///
    /// [`None`] is returned if the [`Currency`]s differ or on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        (self.currency == rhs.currency).then_some(())?;
        Some(Self {
            amount: self.amount.checked_add(rhs.amount)?,
            currency: self.currency,
        })
    }

    /// Indicates whether this [`Money`] amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Multiplies this [`Money`] amount the provided number of `times`.
    ///
    /// [`None`] is returned on overflow.
    #[must_use]
    pub fn checked_mul(self, times: u32) -> Option<Self> {
        Some(Self {
            amount: self.amount.checked_mul(Decimal::from(times))?,
            currency: self.currency,
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "Pound Sterling."]
        Gbp = 3,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            money("123.45USD"),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );
        assert_eq!(
            money("99EUR"),
            Money {
                amount: decimal("99"),
                currency: Currency::Eur,
            },
        );
        assert_eq!(money("0.5GBP").currency, Currency::Gbp);

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.45Usdollar").is_err());
        assert!(Money::from_str("abcUSD").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(money("123.45USD").to_string(), "123.45USD");
        assert_eq!(money("123.00EUR").to_string(), "123EUR");
        assert_eq!(money("123GBP").to_string(), "123GBP");
    }

    #[test]
    fn multiplies_by_nights() {
        assert_eq!(money("120.50USD").checked_mul(4), Some(money("482USD")));
        assert_eq!(money("80USD").checked_mul(1), Some(money("80USD")));
        assert_eq!(money("80USD").checked_mul(0), Some(money("0USD")));
        assert_eq!(
            money("50000000000000000000000000000USD").checked_mul(2),
            None,
        );
    }

    #[test]
    fn adds_same_currency_only() {
        assert_eq!(
            money("100USD").checked_add(money("50.25USD")),
            Some(money("150.25USD")),
        );
        assert_eq!(
            money("0EUR").checked_add(money("10EUR")),
            Some(money("10EUR")),
        );
        assert_eq!(money("100USD").checked_add(money("50EUR")), None);
    }

    #[test]
    fn detects_negative_amounts() {
        assert!(money("-1USD").is_negative());
        assert!(!money("0USD").is_negative());
        assert!(!money("-0USD").is_negative());
        assert!(!money("15USD").is_negative());
    }
}
