//! GraphQL scalars over validated text values.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Codec for `#[graphql(with = ..)]` of a scalar wrapping a validated domain
/// value `As`, like a `RoomNumber` or a `GuestEmail`.
///
/// The scalar is a GraphQL string: it's written via the [`Display`] impl of
/// `As` and read via its [`FromStr`] impl, so a malformed value is rejected
/// before reaching any resolver.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As: fmt::Display> Via<As> {
    /// Writes the wrapped value as a GraphQL string.
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Reads the wrapping type from a GraphQL string input.
    ///
    /// # Errors
    ///
    /// If the input is not a string, or it's not a valid `As`.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: From<As> + GraphQLType<S, TypeInfo = ()>,
        S: ScalarValue,
    {
        let scalar = T::name(&()).unwrap_or("scalar");
        input
            .as_string_value()
            .ok_or_else(|| format!("`{scalar}` expects a string, found: {input}"))?
            .parse::<As>()
            .map(T::from)
            .map_err(|e| format!("invalid `{scalar}`: {e}"))
    }

    /// Parses the [`ScalarToken`] of a GraphQL string literal.
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}
