//! Typed form of a `POST /bfhl` body.
//!
//! The body must be a JSON object with exactly one key; the key picks the
//! operation and its value is validated into the matching variant.

use crate::error::{
    BfhlError, AI_EXPECTS_STRING, EXACTLY_ONE_KEY, INVALID_FIBONACCI, INVALID_HCF, INVALID_KEY,
    INVALID_LCM, INVALID_PRIME,
};
use crate::services::operations::MAX_FIBONACCI_TERMS;
use num_bigint::BigUint;
use serde::ser::{Error as _, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Fibonacci,
    Prime,
    Lcm,
    Hcf,
    Ai,
}

impl OperationKind {
    /// Request keys are case-sensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "fibonacci" => Some(Self::Fibonacci),
            "prime" => Some(Self::Prime),
            "lcm" => Some(Self::Lcm),
            "hcf" => Some(Self::Hcf),
            "AI" => Some(Self::Ai),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fibonacci => "fibonacci",
            Self::Prime => "prime",
            Self::Lcm => "lcm",
            Self::Hcf => "hcf",
            Self::Ai => "AI",
        }
    }
}

/// A validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Number of terms to generate, at most `MAX_FIBONACCI_TERMS`.
    Fibonacci(usize),
    /// Integer elements of the input; non-integers are already dropped.
    Prime(Vec<i64>),
    Lcm(Vec<i64>),
    Hcf(Vec<i64>),
    /// Question forwarded verbatim to the text provider.
    Ai(String),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Fibonacci(_) => OperationKind::Fibonacci,
            Self::Prime(_) => OperationKind::Prime,
            Self::Lcm(_) => OperationKind::Lcm,
            Self::Hcf(_) => OperationKind::Hcf,
            Self::Ai(_) => OperationKind::Ai,
        }
    }

    /// Validate a whole request body.
    ///
    /// Anything that is not a JSON object counts as having zero keys.
    pub fn from_body(body: &Value) -> Result<Self, BfhlError> {
        let (key, value) = match body.as_object() {
            Some(map) if map.len() == 1 => map
                .iter()
                .next()
                .ok_or(BfhlError::Validation(EXACTLY_ONE_KEY))?,
            _ => return Err(BfhlError::Validation(EXACTLY_ONE_KEY)),
        };

        let kind = OperationKind::from_key(key).ok_or(BfhlError::Validation(INVALID_KEY))?;
        Self::parse(kind, value)
    }

    /// Validate the value for an already-recognised key.
    pub fn parse(kind: OperationKind, value: &Value) -> Result<Self, BfhlError> {
        match kind {
            OperationKind::Fibonacci => as_integer(value)
                .and_then(|n| usize::try_from(n).ok())
                .filter(|&n| n <= MAX_FIBONACCI_TERMS)
                .map(Self::Fibonacci)
                .ok_or(BfhlError::Validation(INVALID_FIBONACCI)),
            OperationKind::Prime => value
                .as_array()
                .map(|items| Self::Prime(items.iter().filter_map(as_integer).collect()))
                .ok_or(BfhlError::Validation(INVALID_PRIME)),
            OperationKind::Lcm => integer_list(value)
                .map(Self::Lcm)
                .ok_or(BfhlError::Validation(INVALID_LCM)),
            OperationKind::Hcf => integer_list(value)
                .map(Self::Hcf)
                .ok_or(BfhlError::Validation(INVALID_HCF)),
            OperationKind::Ai => value
                .as_str()
                .filter(|question| !question.trim().is_empty())
                .map(|question| Self::Ai(question.to_string()))
                .ok_or(BfhlError::Validation(AI_EXPECTS_STRING)),
        }
    }
}

/// Non-empty array whose every element is an integer.
fn integer_list(value: &Value) -> Option<Vec<i64>> {
    let items = value.as_array().filter(|items| !items.is_empty())?;
    items.iter().map(as_integer).collect()
}

/// A JSON number with no fractional part that fits in `i64`; `6.0` counts.
fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .filter(|&f| f >= i64::MIN as f64 && f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Successful result of an operation, serialised as the envelope's `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    /// Written as plain JSON numbers however many digits they have.
    Sequence(#[serde(serialize_with = "exact_numbers")] Vec<BigUint>),
    Integers(Vec<i64>),
    Integer(i64),
    Word(String),
}

fn exact_numbers<S: Serializer>(terms: &[BigUint], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(terms.len()))?;
    for term in terms {
        let number = Number::from_str(&term.to_string()).map_err(S::Error::custom)?;
        seq.serialize_element(&number)?;
    }
    seq.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_message(body: Value) -> &'static str {
        match Operation::from_body(&body) {
            Err(BfhlError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_key_count_must_be_one() {
        assert_eq!(validation_message(json!({})), EXACTLY_ONE_KEY);
        assert_eq!(
            validation_message(json!({"fibonacci": 3, "prime": [2]})),
            EXACTLY_ONE_KEY
        );
        assert_eq!(validation_message(json!({"a": 1, "b": 2, "c": 3})), EXACTLY_ONE_KEY);
    }

    #[test]
    fn test_non_object_bodies_have_zero_keys() {
        assert_eq!(validation_message(json!([1])), EXACTLY_ONE_KEY);
        assert_eq!(validation_message(json!("fibonacci")), EXACTLY_ONE_KEY);
        assert_eq!(validation_message(json!(null)), EXACTLY_ONE_KEY);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert_eq!(validation_message(json!({"square": 4})), INVALID_KEY);
        assert_eq!(validation_message(json!({"ai": "what?"})), INVALID_KEY);
        assert_eq!(validation_message(json!({"Fibonacci": 4})), INVALID_KEY);
    }

    #[test]
    fn test_fibonacci_accepts_non_negative_integers() {
        assert_eq!(
            Operation::from_body(&json!({"fibonacci": 7})).unwrap(),
            Operation::Fibonacci(7)
        );
        assert_eq!(
            Operation::from_body(&json!({"fibonacci": 0})).unwrap(),
            Operation::Fibonacci(0)
        );
        assert_eq!(
            Operation::from_body(&json!({"fibonacci": 5.0})).unwrap(),
            Operation::Fibonacci(5)
        );
    }

    #[test]
    fn test_fibonacci_accepts_counts_past_u128_terms() {
        assert_eq!(
            Operation::from_body(&json!({"fibonacci": 188})).unwrap(),
            Operation::Fibonacci(188)
        );
        assert_eq!(
            Operation::from_body(&json!({ "fibonacci": MAX_FIBONACCI_TERMS })).unwrap(),
            Operation::Fibonacci(MAX_FIBONACCI_TERMS)
        );
    }

    #[test]
    fn test_fibonacci_rejects_bad_values() {
        for value in [
            json!(-1),
            json!(2.5),
            json!("5"),
            json!(null),
            json!([5]),
            json!(MAX_FIBONACCI_TERMS + 1),
            json!(1e20),
        ] {
            assert_eq!(
                validation_message(json!({ "fibonacci": value })),
                INVALID_FIBONACCI
            );
        }
    }

    #[test]
    fn test_prime_drops_non_integers_silently() {
        let op = Operation::from_body(&json!({"prime": [2, 3.5, "7", 11, null, 4.0]})).unwrap();
        assert_eq!(op, Operation::Prime(vec![2, 11, 4]));
    }

    #[test]
    fn test_prime_requires_array() {
        assert_eq!(validation_message(json!({"prime": 7})), INVALID_PRIME);
        assert_eq!(validation_message(json!({"prime": {"a": 1}})), INVALID_PRIME);
    }

    #[test]
    fn test_prime_accepts_empty_array() {
        assert_eq!(
            Operation::from_body(&json!({"prime": []})).unwrap(),
            Operation::Prime(vec![])
        );
    }

    #[test]
    fn test_lcm_and_hcf_require_non_empty_integer_arrays() {
        for value in [json!([]), json!(4), json!([4, 6.5]), json!([4, "6"])] {
            assert_eq!(validation_message(json!({ "lcm": value.clone() })), INVALID_LCM);
            assert_eq!(validation_message(json!({ "hcf": value })), INVALID_HCF);
        }
        assert_eq!(
            Operation::from_body(&json!({"hcf": [12, 18.0]})).unwrap(),
            Operation::Hcf(vec![12, 18])
        );
    }

    #[test]
    fn test_ai_requires_non_blank_string() {
        for value in [json!(""), json!("   \n"), json!(42), json!(["q"])] {
            assert_eq!(validation_message(json!({ "AI": value })), AI_EXPECTS_STRING);
        }
        assert_eq!(
            Operation::from_body(&json!({"AI": " Capital of France? "})).unwrap(),
            Operation::Ai(" Capital of France? ".to_string())
        );
    }

    #[test]
    fn test_as_integer_boundaries() {
        assert_eq!(as_integer(&json!(i64::MAX)), Some(i64::MAX));
        assert_eq!(as_integer(&json!(u64::MAX)), None);
        assert_eq!(as_integer(&json!(-0.0)), Some(0));
        assert_eq!(as_integer(&json!(1e300)), None);
        assert_eq!(as_integer(&json!(true)), None);
    }

    #[test]
    fn test_sequence_serializes_exact_numbers() {
        let big: BigUint = "538522340430300790495419781092981030533".parse().unwrap();
        let rendered =
            serde_json::to_string(&OperationOutput::Sequence(vec![BigUint::from(0u8), big]))
                .unwrap();
        assert_eq!(rendered, "[0,538522340430300790495419781092981030533]");
    }

    #[test]
    fn test_output_serializes_untagged() {
        assert_eq!(
            serde_json::to_value(OperationOutput::Integers(vec![2, 3])).unwrap(),
            json!([2, 3])
        );
        assert_eq!(
            serde_json::to_value(OperationOutput::Integer(12)).unwrap(),
            json!(12)
        );
        assert_eq!(
            serde_json::to_value(OperationOutput::Word("Paris".to_string())).unwrap(),
            json!("Paris")
        );
    }
}
