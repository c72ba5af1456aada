use alloy::dyn_abi::DynSolValue;
use std::fmt;

/// Outcome of one inspection or simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
    Skipped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Failure => write!(f, "failure"),
            Outcome::Skipped => write!(f, "skipped"),
        }
    }
}

/// Recorded result of a named step. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub name: String,
    pub outcome: Outcome,
    pub value: Option<DynSolValue>,
    pub error: Option<String>,
}

impl CheckResult {
    pub fn success(name: impl Into<String>, value: Option<DynSolValue>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Success,
            value,
            error: None,
        }
    }

    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Failure,
            value: None,
            error: Some(error.into()),
        }
    }

    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Skipped,
            value: None,
            error: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Value rendered for humans, if any.
    pub fn display_value(&self) -> Option<String> {
        self.value.as_ref().map(format_value)
    }
}

/// Render a decoded ABI value. Addresses use their EIP-55 form.
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Uint(v, _) => v.to_string(),
        DynSolValue::Int(v, _) => v.to_string(),
        DynSolValue::Address(a) => a.to_checksum(None),
        DynSolValue::String(s) => format!("{:?}", s),
        DynSolValue::Bytes(b) => format!("0x{}", hex::encode(b)),
        DynSolValue::FixedBytes(word, size) => format!("0x{}", hex::encode(&word[..*size])),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            let inner: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", inner.join(", "))
        }
        DynSolValue::Tuple(items) => {
            let inner: Vec<String> = items.iter().map(format_value).collect();
            format!("({})", inner.join(", "))
        }
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};

    #[test]
    fn test_format_scalars() {
        assert_eq!(format_value(&DynSolValue::Bool(true)), "true");
        assert_eq!(format_value(&DynSolValue::Uint(U256::from(42), 256)), "42");
        assert_eq!(format_value(&DynSolValue::String("hi".into())), "\"hi\"");
        assert_eq!(format_value(&DynSolValue::Bytes(vec![0xde, 0xad])), "0xdead");
    }

    #[test]
    fn test_format_tuple_with_address() {
        let value = DynSolValue::Tuple(vec![
            DynSolValue::Address(Address::ZERO),
            DynSolValue::Uint(U256::from(1), 8),
        ]);
        assert_eq!(
            format_value(&value),
            "(0x0000000000000000000000000000000000000000, 1)"
        );
    }

    #[test]
    fn test_constructors() {
        let skipped = CheckResult::skipped("createListing", "admin unavailable");
        assert_eq!(skipped.outcome, Outcome::Skipped);
        assert!(skipped.value.is_none());
        assert!(!skipped.is_success());
        assert_eq!(
            CheckResult::success("admin", Some(DynSolValue::Bool(false))).display_value(),
            Some("false".to_string())
        );
    }
}
