use super::SimulationError;
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Bytes, U256};
use std::fmt;

/// The only code that marks a simulated call as accepted.
pub const SUCCESS_CODE: U256 = U256::from_limbs([200, 0, 0, 0]);

/// Free-form last field of the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Bytes(Bytes),
    Text(String),
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Bytes(b) if b.is_empty() => write!(f, "0x"),
            Payload::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Payload::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// Decoded `(success, code, message, payload)` answer of a simulated call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResponse {
    pub success: bool,
    pub code: U256,
    pub message: String,
    pub payload: Payload,
}

impl SimulationResponse {
    /// Accepts either a single 4-field tuple or four flat return values.
    pub fn decode(outputs: Vec<DynSolValue>) -> Result<Self, SimulationError> {
        let fields = match outputs.len() {
            1 => match outputs.into_iter().next() {
                Some(DynSolValue::Tuple(fields)) => fields,
                other => {
                    return Err(SimulationError::Encoding(format!(
                        "expected a (bool,uint,string,bytes) record, got {:?}",
                        other
                    )))
                }
            },
            _ => outputs,
        };

        let [success, code, message, payload]: [DynSolValue; 4] =
            fields.try_into().map_err(|fields: Vec<DynSolValue>| {
                SimulationError::Encoding(format!(
                    "expected 4 response fields, got {}",
                    fields.len()
                ))
            })?;

        let success = match success {
            DynSolValue::Bool(b) => b,
            other => return Err(field_error("success", "bool", &other)),
        };

        let code = match code {
            DynSolValue::Uint(v, _) => v,
            DynSolValue::Int(v, _) if !v.is_negative() => v.into_raw(),
            other => return Err(field_error("code", "unsigned integer", &other)),
        };

        let message = match message {
            DynSolValue::String(s) => s,
            other => return Err(field_error("message", "string", &other)),
        };

        let payload = match payload {
            DynSolValue::Bytes(b) => Payload::Bytes(b.into()),
            DynSolValue::FixedBytes(word, size) => Payload::Bytes(Bytes::copy_from_slice(&word[..size])),
            DynSolValue::String(s) => Payload::Text(s),
            other => return Err(field_error("payload", "bytes or string", &other)),
        };

        Ok(Self {
            success,
            code,
            message,
            payload,
        })
    }

    /// Back to an ABI value, for recording in a check result.
    pub fn to_value(&self) -> DynSolValue {
        let payload = match &self.payload {
            Payload::Bytes(b) => DynSolValue::Bytes(b.to_vec()),
            Payload::Text(s) => DynSolValue::String(s.clone()),
        };
        DynSolValue::Tuple(vec![
            DynSolValue::Bool(self.success),
            DynSolValue::Uint(self.code, 256),
            DynSolValue::String(self.message.clone()),
            payload,
        ])
    }
}

fn field_error(field: &str, expected: &str, got: &DynSolValue) -> SimulationError {
    SimulationError::Encoding(format!(
        "response field `{}` should be {}, got {:?}",
        field, expected, got
    ))
}
