//! Contract proxy: an address plus its interface, bound to a live connection.

use crate::abi::InterfaceDescription;
use crate::network::{CallRequest, Connection, LedgerRpc, RpcFailure};
use crate::VerifierError;
use alloy::dyn_abi::{DynSolType, DynSolValue, FunctionExt, JsonAbiExt, Specifier};
use alloy::json_abi::Function;
use alloy::primitives::{Address, Bytes};
use alloy::sol_types::{Panic, Revert, SolError};
use std::str::FromStr;
use tracing::debug;

/// Why a single contract call did not produce decoded values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallFailure {
    #[error("function `{0}` is not part of the contract interface")]
    UnknownFunction(String),
    #[error("could not encode arguments: {0}")]
    Encoding(String),
    #[error("execution reverted: {reason}")]
    Reverted { reason: String, data: Option<Bytes> },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("could not decode return data: {0}")]
    Decoding(String),
}

/// A deployed contract reachable through `connection`.
pub struct ContractBinding<'c, L> {
    connection: &'c Connection<L>,
    address: Address,
    interface: InterfaceDescription,
}

/// Combine an address with an interface. No network I/O happens here.
pub fn bind<'c, L: LedgerRpc>(
    connection: &'c Connection<L>,
    address: &str,
    interface: InterfaceDescription,
) -> Result<ContractBinding<'c, L>, VerifierError> {
    let address = parse_address(address)?;
    if interface.is_empty() {
        return Err(VerifierError::Binding(
            "interface has no callable functions".into(),
        ));
    }
    debug!(%address, functions = interface.len(), "Contract bound");
    Ok(ContractBinding {
        connection,
        address,
        interface,
    })
}

/// Parse a 20-byte hex address, enforcing EIP-55 when the input is mixed case.
pub fn parse_address(raw: &str) -> Result<Address, VerifierError> {
    let raw = raw.trim();
    let hex_part = raw.strip_prefix("0x").unwrap_or(raw);
    let mixed_case = hex_part.chars().any(|c| c.is_ascii_uppercase())
        && hex_part.chars().any(|c| c.is_ascii_lowercase());

    if mixed_case {
        Address::parse_checksummed(raw, None)
            .map_err(|e| VerifierError::Binding(format!("{:?} is not a valid checksummed address: {}", raw, e)))
    } else {
        Address::from_str(raw)
            .map_err(|e| VerifierError::Binding(format!("{:?} is not a valid address: {}", raw, e)))
    }
}

/// Decode `Error(string)` and `Panic(uint256)` revert payloads.
pub fn revert_reason(data: &[u8]) -> Option<String> {
    if let Ok(revert) = Revert::abi_decode(data, true) {
        return Some(revert.reason);
    }
    Panic::abi_decode(data, true)
        .ok()
        .map(|panic| format!("panic code {:#x}", panic.code))
}

impl<'c, L: LedgerRpc> ContractBinding<'c, L> {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn interface(&self) -> &InterfaceDescription {
        &self.interface
    }

    pub fn connection(&self) -> &Connection<L> {
        self.connection
    }

    /// Resolve `name` to the overload taking `arity` arguments.
    pub fn function(&self, name: &str, arity: usize) -> Result<&Function, CallFailure> {
        self.interface
            .function(name, arity)
            .ok_or_else(|| CallFailure::UnknownFunction(name.to_string()))
    }

    /// Turn literal arguments into typed ABI values following the function's inputs.
    pub fn coerce_args(
        &self,
        function: &Function,
        raw: &[String],
    ) -> Result<Vec<DynSolValue>, CallFailure> {
        if raw.len() != function.inputs.len() {
            return Err(CallFailure::Encoding(format!(
                "`{}` takes {} arguments, got {}",
                function.name,
                function.inputs.len(),
                raw.len()
            )));
        }
        function
            .inputs
            .iter()
            .zip(raw)
            .map(|(param, literal)| {
                let ty: DynSolType = param
                    .resolve()
                    .map_err(|e| CallFailure::Encoding(format!("{}: {}", param.ty, e)))?;
                // strings are sent verbatim; coerce_str trims and unquotes them
                if ty == DynSolType::String {
                    return Ok(DynSolValue::String(literal.clone()));
                }
                ty.coerce_str(literal).map_err(|e| {
                    CallFailure::Encoding(format!(
                        "argument `{}` ({}) = {:?}: {}",
                        param.name, param.ty, literal, e
                    ))
                })
            })
            .collect()
    }

    /// Read-only call of `name`. Nothing is broadcast; `from` overrides the caller.
    pub fn call(
        &self,
        name: &str,
        args: &[DynSolValue],
        from: Option<Address>,
    ) -> Result<Vec<DynSolValue>, CallFailure> {
        let function = self.function(name, args.len())?;
        let input = function
            .abi_encode_input(args)
            .map_err(|e| CallFailure::Encoding(e.to_string()))?;

        let request = CallRequest {
            to: self.address,
            from,
            input: input.into(),
        };

        let output = self
            .connection
            .ledger()
            .call(&request)
            .map_err(|e| match e {
                RpcFailure::Reverted { message, data } => {
                    let reason = data
                        .as_ref()
                        .and_then(|d| revert_reason(d))
                        .unwrap_or(message);
                    CallFailure::Reverted { reason, data }
                }
                RpcFailure::Transport(msg) => CallFailure::Transport(msg),
            })?;

        // A view against an address without code returns nothing at all.
        if output.is_empty() && !function.outputs.is_empty() {
            return Err(CallFailure::Decoding(format!(
                "`{}` returned no data; is there a contract at {}?",
                name, self.address
            )));
        }

        function
            .abi_decode_output(&output, true)
            .map_err(|e| CallFailure::Decoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Endpoint, MockLedger};

    const ABI: &str = r#"[
        {"type":"function","name":"admin","inputs":[],"outputs":[{"name":"","type":"address"}],"stateMutability":"view"},
        {"type":"function","name":"setPrice","inputs":[{"name":"price","type":"uint256"},{"name":"label","type":"string"}],"outputs":[],"stateMutability":"nonpayable"}
    ]"#;

    fn connection(ledger: MockLedger) -> Connection<MockLedger> {
        Connection::establish(Endpoint::new("mock://"), ledger, None).unwrap()
    }

    #[test]
    fn test_parse_address_lowercase() {
        let addr = parse_address("0x3ffaf5e999fda995b7959249b2f2eff494427457").unwrap();
        assert_eq!(
            addr.to_checksum(None),
            "0x3FfAf5E999Fda995b7959249B2F2eFf494427457"
        );
    }

    #[test]
    fn test_parse_address_checksummed() {
        assert!(parse_address("0x3FfAf5E999Fda995b7959249B2F2eFf494427457").is_ok());
    }

    #[test]
    fn test_parse_address_bad_checksum() {
        let err = parse_address("0x3FFaf5E999Fda995b7959249B2F2eFf494427457").unwrap_err();
        assert!(matches!(err, VerifierError::Binding(_)));
    }

    #[test]
    fn test_parse_address_wrong_length() {
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("").is_err());
    }

    #[test]
    fn test_bind_does_no_io() {
        let conn = connection(MockLedger::new(1));
        let iface = InterfaceDescription::from_json_str(ABI).unwrap();
        let binding = bind(&conn, "0x3ffaf5e999fda995b7959249b2f2eff494427457", iface).unwrap();
        assert!(conn.ledger().calls().is_empty());
        assert!(binding.interface().has_function("admin"));
    }

    #[test]
    fn test_call_decodes_address() {
        let admin = Address::repeat_byte(0xab);
        let conn = connection(MockLedger::new(1).returns("admin()", vec![DynSolValue::Address(admin)]));
        let iface = InterfaceDescription::from_json_str(ABI).unwrap();
        let binding = bind(&conn, "0x3ffaf5e999fda995b7959249b2f2eff494427457", iface).unwrap();
        let values = binding.call("admin", &[], None).unwrap();
        assert_eq!(values, vec![DynSolValue::Address(admin)]);
    }

    #[test]
    fn test_call_unknown_function() {
        let conn = connection(MockLedger::new(1));
        let iface = InterfaceDescription::from_json_str(ABI).unwrap();
        let binding = bind(&conn, "0x3ffaf5e999fda995b7959249b2f2eff494427457", iface).unwrap();
        let err = binding.call("debugMode", &[], None).unwrap_err();
        assert_eq!(err, CallFailure::UnknownFunction("debugMode".into()));
        assert!(conn.ledger().calls().is_empty());
    }

    #[test]
    fn test_call_decodes_revert_reason() {
        let conn = connection(MockLedger::new(1).reverts("setPrice(uint256,string)", "Not admin"));
        let iface = InterfaceDescription::from_json_str(ABI).unwrap();
        let binding = bind(&conn, "0x3ffaf5e999fda995b7959249b2f2eff494427457", iface).unwrap();
        let function = binding.function("setPrice", 2).unwrap();
        let args = binding
            .coerce_args(function, &["10".to_string(), "x".to_string()])
            .unwrap();
        match binding.call("setPrice", &args, None).unwrap_err() {
            CallFailure::Reverted { reason, .. } => assert_eq!(reason, "Not admin"),
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn test_coerce_rejects_bad_literal() {
        let conn = connection(MockLedger::new(1));
        let iface = InterfaceDescription::from_json_str(ABI).unwrap();
        let binding = bind(&conn, "0x3ffaf5e999fda995b7959249b2f2eff494427457", iface).unwrap();
        let function = binding.function("setPrice", 2).unwrap();
        let err = binding
            .coerce_args(function, &["ten".to_string(), "x".to_string()])
            .unwrap_err();
        assert!(matches!(err, CallFailure::Encoding(_)));
    }
    #[test]
    fn test_coerce_keeps_strings_verbatim() {
        let conn = connection(MockLedger::new(1));
        let iface = InterfaceDescription::from_json_str(ABI).unwrap();
        let binding = bind(&conn, "0x3ffaf5e999fda995b7959249b2f2eff494427457", iface).unwrap();
        let function = binding.function("setPrice", 2).unwrap();

        for label in ["\"Quoted title\"", "  padded  ", "tab\t"] {
            let args = binding
                .coerce_args(function, &["1".to_string(), label.to_string()])
                .unwrap();
            assert_eq!(args[1], DynSolValue::String(label.to_string()));
        }
    }

    #[test]
    fn test_coerce_rejects_wrong_argument_count() {
        let conn = connection(MockLedger::new(1));
        let iface = InterfaceDescription::from_json_str(ABI).unwrap();
        let binding = bind(&conn, "0x3ffaf5e999fda995b7959249b2f2eff494427457", iface).unwrap();
        let function = binding.function("setPrice", 2).unwrap();

        let extra = ["1".to_string(), "x".to_string(), "spare".to_string()];
        assert!(matches!(
            binding.coerce_args(function, &extra),
            Err(CallFailure::Encoding(_))
        ));
        assert!(matches!(
            binding.coerce_args(function, &["1".to_string()]),
            Err(CallFailure::Encoding(_))
        ));
    }

    #[test]
    fn test_revert_reason_decodes_panic() {
        let data = Panic {
            code: alloy::primitives::U256::from(0x11),
        }
        .abi_encode();
        assert_eq!(revert_reason(&data), Some("panic code 0x11".to_string()));
    }

    #[test]
    fn test_revert_reason_ignores_unknown_data() {
        assert_eq!(revert_reason(&[0xde, 0xad, 0xbe, 0xef]), None);
        assert_eq!(revert_reason(&[]), None);
    }
}
