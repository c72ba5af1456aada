//! ABI loading.
//!
//! Reads a JSON ABI from disk and keeps both the parsed `JsonAbi` (used for
//! encoding) and the function signatures in declaration order (used for
//! display).

use crate::{logging, VerifierError};
use alloy::json_abi::{Function, JsonAbi, StateMutability};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Function state mutability as declared in the ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

impl Mutability {
    /// True for functions that may change state when sent as a transaction.
    pub fn is_mutating(self) -> bool {
        matches!(self, Mutability::NonPayable | Mutability::Payable)
    }
}

impl From<StateMutability> for Mutability {
    fn from(value: StateMutability) -> Self {
        match value {
            StateMutability::Pure => Mutability::Pure,
            StateMutability::View => Mutability::View,
            StateMutability::NonPayable => Mutability::NonPayable,
            StateMutability::Payable => Mutability::Payable,
        }
    }
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutability::Pure => write!(f, "pure"),
            Mutability::View => write!(f, "view"),
            Mutability::NonPayable => write!(f, "nonpayable"),
            Mutability::Payable => write!(f, "payable"),
        }
    }
}

/// One callable function of the interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub input_types: Vec<String>,
    pub output_types: Vec<String>,
    pub mutability: Mutability,
}

impl FunctionSignature {
    fn from_function(function: &Function) -> Self {
        Self {
            name: function.name.clone(),
            input_types: function
                .inputs
                .iter()
                .map(|p| p.selector_type().into_owned())
                .collect(),
            output_types: function
                .outputs
                .iter()
                .map(|p| p.selector_type().into_owned())
                .collect(),
            mutability: function.state_mutability.into(),
        }
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.input_types.join(","))?;
        if !self.output_types.is_empty() {
            write!(f, " returns ({})", self.output_types.join(","))?;
        }
        write!(f, " [{}]", self.mutability)
    }
}

/// Parsed contract interface. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct InterfaceDescription {
    abi: JsonAbi,
    signatures: Vec<FunctionSignature>,
}

impl InterfaceDescription {
    /// Parse a bare ABI array or a build artifact carrying an `abi` key.
    pub fn from_json_str(json: &str) -> Result<Self, VerifierError> {
        let root: Value =
            serde_json::from_str(json).map_err(|e| VerifierError::AbiParse(e.to_string()))?;

        let entries = match root {
            Value::Array(_) => root,
            Value::Object(mut artifact) => artifact.remove("abi").ok_or_else(|| {
                VerifierError::AbiParse("expected a JSON array or an object with an `abi` key".into())
            })?,
            _ => {
                return Err(VerifierError::AbiParse(
                    "expected a JSON array of ABI entries".into(),
                ))
            }
        };

        let order = function_names_in_order(&entries)?;
        let abi: JsonAbi =
            serde_json::from_value(entries).map_err(|e| VerifierError::AbiParse(e.to_string()))?;

        let signatures: Vec<FunctionSignature> = order
            .iter()
            .filter_map(|name| abi.function(name))
            .flatten()
            .map(FunctionSignature::from_function)
            .collect();

        if signatures.is_empty() {
            return Err(VerifierError::AbiParse(
                "interface declares no callable functions".into(),
            ));
        }

        Ok(Self { abi, signatures })
    }

    /// Function signatures in declaration order, overloads grouped.
    pub fn signatures(&self) -> &[FunctionSignature] {
        &self.signatures
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.abi.function(name).is_some()
    }

    /// Resolve `name` to the overload taking `arity` arguments.
    pub fn function(&self, name: &str, arity: usize) -> Option<&Function> {
        self.abi
            .function(name)?
            .iter()
            .find(|f| f.inputs.len() == arity)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

fn function_names_in_order(entries: &Value) -> Result<Vec<String>, VerifierError> {
    let items = entries
        .as_array()
        .ok_or_else(|| VerifierError::AbiParse("`abi` must be a JSON array".into()))?;

    let mut names: Vec<String> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let kind = item.get("type").and_then(Value::as_str).unwrap_or("function");
        if kind != "function" {
            continue;
        }
        let name = item.get("name").and_then(Value::as_str).ok_or_else(|| {
            VerifierError::AbiParse(format!("function entry #{} has no name", index))
        })?;
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Reads interface descriptions from the filesystem.
pub struct InterfaceLoader;

impl InterfaceLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<InterfaceDescription, VerifierError> {
        let path = path.as_ref();
        logging::log_loading_abi(&path.display().to_string());

        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => VerifierError::AbiNotFound(path.display().to_string()),
            _ => VerifierError::FileError(format!("Failed to read ABI file {:?}: {}", path, e)),
        })?;

        let interface = InterfaceDescription::from_json_str(&contents).map_err(|e| match e {
            VerifierError::AbiParse(msg) => {
                VerifierError::AbiParse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        logging::log_abi_loaded(&path.display().to_string(), interface.len());
        Ok(interface)
    }
}
