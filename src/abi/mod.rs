//! Contract interface descriptions.

pub mod loader;

pub use loader::{FunctionSignature, InterfaceDescription, InterfaceLoader, Mutability};
