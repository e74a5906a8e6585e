//! Entry-function payloads handed to the transaction submitter

use std::fmt;
use std::str::FromStr;

use aptflow_primitives::AccountAddress;
use bytes::{BufMut, BytesMut};

use crate::encode::{encode_bytes, encode_string, encode_vector};
use crate::type_tag::{is_valid_identifier, TypeTag};
use crate::CodecError;

/// `address::module`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleId {
    /// Publishing account
    pub address: AccountAddress,
    /// Module name
    pub name: String,
}

impl ModuleId {
    /// Create a module id, validating the name
    pub fn new(address: AccountAddress, name: impl Into<String>) -> Result<Self, CodecError> {
        let name = name.into();
        if !is_valid_identifier(&name) {
            return Err(CodecError::InvalidTypeTag(format!("invalid module name: {}", name)));
        }
        Ok(Self { address, name })
    }

    /// BCS: address ++ string(name)
    pub fn to_bcs(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(AccountAddress::LEN + self.name.len() + 1);
        buf.put_slice(self.address.as_bytes());
        buf.put_slice(&encode_string(&self.name));
        buf.to_vec()
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address.to_standard_string(), self.name)
    }
}

/// A call to a public entry function with already-encoded arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFunction {
    /// Module holding the function
    pub module: ModuleId,
    /// Function name
    pub function: String,
    /// Generic type arguments
    pub type_args: Vec<TypeTag>,
    /// BCS-encoded arguments, one per parameter
    pub args: Vec<Vec<u8>>,
}

/// Split `0x1::aptos_account::transfer` into module id and function name
pub fn parse_function_id(id: &str) -> Result<(ModuleId, String), CodecError> {
    let parts: Vec<&str> = id.trim().split("::").collect();
    let [address, module, function] = parts.as_slice() else {
        return Err(CodecError::InvalidTypeTag(format!("invalid function id: {}", id)));
    };
    if !is_valid_identifier(function) {
        return Err(CodecError::InvalidTypeTag(format!("invalid function name: {}", function)));
    }
    let module = ModuleId::new(AccountAddress::from_hex(address)?, *module)?;
    Ok((module, function.to_string()))
}

impl EntryFunction {
    /// Create an entry function call
    pub fn new(
        module: ModuleId,
        function: impl Into<String>,
        type_args: Vec<TypeTag>,
        args: Vec<Vec<u8>>,
    ) -> Self {
        Self {
            module,
            function: function.into(),
            type_args,
            args,
        }
    }

    /// Build from a `address::module::function` identifier and type argument strings
    pub fn from_function_id(
        id: &str,
        type_args: &[&str],
        args: Vec<Vec<u8>>,
    ) -> Result<Self, CodecError> {
        let (module, function) = parse_function_id(id)?;
        let type_args = type_args
            .iter()
            .map(|t| TypeTag::from_str(t))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(module, function, type_args, args))
    }

    /// Fully qualified function identifier
    pub fn function_id(&self) -> String {
        format!("{}::{}", self.module, self.function)
    }

    /// BCS: module ++ string(function) ++ vector<TypeTag> ++ vector<vector<u8>>
    pub fn to_bcs(&self) -> Vec<u8> {
        let type_args: Vec<Vec<u8>> = self.type_args.iter().map(TypeTag::to_bcs).collect();
        let args: Vec<Vec<u8>> = self.args.iter().map(|a| encode_bytes(a)).collect();

        let mut buf = BytesMut::new();
        buf.put_slice(&self.module.to_bcs());
        buf.put_slice(&encode_string(&self.function));
        buf.put_slice(&encode_vector(&type_args));
        buf.put_slice(&encode_vector(&args));
        buf.to_vec()
    }
}
