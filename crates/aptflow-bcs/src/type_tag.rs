//! Move type tags: parsing, display and BCS form

use std::fmt;
use std::str::FromStr;

use aptflow_primitives::AccountAddress;
use bytes::{BufMut, BytesMut};

use crate::encode::{encode_string, encode_uleb128, encode_vector, UintWidth};
use crate::CodecError;

/// On-chain type of a value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// bool
    Bool,
    /// u8
    U8,
    /// u16
    U16,
    /// u32
    U32,
    /// u64
    U64,
    /// u128
    U128,
    /// u256
    U256,
    /// address
    Address,
    /// signer
    Signer,
    /// vector<T>
    Vector(Box<TypeTag>),
    /// Fully qualified struct
    Struct(Box<StructTag>),
}

/// `address::module::name<type_args>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructTag {
    /// Publishing account
    pub address: AccountAddress,
    /// Module name
    pub module: String,
    /// Struct name
    pub name: String,
    /// Generic arguments
    pub type_args: Vec<TypeTag>,
}

impl StructTag {
    /// `0x1::string::String`
    pub fn std_string() -> Self {
        Self {
            address: AccountAddress::ONE,
            module: "string".to_string(),
            name: "String".to_string(),
            type_args: vec![],
        }
    }

    /// Check for `0x1::string::String`
    pub fn is_std_string(&self) -> bool {
        self.address == AccountAddress::ONE && self.module == "string" && self.name == "String"
    }

    /// Check for `0x1::object::Object<T>`
    pub fn is_object(&self) -> bool {
        self.address == AccountAddress::ONE && self.module == "object" && self.name == "Object"
    }

    fn write_bcs(&self, buf: &mut BytesMut) {
        buf.put_slice(self.address.as_bytes());
        buf.put_slice(&encode_string(&self.module));
        buf.put_slice(&encode_string(&self.name));
        let args: Vec<Vec<u8>> = self.type_args.iter().map(TypeTag::to_bcs).collect();
        buf.put_slice(&encode_vector(&args));
    }
}

impl TypeTag {
    /// Integer width for the unsigned integer tags
    pub fn uint_width(&self) -> Option<UintWidth> {
        match self {
            TypeTag::U8 => Some(UintWidth::U8),
            TypeTag::U16 => Some(UintWidth::U16),
            TypeTag::U32 => Some(UintWidth::U32),
            TypeTag::U64 => Some(UintWidth::U64),
            TypeTag::U128 => Some(UintWidth::U128),
            TypeTag::U256 => Some(UintWidth::U256),
            _ => None,
        }
    }

    /// Variant index in the BCS enum layout
    pub fn variant_index(&self) -> u64 {
        match self {
            TypeTag::Bool => 0,
            TypeTag::U8 => 1,
            TypeTag::U64 => 2,
            TypeTag::U128 => 3,
            TypeTag::Address => 4,
            TypeTag::Signer => 5,
            TypeTag::Vector(_) => 6,
            TypeTag::Struct(_) => 7,
            TypeTag::U16 => 8,
            TypeTag::U32 => 9,
            TypeTag::U256 => 10,
        }
    }

    /// BCS encoding of the type tag itself
    pub fn to_bcs(&self) -> Vec<u8> {
        let mut buf = BytesMut::new();
        self.write_bcs(&mut buf);
        buf.to_vec()
    }

    fn write_bcs(&self, buf: &mut BytesMut) {
        buf.put_slice(&encode_uleb128(self.variant_index()));
        match self {
            TypeTag::Vector(inner) => inner.write_bcs(buf),
            TypeTag::Struct(tag) => tag.write_bcs(buf),
            _ => {}
        }
    }
}

/// Split `base<arg1, arg2<...>>` into `base` and its top-level arguments.
///
/// Commas nested inside inner generics do not split arguments.
pub fn split_generic(s: &str) -> Result<(String, Vec<String>), CodecError> {
    let s = s.trim();
    let invalid = || CodecError::InvalidTypeTag(s.to_string());

    let Some(open) = s.find('<') else {
        if s.contains('>') || s.contains(',') {
            return Err(invalid());
        }
        return Ok((s.to_string(), vec![]));
    };
    if !s.ends_with('>') {
        return Err(invalid());
    }

    let base = s[..open].trim();
    let inner = &s[open + 1..s.len() - 1];
    if base.is_empty() {
        return Err(invalid());
    }

    let mut args = Vec::new();
    let mut depth: usize = 0;
    let mut current = String::new();
    for c in inner.chars() {
        match c {
            '<' => {
                depth += 1;
                current.push(c);
            }
            '>' => {
                depth = depth.checked_sub(1).ok_or_else(invalid)?;
                current.push(c);
            }
            ',' if depth == 0 => {
                args.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if depth != 0 {
        return Err(invalid());
    }
    args.push(current);

    let args: Vec<String> = args.into_iter().map(|a| a.trim().to_string()).collect();
    if args.iter().any(String::is_empty) {
        return Err(invalid());
    }
    Ok((base.to_string(), args))
}

/// Move identifiers: `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && s != "_"
}

impl FromStr for TypeTag {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, args) = split_generic(s)?;
        let no_args = |tag: TypeTag| {
            if args.is_empty() {
                Ok(tag)
            } else {
                Err(CodecError::InvalidTypeTag(s.trim().to_string()))
            }
        };

        match base.as_str() {
            "bool" => no_args(TypeTag::Bool),
            "u8" => no_args(TypeTag::U8),
            "u16" => no_args(TypeTag::U16),
            "u32" => no_args(TypeTag::U32),
            "u64" => no_args(TypeTag::U64),
            "u128" => no_args(TypeTag::U128),
            "u256" => no_args(TypeTag::U256),
            "address" => no_args(TypeTag::Address),
            "signer" => no_args(TypeTag::Signer),
            "string" | "String" => no_args(TypeTag::Struct(Box::new(StructTag::std_string()))),
            "vector" => match args.as_slice() {
                [inner] => Ok(TypeTag::Vector(Box::new(inner.parse()?))),
                _ => Err(CodecError::InvalidTypeTag(s.trim().to_string())),
            },
            path if path.contains("::") => {
                let mut tag = parse_struct_path(path)?;
                tag.type_args = args
                    .iter()
                    .map(|arg| arg.parse())
                    .collect::<Result<_, _>>()?;
                Ok(TypeTag::Struct(Box::new(tag)))
            }
            other => Err(CodecError::UnsupportedType(other.to_string())),
        }
    }
}

fn parse_struct_path(path: &str) -> Result<StructTag, CodecError> {
    let parts: Vec<&str> = path.split("::").map(str::trim).collect();
    let [address, module, name] = parts.as_slice() else {
        return Err(CodecError::InvalidTypeTag(path.to_string()));
    };
    if !is_valid_identifier(module) || !is_valid_identifier(name) {
        return Err(CodecError::InvalidTypeTag(path.to_string()));
    }
    Ok(StructTag {
        address: AccountAddress::from_hex(address)?,
        module: module.to_string(),
        name: name.to_string(),
        type_args: vec![],
    })
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::U256 => write!(f, "u256"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.address.to_standard_string(),
            self.module,
            self.name
        )?;
        if !self.type_args.is_empty() {
            let args: Vec<String> = self.type_args.iter().map(ToString::to_string).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        Ok(())
    }
}
