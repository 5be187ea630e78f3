//! Intermediate model types, the bridge between artifact decoding and Rust
//! interface emission.
//!
//! These types are serde-independent and rendering-independent, making both
//! the extractor and emitter easier to test in isolation.

use std::collections::{HashMap, HashSet};

/// A single ABI definition, in the order it appears in the artifact.
#[derive(Debug, Clone)]
pub enum AbiDef {
    Constructor(AbiConstructor),
    Function(AbiFunction),
    /// Events are carried through the model (artifacts contain them and the
    /// extraction summary counts them) but produce no interface methods.
    Event(AbiEvent),
}

/// A contract function declaration.
#[derive(Debug, Clone)]
pub struct AbiFunction {
    pub name: String,
    pub inputs: Vec<AbiParam>,
    pub outputs: Vec<AbiParam>,
    pub mutability: StateMutability,
}

/// A contract constructor.
#[derive(Debug, Clone)]
pub struct AbiConstructor {
    pub inputs: Vec<AbiParam>,
    pub mutability: StateMutability,
}

/// A contract event declaration.
#[derive(Debug, Clone)]
pub struct AbiEvent {
    pub name: String,
    pub inputs: Vec<AbiParam>,
}

/// A function/constructor parameter or output.
#[derive(Debug, Clone)]
pub struct AbiParam {
    /// Parameter name as declared in the contract. May be empty for outputs
    /// and for unnamed inputs.
    pub name: String,
    /// EVM type name (e.g. `uint256`, `address`, `bytes`, `tuple`).
    pub ty: String,
    /// Friendlier source-level type name when the compiler recorded one
    /// (e.g. `struct Vault.Payout`). Used to name synthesized tuple structs.
    pub internal_type: Option<String>,
    /// Tuple components. Empty unless `ty` is the tuple marker.
    pub components: Vec<AbiParam>,
}

/// Function state mutability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

impl StateMutability {
    /// Pure and view functions are read-only calls with decoded return
    /// values; nonpayable/payable functions submit transactions.
    pub fn is_view(self) -> bool {
        matches!(self, StateMutability::Pure | StateMutability::View)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StateMutability::Pure => "pure",
            StateMutability::View => "view",
            StateMutability::NonPayable => "nonpayable",
            StateMutability::Payable => "payable",
        }
    }
}

/// EVM type → Rust type lookup tables.
///
/// Two categories:
/// - **strict**: types with a direct structural Rust representation.
/// - **dynamic**: variable-length types (strings, byte blobs, dynamic
///   arrays) whose generated signature additionally carries the original
///   EVM type name for wire (de)serialization.
///
/// A type present in neither table and not the tuple marker is a hard
/// generation failure.
#[derive(Debug, Clone)]
pub struct TypeMap {
    strict: HashMap<String, String>,
    dynamic: HashMap<String, String>,
}

impl TypeMap {
    /// The standard EVM mapping: fixed-width integers, `address`, `bool`
    /// and `bytesN` in the strict table; `string`, `bytes` and the dynamic
    /// arrays of every base type in the dynamic table.
    pub fn evm() -> Self {
        let mut strict = HashMap::new();
        strict.insert("bool".to_string(), "bool".to_string());
        strict.insert("address".to_string(), "Address".to_string());
        strict.insert("uint".to_string(), "U256".to_string());
        strict.insert("int".to_string(), "I256".to_string());
        for bits in (8..=256usize).step_by(8) {
            let unsigned = match bits {
                8 => "u8",
                16 => "u16",
                24..=32 => "u32",
                40..=64 => "u64",
                72..=128 => "u128",
                _ => "U256",
            };
            let signed = match bits {
                8 => "i8",
                16 => "i16",
                24..=32 => "i32",
                40..=64 => "i64",
                72..=128 => "i128",
                _ => "I256",
            };
            strict.insert(format!("uint{bits}"), unsigned.to_string());
            strict.insert(format!("int{bits}"), signed.to_string());
        }
        for n in 1..=32usize {
            strict.insert(format!("bytes{n}"), format!("[u8; {n}]"));
        }

        let mut dynamic = HashMap::new();
        dynamic.insert("string".to_string(), "String".to_string());
        dynamic.insert("bytes".to_string(), "Bytes".to_string());
        for (evm, rust) in &strict {
            dynamic.insert(format!("{evm}[]"), format!("Vec<{rust}>"));
        }
        dynamic.insert("string[]".to_string(), "Vec<String>".to_string());
        dynamic.insert("bytes[]".to_string(), "Vec<Bytes>".to_string());

        TypeMap { strict, dynamic }
    }

    /// Build a map from caller-supplied tables, for non-standard runtimes.
    pub fn from_tables(
        strict: HashMap<String, String>,
        dynamic: HashMap<String, String>,
    ) -> Self {
        TypeMap { strict, dynamic }
    }

    /// Direct structural mapping, if `ty` is in the strict table.
    pub fn strict(&self, ty: &str) -> Option<&str> {
        self.strict.get(ty).map(String::as_str)
    }

    /// Metadata-carrying mapping, if `ty` is in the dynamic table.
    pub fn dynamic(&self, ty: &str) -> Option<&str> {
        self.dynamic.get(ty).map(String::as_str)
    }
}

/// A record struct synthesized for a tuple/struct ABI parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleDecl {
    pub name: String,
    pub fields: Vec<TupleField>,
}

/// A single field of a synthesized tuple struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleField {
    pub name: String,
    pub ty: String,
    /// Original EVM type name, set when the field's type came from the
    /// dynamic table and needs wire metadata.
    pub abi_ty: Option<String>,
}

/// Per-generation cache of synthesized tuple structs.
///
/// Created fresh inside every `generate_interface` call and threaded through
/// nested type resolution. Idempotent by name: the first definition for a
/// name wins, later references reuse it. Declarations keep first-encounter
/// order so rendered output is deterministic.
#[derive(Debug, Default)]
pub struct TupleCache {
    seen: HashSet<String>,
    decls: Vec<TupleDecl>,
}

impl TupleCache {
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Record a synthesized declaration. A name already present is left
    /// untouched (first definition wins).
    pub fn insert(&mut self, decl: TupleDecl) {
        if !self.seen.insert(decl.name.clone()) {
            return;
        }
        self.decls.push(decl);
    }

    /// All declarations in first-encounter order.
    pub fn decls(&self) -> &[TupleDecl] {
        &self.decls
    }
}
