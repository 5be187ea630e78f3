//! Unsupported EVM types abort generation with an error naming the type.

use std::path::Path;

use evm_bindgen::extract::load_artifact;
use evm_bindgen::generate_interface;
use evm_bindgen::model::{AbiDef, AbiFunction, AbiParam, StateMutability, TypeMap};

fn param(name: &str, ty: &str) -> AbiParam {
    AbiParam {
        name: name.to_string(),
        ty: ty.to_string(),
        internal_type: None,
        components: Vec::new(),
    }
}

#[test]
fn unknown_type_fails_naming_the_type() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/unsupported.json");
    let artifact = load_artifact(&path, "Oracle").expect("artifact decodes fine");

    let err = generate_interface("Oracle", None, &artifact.defs, &TypeMap::evm())
        .expect_err("fixed128x18 must not generate");
    let msg = format!("{err:#}");
    assert!(
        msg.contains("unsupported evm type") && msg.contains("fixed128x18"),
        "error should name the offending type, got: {msg}"
    );
}

#[test]
fn fixed_size_array_is_unsupported() {
    let abi = vec![AbiDef::Function(AbiFunction {
        name: "roots".to_string(),
        inputs: vec![param("values", "uint256[4]")],
        outputs: Vec::new(),
        mutability: StateMutability::NonPayable,
    })];

    let err = generate_interface("Math", None, &abi, &TypeMap::evm())
        .expect_err("fixed-size arrays are in neither table");
    assert!(format!("{err:#}").contains("uint256[4]"));
}

#[test]
fn failure_in_later_definition_produces_no_partial_output() {
    // First definition is fine, second is not; the whole generation fails.
    let abi = vec![
        AbiDef::Function(AbiFunction {
            name: "ok".to_string(),
            inputs: vec![param("a", "bool")],
            outputs: Vec::new(),
            mutability: StateMutability::NonPayable,
        }),
        AbiDef::Function(AbiFunction {
            name: "bad".to_string(),
            inputs: vec![param("b", "ufixed")],
            outputs: Vec::new(),
            mutability: StateMutability::NonPayable,
        }),
    ];

    assert!(generate_interface("Mixed", None, &abi, &TypeMap::evm()).is_err());
}

#[test]
fn empty_abi_is_rejected() {
    let err = generate_interface("Empty", None, &[], &TypeMap::evm())
        .expect_err("empty abi must be rejected");
    assert!(format!("{err:#}").contains("empty abi"));
}

#[test]
fn strict_only_abi_never_fails() {
    let abi = vec![AbiDef::Function(AbiFunction {
        name: "mix".to_string(),
        inputs: vec![
            param("a", "address"),
            param("b", "bool"),
            param("c", "uint8"),
            param("d", "int128"),
            param("e", "bytes32"),
            param("f", "uint256"),
        ],
        outputs: vec![param("", "int64")],
        mutability: StateMutability::Pure,
    })];

    let text = generate_interface("Strict", None, &abi, &TypeMap::evm()).expect("strict types map");
    assert!(text.contains("e: [u8; 32]"), "bytes32 should map to a fixed array:\n{text}");
    assert!(text.contains("-> i64;"));
}
