//! Identifier normalization: contract names, parameter names and method
//! names are escaped or prefixed, never rejected.

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

fn view_fn(name: &str, inputs: Vec<AbiParam>) -> AbiDef {
    AbiDef::Function(AbiFunction {
        name: name.to_string(),
        inputs,
        outputs: Vec::new(),
        mutability: StateMutability::View,
    })
}

#[test]
fn digit_leading_contract_name_is_prefixed() {
    let abi = vec![view_fn("get", Vec::new())];
    let text = generate_interface("3Pool", None, &abi, &TypeMap::evm()).unwrap();
    assert!(
        text.contains("pub trait _3Pool: Contract {"),
        "digit-leading name should get an underscore prefix:\n{text}"
    );
}

#[test]
fn identifier_incompatible_contract_name_is_normalized() {
    let abi = vec![view_fn("get", Vec::new())];
    let text = generate_interface("My Token!", None, &abi, &TypeMap::evm()).unwrap();
    assert!(
        text.contains("pub trait MyToken: Contract {"),
        "invalid characters should be stripped, not rejected:\n{text}"
    );
}

#[test]
fn keyword_method_name_is_raw_escaped() {
    let abi = vec![view_fn("move", Vec::new())];
    let text = generate_interface("Mover", None, &abi, &TypeMap::evm()).unwrap();
    assert!(
        text.contains("async fn r#move(&self, options: Option<CallOptions>);"),
        "keyword method names should be raw identifiers:\n{text}"
    );
    // The ABI name still travels in the method attribute.
    assert!(text.contains("#[abi_method(name = \"move\", view = true)]"));
}

#[test]
fn non_rawable_keyword_gets_trailing_underscore() {
    let abi = vec![view_fn("probe", vec![param("self", "address")])];
    let text = generate_interface("Probe", None, &abi, &TypeMap::evm()).unwrap();
    assert!(
        text.contains("#[abi(name = \"self\")] self_: Address"),
        "`self` cannot be a raw identifier:\n{text}"
    );
}

#[test]
fn camel_case_parameter_renamed_with_metadata() {
    let abi = vec![view_fn("check", vec![param("targetAccount", "address")])];
    let text = generate_interface("Checker", None, &abi, &TypeMap::evm()).unwrap();
    assert!(
        text.contains("#[abi(name = \"targetAccount\")] target_account: Address"),
        "renamed parameters must record the declared ABI name:\n{text}"
    );
}

#[test]
fn binding_file_names_are_snake_case() {
    assert_eq!(evm_bindgen::binding_file_name("MyToken"), "my_token.rs");
    assert_eq!(evm_bindgen::binding_file_name("ERC20"), "erc20.rs");
    assert_eq!(evm_bindgen::binding_file_name("My Token!"), "my_token.rs");
}
