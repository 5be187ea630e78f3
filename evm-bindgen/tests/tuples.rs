//! Tuple/struct synthesis over the Vault fixture: shared structs are
//! declared once, nested structs precede their parent, multi-output
//! functions return ordered Rust tuples.

use std::path::Path;
use std::sync::LazyLock;

static VAULT: LazyLock<String> = LazyLock::new(|| {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/evm-bindgen.toml");
    let files = evm_bindgen::generate(&path).expect("generate bindings");
    files
        .into_iter()
        .find(|f| f.name == "vault.rs")
        .expect("vault.rs generated")
        .text
});

#[test]
fn shared_tuple_declared_once() {
    let count = VAULT.matches("pub struct Payout {").count();
    assert_eq!(
        count, 1,
        "Payout is used by two methods but must be declared exactly once:\n{}",
        *VAULT
    );
}

#[test]
fn tuple_referenced_by_both_methods() {
    assert!(
        VAULT.contains("async fn pending_payout(&self, account: Address, options: Option<CallOptions>) -> Payout;"),
        "view method should return the synthesized struct:\n{}",
        *VAULT
    );
    assert!(
        VAULT.contains("payout: Payout"),
        "input parameter should reuse the synthesized struct:\n{}",
        *VAULT
    );
}

#[test]
fn tuple_fields_mapped() {
    assert!(VAULT.contains("pub to: Address,"), "missing Payout.to:\n{}", *VAULT);
    assert!(VAULT.contains("pub amount: U256,"), "missing Payout.amount:\n{}", *VAULT);
}

#[test]
fn nested_tuple_precedes_parent() {
    let window = VAULT.find("pub struct Window {").expect("Window struct missing");
    let settings = VAULT.find("pub struct Settings {").expect("Settings struct missing");
    assert!(
        window < settings,
        "nested struct must be declared before its parent"
    );
    assert!(
        VAULT.contains("pub window: Window,"),
        "Settings should reference the nested struct by name:\n{}",
        *VAULT
    );
}

#[test]
fn dynamic_struct_field_carries_metadata() {
    assert!(
        VAULT.contains("#[abi(ty = \"address[]\")]\n    pub recipients: Vec<Address>,"),
        "dynamic struct field should carry the EVM type metadata:\n{}",
        *VAULT
    );
}

#[test]
fn multi_output_returns_ordered_tuple() {
    assert!(
        VAULT.contains("async fn stats(&self, options: Option<CallOptions>) -> (U256, Address);"),
        "multi-output function should return a left-to-right tuple:\n{}",
        *VAULT
    );
}

#[test]
fn structs_declared_before_trait() {
    let trait_pos = VAULT.find("pub trait Vault: Contract {").expect("trait missing");
    let last_struct = VAULT.rfind("pub struct ").expect("no structs generated");
    assert!(
        last_struct < trait_pos,
        "auxiliary structs must precede the interface declaration"
    );
}

#[test]
fn reserved_and_unnamed_parameters_escaped() {
    assert!(
        VAULT.contains("#[abi(name = \"type\")] r#type: u8"),
        "reserved identifier should be raw-escaped with name metadata:\n{}",
        *VAULT
    );
    assert!(
        VAULT.contains("arg1: bool"),
        "unnamed parameter should get a positional identifier:\n{}",
        *VAULT
    );
}

#[test]
fn payable_function_returns_pending_transaction() {
    assert!(
        VAULT.contains("#[abi_method(name = \"register\", view = false)]"),
        "payable functions are not views:\n{}",
        *VAULT
    );
    let line = VAULT
        .lines()
        .find(|l| l.contains("async fn register("))
        .expect("register method missing");
    assert!(line.ends_with("-> PendingTransaction;"), "got: {line}");
}
