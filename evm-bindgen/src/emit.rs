//! Emitter: model definitions → declaration nodes → Rust interface text.
//!
//! Builds an [`Interface`] node tree (tuple structs plus trait methods) from
//! the ABI definition stream, then renders it to source text in one pass.
//! The builder never touches the filesystem; writing the text out is the
//! pipeline's job.

use anyhow::{Result, bail};
use tracing::debug;

use crate::model::*;

/// Runtime crate the generated code imports its types from.
const RUNTIME_IMPORT: &str =
    "use evm_rt::{Address, Bytes, CallOptions, Contract, I256, PendingTransaction, U256};";

/// Return type of every state-mutating method. Mutating calls submit a
/// transaction and do not return decoded values synchronously.
const PENDING_TX_TYPE: &str = "PendingTransaction";

/// Generate the typed Rust interface for one contract.
///
/// `abi` must be non-empty and is emitted in exact input order; constructors
/// are not hoisted ahead of functions. `bytecode`, when present, becomes an
/// associated `BYTECODE` constant on the trait.
///
/// Fails with an error naming the offending EVM type if any parameter or
/// output type is absent from both mapping tables and is not a tuple. No
/// partial output is returned in that case.
pub fn generate_interface(
    contract_name: &str,
    bytecode: Option<&str>,
    abi: &[AbiDef],
    map: &TypeMap,
) -> Result<String> {
    if abi.is_empty() {
        bail!("empty abi for contract `{contract_name}`");
    }

    let name = sanitize_type_name(contract_name);
    let mut cache = TupleCache::default();
    let mut methods = Vec::new();

    for def in abi {
        match def {
            AbiDef::Constructor(c) => {
                methods.push(build_constructor(c, map, &mut cache)?);
            }
            AbiDef::Function(f) => {
                methods.push(build_function(f, map, &mut cache)?);
            }
            // Events have no interface counterpart.
            AbiDef::Event(_) => {}
        }
    }

    let interface = Interface {
        name,
        bytecode: bytecode
            .filter(|b| !b.trim().is_empty())
            .map(str::to_string),
        tuples: cache.decls().to_vec(),
        methods,
    };

    debug!(
        contract = %interface.name,
        methods = interface.methods.len(),
        tuples = interface.tuples.len(),
        "built interface"
    );

    Ok(render(&interface))
}

// ---------------------------------------------------------------------------
// Declaration nodes
// ---------------------------------------------------------------------------

/// The generated interface: auxiliary tuple structs followed by one trait.
#[derive(Debug)]
struct Interface {
    name: String,
    bytecode: Option<String>,
    tuples: Vec<TupleDecl>,
    methods: Vec<MethodDecl>,
}

/// One generated trait method (factory constructor or contract function).
#[derive(Debug)]
struct MethodDecl {
    /// Attribute line, e.g. `#[abi_method(name = "balanceOf", view = true)]`.
    attr: String,
    /// Extra return-metadata attribute line for dynamic return types.
    return_attr: Option<String>,
    fn_name: String,
    has_receiver: bool,
    params: Vec<ParamDecl>,
    /// `None` renders as unit (no `->`).
    return_type: Option<String>,
}

/// One generated method parameter.
#[derive(Debug)]
struct ParamDecl {
    /// `#[abi(...)]` metadata, present for dynamic types and renamed params.
    attr: Option<String>,
    name: String,
    ty: String,
}

// ---------------------------------------------------------------------------
// Method building — one builder per ABI definition kind
// ---------------------------------------------------------------------------

fn build_constructor(
    c: &AbiConstructor,
    map: &TypeMap,
    cache: &mut TupleCache,
) -> Result<MethodDecl> {
    let params = build_params(&c.inputs, map, cache)?;
    debug!(params = params.len(), "built constructor");
    Ok(MethodDecl {
        attr: "#[abi_constructor]".to_string(),
        return_attr: None,
        fn_name: "deploy".to_string(),
        has_receiver: false,
        params,
        return_type: Some("Self".to_string()),
    })
}

fn build_function(f: &AbiFunction, map: &TypeMap, cache: &mut TupleCache) -> Result<MethodDecl> {
    let is_view = f.mutability.is_view();

    let (return_type, return_attr) = if is_view {
        match f.outputs.len() {
            0 => (None, None),
            1 => {
                let resolved = resolve_type(&f.outputs[0], map, cache)?;
                let attr = resolved
                    .abi_ty
                    .map(|t| format!("#[abi_return(ty = \"{t}\")]"));
                (Some(resolved.rust_ty), attr)
            }
            _ => {
                // Ordered tuple of per-output mapped types, left to right.
                let mut elems = Vec::new();
                for output in &f.outputs {
                    elems.push(resolve_type(output, map, cache)?.rust_ty);
                }
                (Some(format!("({})", elems.join(", "))), None)
            }
        }
    } else {
        (Some(PENDING_TX_TYPE.to_string()), None)
    };

    let params = build_params(&f.inputs, map, cache)?;
    let fn_name = escape_ident(&to_snake_case(&f.name), 0);

    debug!(name = %f.name, view = is_view, params = params.len(), "built function");
    Ok(MethodDecl {
        attr: format!("#[abi_method(name = \"{}\", view = {is_view})]", f.name),
        return_attr,
        fn_name,
        has_receiver: true,
        params,
        return_type,
    })
}

fn build_params(inputs: &[AbiParam], map: &TypeMap, cache: &mut TupleCache) -> Result<Vec<ParamDecl>> {
    let mut params = Vec::new();
    for (i, p) in inputs.iter().enumerate() {
        let resolved = resolve_type(p, map, cache)?;
        let ident = escape_ident(&to_snake_case(&p.name), i);
        // Record the declared name whenever the emitted identifier differs,
        // so the wire encoder still sees the ABI name. Unnamed parameters
        // have nothing to record.
        let renamed = ident != p.name && !p.name.is_empty();
        let attr = match (&resolved.abi_ty, renamed) {
            (None, false) => None,
            (Some(t), false) => Some(format!("#[abi(ty = \"{t}\")]")),
            (None, true) => Some(format!("#[abi(name = \"{}\")]", p.name)),
            (Some(t), true) => Some(format!("#[abi(ty = \"{t}\", name = \"{}\")]", p.name)),
        };
        params.push(ParamDecl {
            attr,
            name: ident,
            ty: resolved.rust_ty,
        });
    }
    Ok(params)
}

// ---------------------------------------------------------------------------
// Type resolution
// ---------------------------------------------------------------------------

/// A resolved EVM type: the Rust type to emit and, for dynamic-table hits,
/// the original EVM type name to carry as wire metadata.
struct ResolvedType {
    rust_ty: String,
    abi_ty: Option<String>,
}

/// Resolve one parameter/output type: strict table, then dynamic table,
/// then tuple synthesis. Anything else aborts generation.
fn resolve_type(p: &AbiParam, map: &TypeMap, cache: &mut TupleCache) -> Result<ResolvedType> {
    if let Some(rust_ty) = map.strict(&p.ty) {
        return Ok(ResolvedType {
            rust_ty: rust_ty.to_string(),
            abi_ty: None,
        });
    }
    if let Some(rust_ty) = map.dynamic(&p.ty) {
        return Ok(ResolvedType {
            rust_ty: rust_ty.to_string(),
            abi_ty: Some(p.ty.clone()),
        });
    }
    if p.ty == "tuple" {
        let name = synthesize_tuple(p, map, cache)?;
        return Ok(ResolvedType {
            rust_ty: name,
            abi_ty: None,
        });
    }
    bail!("unsupported evm type `{}`", p.ty);
}

/// Synthesize (or reuse) the named record struct for a tuple parameter.
///
/// The name comes from the artifact's internal type (`struct Vault.Payout`)
/// with the parameter name as fallback. Nested tuple fields synthesize
/// recursively, so inner structs land in the cache before their parent.
fn synthesize_tuple(p: &AbiParam, map: &TypeMap, cache: &mut TupleCache) -> Result<String> {
    let name = tuple_name(p);
    if cache.contains(&name) {
        return Ok(name);
    }

    let mut fields = Vec::new();
    for (i, comp) in p.components.iter().enumerate() {
        let resolved = resolve_type(comp, map, cache)?;
        fields.push(TupleField {
            name: escape_ident(&comp.name, i),
            ty: resolved.rust_ty,
            abi_ty: resolved.abi_ty,
        });
    }

    debug!(name = %name, fields = fields.len(), "synthesized tuple struct");
    cache.insert(TupleDecl {
        name: name.clone(),
        fields,
    });
    Ok(name)
}

/// Derive the struct name for a tuple parameter.
fn tuple_name(p: &AbiParam) -> String {
    let raw = p
        .internal_type
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(&p.name);
    let raw = raw.strip_prefix("struct ").unwrap_or(raw).trim();
    let raw = raw.strip_suffix("[]").unwrap_or(raw);
    // Internal types qualify the struct with its enclosing contract
    // (`Vault.Payout`); only the last segment names the struct.
    let last = raw.rsplit('.').next().unwrap_or(raw);
    sanitize_type_name(last)
}

// ---------------------------------------------------------------------------
// Identifier handling
// ---------------------------------------------------------------------------

/// Rust keywords that cannot appear as bare identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords the `r#` escape cannot be applied to.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Escape an ABI name into a valid Rust identifier.
///
/// Keywords become raw identifiers (`r#type`), the few keywords that cannot
/// be raw get a trailing underscore, empty names become positional `arg<i>`,
/// and anything else is filtered down to identifier characters. Escaping is
/// a fixed convention; invalid names are never an error.
fn escape_ident(name: &str, index: usize) -> String {
    if name.is_empty() {
        return format!("arg{index}");
    }
    if NON_RAW_KEYWORDS.contains(&name) {
        return format!("{name}_");
    }
    if KEYWORDS.contains(&name) {
        return format!("r#{name}");
    }
    if is_valid_ident(name) {
        return name.to_string();
    }
    let filtered: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if filtered.is_empty() {
        format!("arg{index}")
    } else if filtered.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{filtered}")
    } else {
        filtered
    }
}

/// Normalize a contract/struct name into a valid Rust type identifier.
pub(crate) fn sanitize_type_name(name: &str) -> String {
    let filtered: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if filtered.is_empty() {
        "Contract".to_string()
    } else if filtered.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{filtered}")
    } else {
        filtered
    }
}

fn is_valid_ident(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Convert an ABI camelCase name to Rust snake_case.
pub(crate) fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if i > 0 && (prev_lower || (chars[i - 1].is_ascii_uppercase() && next_lower)) {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the interface node tree to source text in one pass.
fn render(interface: &Interface) -> String {
    let mut out = String::new();

    out.push_str("// Generated by evm-bindgen. Do not edit.\n");
    out.push_str("//\n");
    out.push_str(&format!("// Contract: {}\n", interface.name));
    out.push_str("//\n");
    out.push_str("// Changes to this file will be lost when the bindings are regenerated.\n");
    out.push('\n');
    out.push_str("#![allow(unused_imports)]\n");
    out.push('\n');
    out.push_str(RUNTIME_IMPORT);
    out.push_str("\n\n");

    for tuple in &interface.tuples {
        render_tuple(&mut out, tuple);
        out.push('\n');
    }

    out.push_str(&format!(
        "/// Typed interface for the `{}` contract.\n",
        interface.name
    ));
    out.push_str("///\n");
    out.push_str(
        "/// Every method takes a trailing `options` parameter; `None` applies the\n\
         /// client's default call options.\n",
    );
    out.push_str(&format!("pub trait {}: Contract {{\n", interface.name));

    let mut first = true;
    if let Some(bytecode) = &interface.bytecode {
        out.push_str("    /// Deployment bytecode for this contract.\n");
        out.push_str(&format!(
            "    const BYTECODE: &'static str = \"{bytecode}\";\n"
        ));
        first = false;
    }

    for method in &interface.methods {
        if !first {
            out.push('\n');
        }
        first = false;
        render_method(&mut out, method);
    }

    out.push_str("}\n");
    out
}

fn render_tuple(out: &mut String, tuple: &TupleDecl) {
    out.push_str("#[derive(Clone, Debug, PartialEq)]\n");
    out.push_str(&format!("pub struct {} {{\n", tuple.name));
    for field in &tuple.fields {
        if let Some(abi_ty) = &field.abi_ty {
            out.push_str(&format!("    #[abi(ty = \"{abi_ty}\")]\n"));
        }
        out.push_str(&format!("    pub {}: {},\n", field.name, field.ty));
    }
    out.push_str("}\n");
}

fn render_method(out: &mut String, method: &MethodDecl) {
    out.push_str(&format!("    {}\n", method.attr));
    if let Some(return_attr) = &method.return_attr {
        out.push_str(&format!("    {return_attr}\n"));
    }

    let mut sig_params = Vec::new();
    if method.has_receiver {
        sig_params.push("&self".to_string());
    }
    for p in &method.params {
        match &p.attr {
            Some(attr) => sig_params.push(format!("{attr} {}: {}", p.name, p.ty)),
            None => sig_params.push(format!("{}: {}", p.name, p.ty)),
        }
    }
    // The trailing call-options parameter is appended to every method,
    // whatever the original ABI parameter list looked like.
    sig_params.push("options: Option<CallOptions>".to_string());

    let ret = match &method.return_type {
        Some(ty) => format!(" -> {ty}"),
        None => String::new(),
    };
    out.push_str(&format!(
        "    async fn {}({}){ret};\n",
        method.fn_name,
        sig_params.join(", ")
    ));
}
