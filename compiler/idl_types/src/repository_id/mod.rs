//! Repository ids.
//!
//! Every non-primitive Type carries the id the ORB uses to match it at
//! runtime. Ids come in two families:
//! - `IDL:` ids for types that already are IDL (strings, CORBA objects,
//!   `IDLEntity` types) or that map to `any`
//! - `RMI:` ids for Java types, carrying a class hash and serial version
//!   uid as 16 uppercase hex digits each
//!
//! The hash is `1` for `Externalizable` classes and zero otherwise; real
//! class hashes need bytecode, which the class model does not expose.

use idl_ir::{known, ClassId, ClassModel, ClassNotFound, JavaType};

pub const WSTRING_VALUE: &str = "IDL:omg.org/CORBA/WStringValue:1.0";
pub const CORBA_OBJECT: &str = "IDL:omg.org/CORBA/Object:1.0";
pub const ANY: &str = "IDL:omg.org/CORBA/Any:1.0";

/// Suffix of interfaces and primitive array elements.
const ZERO_SUFFIX: &str = ":0000000000000000";

/// 16 uppercase hex digits.
pub fn hex16(value: u64) -> String {
    format!("{value:016X}")
}

/// `IDL:com/acme/Widget:1.0` for `com.acme.Widget`.
pub fn idl_entity_id(package: &str, simple_name: &str) -> String {
    let name = simple_name.replace('.', "/");
    if package.is_empty() {
        format!("IDL:{name}:1.0")
    } else {
        format!("IDL:{}/{name}:1.0", package.replace('.', "/"))
    }
}

/// Id of the valuetype boxing an `IDLEntity` whose IDL module path, below
/// `org::omg::boxedIDL`, is `modules`.
///
/// `IDL:omg.org/boxedIDL/omega/Juliet:1.0` for `omega::Juliet`.
pub fn boxed_idl_id(modules: &[String], idl_name: &str) -> String {
    let mut id = String::from("IDL:omg.org/boxedIDL/");
    for module in modules {
        id.push_str(module);
        id.push('/');
    }
    id.push_str(idl_name);
    id.push_str(":1.0");
    id
}

/// `RMI:com.acme.Account:0000000000000000`.
pub fn interface_id(qualified_name: &str) -> String {
    format!("RMI:{qualified_name}{ZERO_SUFFIX}")
}

/// `:<hash>:<suid>` of a class.
pub fn class_suffix<M: ClassModel + ?Sized>(model: &M, class: ClassId) -> Result<String, ClassNotFound> {
    let hash: u64 = if model.implemented_by(class, known::EXTERNALIZABLE)? {
        1
    } else {
        0
    };
    #[allow(clippy::cast_sign_loss, reason = "the uid is printed as its two's complement bits")]
    let suid = model.serial_version_uid(class).unwrap_or(0) as u64;
    Ok(format!(":{}:{}", hex16(hash), hex16(suid)))
}

/// Id of a compound type.
pub fn compound_id<M: ClassModel + ?Sized>(
    model: &M,
    class: ClassId,
    is_idl_entity: bool,
) -> Result<String, ClassNotFound> {
    if let Some(declared) = model.declared_repository_id(class) {
        return Ok(declared.to_owned());
    }
    if is_idl_entity {
        return Ok(idl_entity_id(model.package_name(class), &model.simple_name(class)));
    }
    let qualified = model.qualified_name(class);
    if model.is_interface(class) {
        Ok(interface_id(qualified))
    } else {
        Ok(format!("RMI:{qualified}{}", class_suffix(model, class)?))
    }
}

/// Id of an array type with the given innermost element.
pub fn array_id<M: ClassModel + ?Sized>(
    model: &M,
    element: &JavaType,
    dimension: u32,
) -> Result<String, ClassNotFound> {
    let brackets = "[".repeat(dimension as usize);
    match element {
        JavaType::Class(name) => {
            let class = model.find_class(name)?;
            let suffix = if model.is_interface(class) {
                ZERO_SUFFIX.to_owned()
            } else {
                class_suffix(model, class)?
            };
            Ok(format!("RMI:{brackets}L{name};{suffix}"))
        }
        other => Ok(format!(
            "RMI:{brackets}{}{ZERO_SUFFIX}",
            type_signature(other)
        )),
    }
}

/// JVM descriptor of a non-array type.
fn type_signature(ty: &JavaType) -> String {
    match ty {
        JavaType::Primitive(kind) => kind.signature().to_string(),
        JavaType::Class(name) => format!("L{name};"),
        JavaType::Array { element, dimension } => {
            format!("{}{}", "[".repeat(*dimension as usize), type_signature(element))
        }
    }
}

#[cfg(test)]
mod tests;
