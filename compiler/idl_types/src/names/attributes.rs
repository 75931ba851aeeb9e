//! Attribute inference over a method set.
//!
//! Bean-style accessors collapse into IDL attributes:
//! - `T getX()` with `T` not void is a getter
//! - `boolean isX()` is a getter
//! - `void setX(T)` is a setter, kept only when a getter of `X` returns `T`
//!
//! An accessor qualifies only when every checked exception it throws is a
//! `RemoteException`. Under value semantics a method that throws nothing
//! also qualifies; otherwise it must throw something.

use crate::{AttributeKind, Method, TypeId, TypePool};

/// Classification of one method before pairing.
pub fn initial_attribute_kind(method: &Method, pool: &TypePool, value_semantics: bool) -> AttributeKind {
    if method.is_constructor {
        return AttributeKind::None;
    }

    let valid_exceptions = if method.exceptions.is_empty() {
        value_semantics
    } else {
        method.exceptions.iter().all(|&exception| {
            pool.get(exception).compound().map_or(true, |data| {
                !data.is_checked_exception() || data.is_remote_exception_or_subclass()
            })
        })
    };
    if !valid_exceptions {
        return AttributeKind::None;
    }

    let name = method.name.as_str();
    let argument_count = method.arguments.len();
    if name.len() > 3 && name.starts_with("get") && argument_count == 0 && method.return_type != TypeId::VOID {
        AttributeKind::Get
    } else if name.len() > 2 && name.starts_with("is") && argument_count == 0 && method.return_type == TypeId::BOOLEAN {
        AttributeKind::Is
    } else if name.len() > 3 && name.starts_with("set") && argument_count == 1 && method.return_type == TypeId::VOID {
        AttributeKind::Set
    } else {
        AttributeKind::None
    }
}

/// `Name` becomes `name`; names starting with two capitals stay as is.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_uppercase() => name.to_owned(),
        (Some(first), _) => {
            let mut result: String = first.to_lowercase().collect();
            result.push_str(&name[first.len_utf8()..]);
            result
        }
        (None, _) => String::new(),
    }
}

fn accessor_type(method: &Method, kind: AttributeKind) -> Option<TypeId> {
    if kind == AttributeKind::Set {
        method.arguments.first().copied()
    } else {
        Some(method.return_type)
    }
}

/// Infer attribute kinds and pairs for `methods`.
///
/// `names` holds each method's Java name on entry. On exit attributes hold
/// their property name instead.
pub(crate) fn infer_attributes(
    methods: &mut [Method],
    names: &mut [String],
    pool: &TypePool,
    value_semantics: bool,
) {
    let count = methods.len();
    let mut kinds: Vec<AttributeKind> = methods
        .iter()
        .map(|method| initial_attribute_kind(method, pool, value_semantics))
        .collect();

    for (index, kind) in kinds.iter().enumerate() {
        let prefix = match kind {
            AttributeKind::Is => 2,
            AttributeKind::Get | AttributeKind::Set => 3,
            _ => continue,
        };
        names[index] = methods[index].name[prefix..].to_owned();
    }

    // An `is` getter whose property is also read or written with another
    // type is a plain method.
    for index in 0..count {
        if kinds[index] != AttributeKind::Is {
            continue;
        }
        let demote = (0..count).any(|other| {
            other != index
                && matches!(kinds[other], AttributeKind::Get | AttributeKind::Set)
                && names[other] == names[index]
                && accessor_type(&methods[other], kinds[other]) != Some(methods[index].return_type)
        });
        if demote {
            kinds[index] = AttributeKind::None;
            names[index] = methods[index].name.clone();
        }
    }

    for setter in 0..count {
        if kinds[setter] != AttributeKind::Set {
            continue;
        }
        let argument = methods[setter].arguments.first().copied();
        let mut get_getter = None;
        let mut is_getter = None;
        for getter in 0..count {
            if getter == setter || names[getter] != names[setter] || Some(methods[getter].return_type) != argument {
                continue;
            }
            match kinds[getter] {
                AttributeKind::Is => is_getter = Some(getter),
                AttributeKind::Get => get_getter = Some(getter),
                _ => {}
            }
        }

        let paired = match (is_getter, get_getter) {
            (Some(is), Some(get)) => {
                kinds[get] = AttributeKind::None;
                names[get] = methods[get].name.clone();
                kinds[is] = AttributeKind::IsReadWrite;
                Some(is)
            }
            (Some(is), None) => {
                kinds[is] = AttributeKind::IsReadWrite;
                Some(is)
            }
            (None, Some(get)) => {
                kinds[get] = AttributeKind::GetReadWrite;
                Some(get)
            }
            (None, None) => None,
        };

        match paired {
            Some(getter) => {
                methods[getter].attribute_pair = Some(setter);
                methods[setter].attribute_pair = Some(getter);
            }
            None => {
                kinds[setter] = AttributeKind::None;
                names[setter] = methods[setter].name.clone();
            }
        }
    }

    for (index, method) in methods.iter_mut().enumerate() {
        method.attribute_kind = kinds[index];
        if kinds[index].is_attribute() {
            names[index] = decapitalize(&names[index]);
        } else {
            method.attribute_pair = None;
        }
    }
}
