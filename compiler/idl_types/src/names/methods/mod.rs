//! Method and attribute naming.

use super::attributes::infer_attributes;
use super::mangle::{overload_component, strip_leading_underscore};
use super::{eq_ignore_case, NameCollision, NameContext, NameEnv, IDL_CONSTRUCTOR};
use crate::{AttributeKind, Method, TypePool};

/// What a method set is named against.
#[derive(Copy, Clone, Debug)]
pub struct MethodNaming<'a> {
    /// IDL name of the enclosing type.
    pub container: &'a str,
    /// Collapse accessors into attributes.
    pub infer_attributes: bool,
    /// Accessors that throw nothing still qualify.
    pub value_semantics: bool,
}

/// Get/set halves of one attribute may share a name.
fn is_accessor_pair(a: AttributeKind, b: AttributeKind) -> bool {
    if !a.is_attribute() || !b.is_attribute() {
        return false;
    }
    let a_set = a == AttributeKind::Set;
    let b_set = b == AttributeKind::Set;
    a_set != b_set
        || matches!(
            (a, b),
            (AttributeKind::Is, AttributeKind::Get) | (AttributeKind::Get, AttributeKind::Is)
        )
}

/// Index of another non-constructor method named `names[index]`.
fn colliding_method(index: usize, methods: &[Method], names: &[String], ignore_attributes: bool) -> Option<usize> {
    let method = &methods[index];
    (0..methods.len()).find(|&other| {
        let target = &methods[other];
        other != index
            && !target.is_constructor
            && (!ignore_attributes || !target.is_attribute())
            && names[other] == names[index]
            && !is_accessor_pair(method.attribute_kind, target.attribute_kind)
    })
}

/// Whether a method of the requested constructor-ness matches
/// `names[index]`, ignoring case.
fn constructor_collides(index: usize, methods: &[Method], names: &[String], with_constructors: bool) -> bool {
    let name = names[index].to_lowercase();
    (0..methods.len()).any(|other| {
        other != index
            && methods[other].is_constructor == with_constructors
            && names[other].to_lowercase() == name
    })
}

fn mangle_overloads(methods: &[Method], names: &mut [String], overloaded: &[bool], pool: &TypePool) {
    for (index, method) in methods.iter().enumerate() {
        if !overloaded[index] {
            continue;
        }
        let mut name = std::mem::take(&mut names[index]);
        for &argument in &method.arguments {
            name.push_str("__");
            name.push_str(&overload_component(pool.qualified_idl_name(argument)));
        }
        if method.arguments.is_empty() {
            name.push_str("__");
        }
        names[index] = strip_leading_underscore(&name).to_owned();
    }
}

/// Assign IDL names to every method of one compound type.
///
/// Sets `attribute_kind`, `attribute_pair` and `attribute_name` for
/// accessors, and `idl_name` (the wire name) for all.
#[tracing::instrument(level = "debug", skip_all, fields(container = naming.container, methods = methods.len()))]
pub fn set_method_names(
    env: &mut NameEnv,
    pool: &TypePool,
    naming: MethodNaming<'_>,
    methods: &mut [Method],
) -> Result<(), NameCollision> {
    let count = methods.len();
    if count == 0 {
        return Ok(());
    }

    let mut names: Vec<String> = methods.iter().map(|method| method.name.clone()).collect();
    if naming.infer_attributes {
        infer_attributes(methods, &mut names, pool, naming.value_semantics);
    } else {
        for method in methods.iter_mut() {
            method.attribute_kind = AttributeKind::None;
            method.attribute_pair = None;
        }
    }

    let mut context = NameContext::lenient();
    for name in &names {
        context.put(name);
    }
    for (index, method) in methods.iter().enumerate() {
        names[index] = if method.is_constructor {
            IDL_CONSTRUCTOR.to_owned()
        } else {
            env.member_or_method_name(&context, &names[index])
        };
    }

    let overloaded: Vec<bool> = (0..count)
        .map(|index| {
            let method = &methods[index];
            !method.is_attribute()
                && !method.is_constructor
                && colliding_method(index, methods, &names, true).is_some()
        })
        .collect();
    mangle_overloads(methods, &mut names, &overloaded, pool);

    let overloaded: Vec<bool> = (0..count)
        .map(|index| methods[index].is_constructor && constructor_collides(index, methods, &names, true))
        .collect();
    mangle_overloads(methods, &mut names, &overloaded, pool);

    for index in 0..count {
        if methods[index].is_attribute() && colliding_method(index, methods, &names, true).is_some() {
            names[index].push_str("__");
        }
    }

    for index in 0..count {
        if methods[index].is_constructor && constructor_collides(index, methods, &names, false) {
            names[index].push_str("__");
        }
    }

    for (index, method) in methods.iter().enumerate() {
        if !method.is_attribute() && eq_ignore_case(&names[index], naming.container) {
            names[index].push('_');
        }
    }

    for index in 0..count {
        if let Some(other) = colliding_method(index, methods, &names, false) {
            return Err(NameCollision::new(
                pool.method_signature(&methods[index]),
                pool.method_signature(&methods[other]),
            ));
        }
    }

    for (method, name) in methods.iter_mut().zip(names) {
        if method.is_attribute() {
            method.idl_name = format!("{}{}", method.attribute_kind.wire_prefix(), strip_leading_underscore(&name));
            method.attribute_name = Some(name);
        } else {
            method.idl_name = name;
            method.attribute_name = None;
        }
    }
    Ok(())
}
