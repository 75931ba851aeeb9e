//! Data member naming.

use super::{eq_ignore_case, NameCollision, NameContext, NameEnv};
use crate::{Member, Method};

/// Whether `name` is taken by a method of the same type, either as its
/// wire name or as its attribute name.
fn taken_by_method(name: &str, methods: &[Method]) -> bool {
    methods
        .iter()
        .any(|method| method.idl_name == name || method.attribute_name.as_deref() == Some(name))
}

/// Assign IDL names to every member of one compound type.
///
/// Runs after [`super::set_method_names`]: members yield to methods by
/// appending `_` until no method or other member shares their name.
#[tracing::instrument(level = "debug", skip_all, fields(container = %container, members = members.len()))]
pub fn set_member_names(
    env: &mut NameEnv,
    container: &str,
    members: &mut [Member],
    methods: &[Method],
) -> Result<(), NameCollision> {
    let mut context = NameContext::lenient();
    for member in members.iter() {
        context.put(&member.name);
    }
    for member in members.iter_mut() {
        member.idl_name = env.member_or_method_name(&context, &member.name);
    }

    for member in members.iter_mut() {
        if eq_ignore_case(&member.idl_name, container) {
            member.idl_name.push('_');
        }
    }

    for (index, member) in members.iter().enumerate() {
        if let Some(other) = members[index + 1..]
            .iter()
            .find(|other| other.idl_name == member.idl_name)
        {
            return Err(NameCollision::new(&member.name, &other.name));
        }
    }

    // Renamed members may land on another member's name; the renamed one
    // moves again.
    let mut renamed = vec![false; members.len()];
    loop {
        let mut changed = false;
        for index in 0..members.len() {
            let name = &members[index].idl_name;
            let clashes_with_member = renamed[index]
                && members
                    .iter()
                    .enumerate()
                    .any(|(other, member)| other != index && member.idl_name == *name);
            if clashes_with_member || taken_by_method(name, methods) {
                members[index].idl_name.push('_');
                renamed[index] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    Ok(())
}
