//! Case-insensitive name registries.
//!
//! IDL identifiers that differ only in case collide. A [`NameContext`]
//! records every name put into it under its lowercase key:
//! - contexts that allow collisions remember the clash and let
//!   [`NameContext::get`] disambiguate every spelling of the key
//! - strict contexts reject the second spelling outright

use std::fmt::Write as _;

use rustc_hash::FxHashMap;

/// Two names that may not coexist.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("\"{first}\" and \"{second}\"")]
pub struct NameCollision {
    pub first: String,
    pub second: String,
}

impl NameCollision {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        NameCollision {
            first: first.into(),
            second: second.into(),
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    spelling: String,
    collides: bool,
}

#[derive(Clone, Debug)]
pub struct NameContext {
    entries: FxHashMap<String, Entry>,
    allow_collisions: bool,
}

impl NameContext {
    /// Context that resolves case clashes through [`NameContext::get`].
    pub fn lenient() -> Self {
        NameContext {
            entries: FxHashMap::default(),
            allow_collisions: true,
        }
    }

    /// Context that rejects case clashes.
    pub fn strict() -> Self {
        NameContext {
            entries: FxHashMap::default(),
            allow_collisions: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `name`; a different spelling of a known key collides.
    pub fn assert_put(&mut self, name: &str) -> Result<(), NameCollision> {
        let key = name.to_lowercase();
        match self.entries.get_mut(&key) {
            Some(entry) if entry.spelling != name => {
                if self.allow_collisions {
                    entry.collides = true;
                    Ok(())
                } else {
                    Err(NameCollision::new(name, entry.spelling.clone()))
                }
            }
            Some(_) => Ok(()),
            None => {
                self.entries.insert(
                    key,
                    Entry {
                        spelling: name.to_owned(),
                        collides: false,
                    },
                );
                Ok(())
            }
        }
    }

    /// Record `name` in a lenient context.
    pub fn put(&mut self, name: &str) {
        debug_assert!(self.allow_collisions, "strict contexts go through assert_put");
        // Lenient contexts never fail.
        let _ = self.assert_put(name);
    }

    /// Final spelling of `name`: unchanged unless its key clashed, in which
    /// case the positions of its uppercase letters are appended.
    pub fn get(&self, name: &str) -> String {
        match self.entries.get(&name.to_lowercase()) {
            Some(entry) if entry.collides => disambiguate(name),
            _ => name.to_owned(),
        }
    }
}

/// `fooBar` becomes `fooBar_3`, `FooBar` becomes `FooBar_0_3`, `foobar`
/// becomes `foobar_`.
fn disambiguate(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 8);
    result.push_str(name);
    result.push('_');
    let mut first = true;
    for (index, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if !first {
                result.push('_');
            }
            first = false;
            let _ = write!(result, "{index}");
        }
    }
    result
}
