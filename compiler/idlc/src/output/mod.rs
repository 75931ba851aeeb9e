//! Output files of one generation root.
//!
//! Every referenced compound type gets a file named after its IDL name;
//! exception classes get a second file for the IDL exception. A sequence
//! of depth N gets one file per depth `1..=N`. Files land in the
//! directory spelled by the type's IDL module path.

use std::fmt;

use idl_diagnostic::{Diagnostic, ErrorCode};
use idl_ir::ClassModel;
use idl_types::names::mangle::{sequence_name, strip_leading_underscore};
use idl_types::TypeId;
use rustc_hash::FxHashMap;

use crate::{IdlContext, ReferenceSet};

/// What a file holds for its type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OutputKind {
    /// The type's own definition.
    Type,
    /// The IDL exception mapped from an exception class.
    Exception,
    /// One depth of a sequence.
    Sequence { dimension: u32 },
}

/// One IDL file to write.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OutputType {
    pub module_path: Vec<String>,
    /// File name without the `.idl` extension.
    pub file_base_name: String,
    pub ty: TypeId,
    pub kind: OutputKind,
}

impl OutputType {
    /// Path relative to the output root, `/`-separated.
    pub fn path(&self) -> String {
        let mut path = String::new();
        for module in &self.module_path {
            path.push_str(module);
            path.push('/');
        }
        path.push_str(&self.file_base_name);
        path.push_str(".idl");
        path
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Two different types would be written to the same file.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("`{first}` and `{second}` both map to `{path}`")]
pub struct OutputCollision {
    pub path: String,
    /// Java name of the type that claimed the path first.
    pub first: String,
    pub second: String,
}

impl OutputCollision {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::OutputCollision)
            .with_message(self.to_string())
            .with_subject(self.second.clone())
            .with_note(format!("`{}` was generated first", self.first))
    }
}

/// File name for `name` with any escape underscore and spaces removed.
pub(crate) fn file_name(name: &str) -> String {
    strip_leading_underscore(name).replace(' ', "_")
}

impl<M: ClassModel + ?Sized> IdlContext<'_, M> {
    /// Files for one referenced type.
    pub fn output_types(&self, id: TypeId) -> Vec<OutputType> {
        let data = self.get(id);
        let module_path = self.idl_module_names(id);
        if let Some((element, dimension)) = data.array() {
            let element_name = strip_leading_underscore(&self.get(element).idl_name).to_owned();
            return (1..=dimension)
                .map(|depth| OutputType {
                    module_path: module_path.clone(),
                    file_base_name: sequence_name(depth, &element_name),
                    ty: id,
                    kind: OutputKind::Sequence { dimension: depth },
                })
                .collect();
        }
        let Some(compound) = data.compound() else {
            return Vec::new();
        };

        let mut outputs = vec![OutputType {
            module_path: module_path.clone(),
            file_base_name: file_name(&data.idl_name),
            ty: id,
            kind: OutputKind::Type,
        }];
        if let (true, Some(exception)) = (data.is_class(), &compound.exception_name) {
            outputs.push(OutputType {
                module_path,
                file_base_name: file_name(exception),
                ty: id,
                kind: OutputKind::Exception,
            });
        }
        outputs
    }

    /// Files for every type in `references`.
    ///
    /// Fails when two different types claim one path.
    pub fn output_types_for(&self, references: &ReferenceSet) -> Result<Vec<OutputType>, OutputCollision> {
        let mut claimed: FxHashMap<String, TypeId> = FxHashMap::default();
        let mut outputs = Vec::new();
        for id in references.iter() {
            for output in self.output_types(id) {
                let path = output.path();
                match claimed.get(&path) {
                    Some(&owner) if owner != id => {
                        return Err(OutputCollision {
                            path,
                            first: self.get(owner).java_name.clone(),
                            second: self.get(id).java_name.clone(),
                        });
                    }
                    Some(_) => continue,
                    None => {
                        claimed.insert(path, id);
                    }
                }
                outputs.push(output);
            }
        }
        Ok(outputs)
    }
}
