//! Structural type descriptors.

use std::fmt;

/// Primitive kinds, including `void` for return types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PrimitiveKind {
    Void = 0,
    Boolean = 1,
    Byte = 2,
    Char = 3,
    Short = 4,
    Int = 5,
    Long = 6,
    Float = 7,
    Double = 8,
}

impl PrimitiveKind {
    /// All kinds in declaration order.
    pub const ALL: [PrimitiveKind; 9] = [
        PrimitiveKind::Void,
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// Java keyword spelling.
    pub const fn java_name(self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// IDL spelling. Note that Java `int` is IDL `long`.
    pub const fn idl_name(self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "octet",
            PrimitiveKind::Char => "wchar",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "long",
            PrimitiveKind::Long => "long long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// JVM descriptor letter.
    pub const fn signature(self) -> char {
        match self {
            PrimitiveKind::Void => 'V',
            PrimitiveKind::Boolean => 'Z',
            PrimitiveKind::Byte => 'B',
            PrimitiveKind::Char => 'C',
            PrimitiveKind::Short => 'S',
            PrimitiveKind::Int => 'I',
            PrimitiveKind::Long => 'J',
            PrimitiveKind::Float => 'F',
            PrimitiveKind::Double => 'D',
        }
    }

    /// Parse a Java keyword spelling.
    pub fn from_java_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.java_name() == name)
    }
}

/// A field, argument or return type as declared.
///
/// Arrays are flattened: `element` is never itself an array, and
/// `dimension` counts the brackets.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JavaType {
    Primitive(PrimitiveKind),
    Class(String),
    Array {
        element: Box<JavaType>,
        dimension: u32,
    },
}

impl JavaType {
    pub const VOID: JavaType = JavaType::Primitive(PrimitiveKind::Void);
    pub const BOOLEAN: JavaType = JavaType::Primitive(PrimitiveKind::Boolean);
    pub const BYTE: JavaType = JavaType::Primitive(PrimitiveKind::Byte);
    pub const CHAR: JavaType = JavaType::Primitive(PrimitiveKind::Char);
    pub const SHORT: JavaType = JavaType::Primitive(PrimitiveKind::Short);
    pub const INT: JavaType = JavaType::Primitive(PrimitiveKind::Int);
    pub const LONG: JavaType = JavaType::Primitive(PrimitiveKind::Long);
    pub const FLOAT: JavaType = JavaType::Primitive(PrimitiveKind::Float);
    pub const DOUBLE: JavaType = JavaType::Primitive(PrimitiveKind::Double);

    /// A reference to the class with the given qualified name.
    pub fn class(name: impl Into<String>) -> Self {
        JavaType::Class(name.into())
    }

    /// An array of `element` with `dimension` brackets.
    ///
    /// Passing an array element adds to its dimension.
    pub fn array(element: JavaType, dimension: u32) -> Self {
        match element {
            JavaType::Array {
                element,
                dimension: inner,
            } => JavaType::Array {
                element,
                dimension: inner + dimension,
            },
            element => JavaType::Array {
                element: Box::new(element),
                dimension,
            },
        }
    }

    /// Parse a Java source spelling such as `int[][]` or `com.acme.Foo`.
    pub fn parse(spelling: &str) -> Self {
        let trimmed = spelling.trim();
        let mut base = trimmed;
        let mut dimension = 0;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped.trim_end();
            dimension += 1;
        }
        let element = match PrimitiveKind::from_java_name(base) {
            Some(kind) => JavaType::Primitive(kind),
            None => JavaType::Class(base.to_owned()),
        };
        if dimension == 0 {
            element
        } else {
            JavaType::array(element, dimension)
        }
    }

    /// Java spelling, e.g. `int[][]`; the key types are cached under.
    pub fn type_string(&self) -> String {
        self.to_string()
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JavaType::Primitive(PrimitiveKind::Void))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, JavaType::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JavaType::Array { .. })
    }

    /// The referenced class name, if this is a class reference.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            JavaType::Class(name) => Some(name),
            _ => None,
        }
    }

    /// Innermost element type; `self` when not an array.
    pub fn element(&self) -> &JavaType {
        match self {
            JavaType::Array { element, .. } => element,
            other => other,
        }
    }

    /// Number of array brackets; zero when not an array.
    pub fn dimension(&self) -> u32 {
        match self {
            JavaType::Array { dimension, .. } => *dimension,
            _ => 0,
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Primitive(kind) => f.write_str(kind.java_name()),
            JavaType::Class(name) => f.write_str(name),
            JavaType::Array { element, dimension } => {
                write!(f, "{element}")?;
                for _ in 0..*dimension {
                    f.write_str("[]")?;
                }
                Ok(())
            }
        }
    }
}

impl From<PrimitiveKind> for JavaType {
    fn from(kind: PrimitiveKind) -> Self {
        JavaType::Primitive(kind)
    }
}
