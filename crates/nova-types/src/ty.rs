use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Java primitive types.
///
/// Framework tooling mostly cares about the boxed counterpart, since class
/// lookups go through the boxed declaration (`int` -> `java.lang.Integer`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Char,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    /// Binary name of the wrapper class.
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "java.lang.Boolean",
            PrimitiveType::Byte => "java.lang.Byte",
            PrimitiveType::Short => "java.lang.Short",
            PrimitiveType::Char => "java.lang.Character",
            PrimitiveType::Int => "java.lang.Integer",
            PrimitiveType::Long => "java.lang.Long",
            PrimitiveType::Float => "java.lang.Float",
            PrimitiveType::Double => "java.lang.Double",
        }
    }
}

/// A (possibly parameterized) reference to a class or interface.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassType {
    /// Fully qualified name of the erased type.
    pub name: String,
    pub args: Vec<Type>,
}

impl ClassType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(name: impl Into<String>, args: Vec<Type>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Replace type variables according to `bindings`.
    #[must_use]
    pub fn substitute(&self, bindings: &HashMap<String, Type>) -> ClassType {
        ClassType {
            name: self.name.clone(),
            args: self.args.iter().map(|a| a.substitute(bindings)).collect(),
        }
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (idx, arg) in self.args.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(">")
    }
}

/// Source-level Java type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Void,
    Primitive(PrimitiveType),
    Class(ClassType),
    Array(Box<Type>),
    /// A type variable that has not been substituted (e.g. raw usage of a
    /// generic supertype).
    TypeVar(String),
    /// The type could not be read from the source model.
    Unknown,
}

impl Type {
    pub fn class(name: impl Into<String>, args: Vec<Type>) -> Self {
        Type::Class(ClassType::with_args(name, args))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Type::Class(ClassType::new(name))
    }

    pub fn is_primitive_boolean(&self) -> bool {
        matches!(self, Type::Primitive(PrimitiveType::Boolean))
    }

    /// Canonical text with generic arguments erased, e.g. `java.util.List`.
    ///
    /// Returns `None` for types that do not have a stable erasure in our model
    /// (unsubstituted type variables and unreadable types).
    pub fn erased_name(&self) -> Option<String> {
        match self {
            Type::Void => Some("void".to_string()),
            Type::Primitive(p) => Some(p.keyword().to_string()),
            Type::Class(class) => Some(class.name.clone()),
            Type::Array(elem) => elem.erased_name().map(|name| format!("{name}[]")),
            Type::TypeVar(_) | Type::Unknown => None,
        }
    }

    /// Erased name with primitives replaced by their wrapper class.
    ///
    /// This is the name used to look up the declaration of a property type.
    pub fn boxed_name(&self) -> Option<String> {
        match self {
            Type::Primitive(p) => Some(p.boxed_name().to_string()),
            other => other.erased_name(),
        }
    }

    #[must_use]
    pub fn substitute(&self, bindings: &HashMap<String, Type>) -> Type {
        match self {
            Type::TypeVar(name) => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
            Type::Class(class) => Type::Class(class.substitute(bindings)),
            Type::Array(elem) => Type::Array(Box::new(elem.substitute(bindings))),
            Type::Void | Type::Primitive(_) | Type::Unknown => self.clone(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Primitive(p) => f.write_str(p.keyword()),
            Type::Class(class) => write!(f, "{class}"),
            Type::Array(elem) => write!(f, "{elem}[]"),
            Type::TypeVar(name) => f.write_str(name),
            Type::Unknown => f.write_str("<unknown>"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn boxing_table_covers_every_primitive() {
        let boxed: Vec<_> = PrimitiveType::ALL
            .iter()
            .map(|p| Type::Primitive(*p).boxed_name().unwrap())
            .collect();
        assert_eq!(
            boxed,
            vec![
                "java.lang.Boolean",
                "java.lang.Byte",
                "java.lang.Short",
                "java.lang.Character",
                "java.lang.Integer",
                "java.lang.Long",
                "java.lang.Float",
                "java.lang.Double",
            ]
        );
        assert_eq!(PrimitiveType::from_keyword("char"), Some(PrimitiveType::Char));
        assert_eq!(PrimitiveType::from_keyword("String"), None);
    }

    #[test]
    fn erasure_drops_generic_arguments() {
        let list = Type::class("java.util.List", vec![Type::named("java.lang.String")]);
        assert_eq!(list.to_string(), "java.util.List<java.lang.String>");
        assert_eq!(list.erased_name().as_deref(), Some("java.util.List"));
        assert_eq!(Type::TypeVar("T".into()).erased_name(), None);
        assert_eq!(
            Type::Array(Box::new(Type::Primitive(PrimitiveType::Int)))
                .erased_name()
                .as_deref(),
            Some("int[]")
        );
    }

    #[test]
    fn substitution_replaces_bound_type_variables_only() {
        let mut bindings = HashMap::new();
        bindings.insert("T".to_string(), Type::named("java.lang.Integer"));

        let holder = ClassType::with_args(
            "com.example.Holder",
            vec![Type::TypeVar("T".into()), Type::TypeVar("U".into())],
        );
        let substituted = holder.substitute(&bindings);
        assert_eq!(
            substituted.args,
            vec![Type::named("java.lang.Integer"), Type::TypeVar("U".into())]
        );
    }
}
