//! Annotation-aware class model used by framework analyzers (Errai, Lombok, ...).

use serde::{Deserialize, Serialize};

use nova_types::{ClassId, ClassType, Parameter, Type};

/// A compile-time constant stored in an annotation attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationValue {
    String(String),
    /// A class literal, e.g. `converter = MyConverter.class`.
    Class(Type),
    /// Anything else, kept as source text.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    pub values: Vec<(String, AnnotationValue)>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        let mut name = name.into();
        if let Some(stripped) = name.strip_prefix('@') {
            name = stripped.to_string();
        }
        Self {
            name,
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, attribute: impl Into<String>, value: AnnotationValue) -> Self {
        self.values.push((attribute.into(), value));
        self
    }

    pub fn matches(&self, query: &str) -> bool {
        annotation_matches(&self.name, query)
    }

    /// Explicitly written attribute value; `None` means the default applies.
    pub fn value(&self, attribute: &str) -> Option<&AnnotationValue> {
        self.values
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, value)| value)
    }

    pub fn string_value(&self, attribute: &str) -> Option<&str> {
        match self.value(attribute)? {
            AnnotationValue::String(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    PackagePrivate,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldData {
    pub name: String,
    pub ty: Type,
    pub is_static: bool,
    pub is_final: bool,
    pub annotations: Vec<Annotation>,
}

impl FieldData {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: false,
            is_final: false,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.matches(name))
    }

    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.matches(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodData {
    pub name: String,
    pub return_type: Type,
    pub params: Vec<Parameter>,
    pub is_static: bool,
    pub visibility: Visibility,
}

impl MethodData {
    /// A public instance method.
    pub fn new(name: impl Into<String>, return_type: Type, params: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            return_type,
            params,
            is_static: false,
            visibility: Visibility::Public,
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassData {
    /// Fully qualified name, using `.` for nested classes as well.
    pub name: String,
    pub is_interface: bool,
    pub type_params: Vec<String>,
    pub super_class: Option<ClassType>,
    pub interfaces: Vec<ClassType>,
    /// Enclosing class for nested declarations; `None` for top-level classes.
    pub enclosing: Option<ClassId>,
    pub annotations: Vec<Annotation>,
    pub fields: Vec<FieldData>,
    pub methods: Vec<MethodData>,
}

impl ClassData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            is_interface: true,
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn with_type_params(mut self, params: &[&str]) -> Self {
        self.type_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    #[must_use]
    pub fn extends(mut self, super_class: ClassType) -> Self {
        self.super_class = Some(super_class);
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: ClassType) -> Self {
        self.interfaces.push(interface);
        self
    }

    #[must_use]
    pub fn nested_in(mut self, enclosing: ClassId) -> Self {
        self.enclosing = Some(enclosing);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldData) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodData) -> Self {
        self.methods.push(method);
        self
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.matches(name))
    }

    /// Supertypes as written in the declaration: superclass first, then
    /// interfaces in declaration order.
    pub fn declared_supertypes(&self) -> impl Iterator<Item = &ClassType> {
        self.super_class.iter().chain(self.interfaces.iter())
    }
}

impl Default for ClassData {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_interface: false,
            type_params: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
            enclosing: None,
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }
}

fn annotation_matches(annotation: &str, query: &str) -> bool {
    if annotation == query {
        return true;
    }
    let annotation_simple = annotation.rsplit('.').next().unwrap_or(annotation);
    let query_simple = query.rsplit('.').next().unwrap_or(query);
    annotation_simple == query_simple
}
