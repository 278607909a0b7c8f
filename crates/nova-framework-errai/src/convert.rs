//! Converter declarations on `@Bound` fields.

use std::collections::HashSet;

use nova_framework::{declared_supertypes, generic_type_arguments, supertypes_of, Database};
use nova_hir::framework::Annotation;
use nova_types::{ClassId, ClassType, ProjectId, Type};

use crate::names;
use crate::property::resolve_type_class;

/// A declared `source -> target` conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConversionRule {
    pub source: ClassId,
    pub target: ClassId,
}

/// Conversions available to one binding site.
///
/// Empty metadata means no converter was declared, so only direct
/// assignability counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConvertibilityMetaData {
    rules: Vec<ConversionRule>,
}

impl ConvertibilityMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_conversion_rule(&mut self, source: ClassId, target: ClassId) {
        self.rules.push(ConversionRule { source, target });
    }

    /// Exact, direction-sensitive lookup; no transitivity.
    pub fn can_convert(&self, from: ClassId, to: ClassId) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.source == from && rule.target == to)
    }

    pub fn rules(&self) -> &[ConversionRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Conversion declared by the `converter` attribute of a binding annotation.
pub fn resolve_convertibility(
    db: &dyn Database,
    project: ProjectId,
    annotation: &Annotation,
) -> ConvertibilityMetaData {
    let mut metadata = ConvertibilityMetaData::new();

    let Some(converter) = generic_type_arguments(annotation, "converter")
        .into_iter()
        .next()
        .filter(|name| name != names::NO_CONVERTER)
    else {
        return metadata;
    };

    let Some(converter_class) = db.resolve_class(project, &converter) else {
        tracing::debug!(converter = %converter, "converter class is not part of the database");
        return metadata;
    };

    let Some(args) = converter_type_arguments(db, project, converter_class) else {
        tracing::debug!(converter = %converter, "converter does not implement Converter");
        return metadata;
    };

    match (
        args.first().and_then(|ty| resolve_type_class(db, project, ty)),
        args.get(1).and_then(|ty| resolve_type_class(db, project, ty)),
    ) {
        (Some(source), Some(target)) => metadata.add_conversion_rule(source, target),
        _ => tracing::debug!(
            converter = %converter,
            "converter type arguments do not resolve to known classes"
        ),
    }

    metadata
}

/// Type arguments `class` supplies to `Converter<S, T>`, found by walking its
/// supertypes with substitution.
fn converter_type_arguments(
    db: &dyn Database,
    project: ProjectId,
    class: ClassId,
) -> Option<Vec<Type>> {
    let mut stack: Vec<ClassType> = declared_supertypes(db, class);
    let mut visited = HashSet::new();

    while let Some(ty) = stack.pop() {
        if ty.name == names::CONVERTER {
            return Some(ty.args);
        }
        if !visited.insert(ty.clone()) {
            continue;
        }
        stack.extend(supertypes_of(db, project, &ty));
    }
    None
}
