//! Annotation index queries.

use std::collections::HashSet;

use nova_hir::framework::{Annotation, AnnotationValue, FieldData};
use nova_types::{ClassId, Type};

use crate::Database;

/// An annotation found on a field, together with its owners.
#[derive(Debug, Clone, Copy)]
pub struct AnnotatedElement<'db> {
    /// Class declaring the annotated field.
    pub class: ClassId,
    pub field: &'db FieldData,
    pub annotation: &'db Annotation,
}

/// Every field annotated with `annotation` in `root` or in classes nested
/// inside it, in declaration order (root first).
pub fn find_annotated<'db>(
    db: &'db dyn Database,
    root: ClassId,
    annotation: &str,
) -> Vec<AnnotatedElement<'db>> {
    let mut classes = vec![root];
    if let Some(project) = db.project_of_class(root) {
        classes.extend(
            db.classes(project)
                .into_iter()
                .filter(|&id| id != root && is_nested_in(db, id, root)),
        );
    }

    let mut out = Vec::new();
    for class in classes {
        let Some(data) = db.class(class) else {
            continue;
        };
        for field in &data.fields {
            if let Some(found) = field.annotation(annotation) {
                out.push(AnnotatedElement {
                    class,
                    field,
                    annotation: found,
                });
            }
        }
    }
    out
}

fn is_nested_in(db: &dyn Database, class: ClassId, outer: ClassId) -> bool {
    let mut current = class;
    let mut visited = HashSet::new();
    while visited.insert(current) {
        match db.class(current).and_then(|data| data.enclosing) {
            Some(enclosing) if enclosing == outer => return true,
            Some(enclosing) => current = enclosing,
            None => return false,
        }
    }
    false
}

/// Whether the declaration of `class` carries `annotation`.
pub fn is_annotated(db: &dyn Database, class: ClassId, annotation: &str) -> bool {
    db.class(class)
        .is_some_and(|data| data.has_annotation(annotation))
}

/// Canonical names of the generic arguments of a `Class<...>`-typed
/// attribute, e.g. `converter = MyConverter.class` yields `["MyConverter"]`.
///
/// Returns an empty list when the attribute is left at its default or is not
/// a class literal.
pub fn generic_type_arguments(annotation: &Annotation, attribute: &str) -> Vec<String> {
    match annotation.value(attribute) {
        Some(AnnotationValue::Class(Type::Class(class))) => vec![class.name.clone()],
        Some(AnnotationValue::Class(other)) => other.boxed_name().into_iter().collect(),
        _ => Vec::new(),
    }
}
