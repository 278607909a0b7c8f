//! Binding metadata of `@Templated` classes.

use std::sync::Arc;

use nova_framework::{
    find_annotated, top_level_class, AnnotatedElement, CacheProvider, Database, ElementCache,
};
use nova_hir::framework::{Annotation, ClassData, FieldData};
use nova_types::{ClassId, Type};

use crate::names;
use crate::property::resolve_type_class;

/// A widget field annotated with `@Bound`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundMetaData {
    /// Class declaring the field.
    pub class: ClassId,
    pub field: String,
    pub widget_type: Type,
    /// Property path on the model; defaults to the field name.
    pub property: String,
    pub annotation: Annotation,
}

impl BoundMetaData {
    pub fn from_element(element: &AnnotatedElement<'_>) -> Self {
        let property = element
            .annotation
            .string_value("property")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(element.field.name.as_str());
        Self {
            class: element.class,
            field: element.field.name.clone(),
            widget_type: element.field.ty.clone(),
            property: property.to_string(),
            annotation: element.annotation.clone(),
        }
    }
}

/// `@Bound` fields of the top-level class enclosing `class`, nested classes
/// included.
pub fn bound_metadata_for_class(db: &dyn Database, class: ClassId) -> Vec<BoundMetaData> {
    let root = top_level_class(db, class);
    find_annotated(db, root, names::BOUND)
        .iter()
        .map(BoundMetaData::from_element)
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelRootKind {
    /// `@AutoBound DataBinder<T>`.
    AutoBound,
    /// `@Model T`.
    Model,
}

/// The model object `@Bound` fields bind against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelRoot {
    pub field: String,
    pub kind: ModelRootKind,
    /// Declaration of the model type, if known.
    pub ty: Option<ClassId>,
}

/// Binding metadata of one top-level class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateBindingMetaData {
    pub class: ClassId,
    pub model: Option<ModelRoot>,
    pub bound_fields: Vec<BoundMetaData>,
    revision: u64,
}

impl TemplateBindingMetaData {
    pub fn compute(db: &dyn Database, class: ClassId) -> Self {
        let class = top_level_class(db, class);
        Self {
            class,
            model: find_model_root(db, class),
            bound_fields: bound_metadata_for_class(db, class),
            revision: db.revision(),
        }
    }

    /// Database revision the metadata was computed at.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The metadata also depends on model and widget classes, so any change
    /// to the database invalidates it.
    pub fn is_cache_valid(&self, db: &dyn Database) -> bool {
        self.revision == db.revision()
    }
}

fn find_model_root(db: &dyn Database, class: ClassId) -> Option<ModelRoot> {
    let data = db.class(class)?;
    let project = db.project_of_class(class)?;

    let root = |field: &FieldData, kind: ModelRootKind, ty: Option<&Type>| ModelRoot {
        field: field.name.clone(),
        kind,
        ty: ty.and_then(|ty| resolve_type_class(db, project, ty)),
    };

    data.fields.iter().find_map(|field| {
        if field.has_annotation(names::AUTO_BOUND) {
            let model_ty = match &field.ty {
                Type::Class(binder) if binder.name == names::DATA_BINDER => binder.args.first(),
                _ => None,
            };
            Some(root(field, ModelRootKind::AutoBound, model_ty))
        } else if field.has_annotation(names::MODEL) {
            Some(root(field, ModelRootKind::Model, Some(&field.ty)))
        } else {
            None
        }
    })
}

/// Cache of [`TemplateBindingMetaData`] keyed by class declaration.
pub type TemplateCache = ElementCache<ClassData, TemplateBindingMetaData>;

struct TemplateProvider<'a> {
    db: &'a dyn Database,
    class: ClassId,
}

impl CacheProvider<TemplateBindingMetaData> for TemplateProvider<'_> {
    fn provide(&self) -> TemplateBindingMetaData {
        tracing::debug!(class = self.class.to_raw(), "computing template binding metadata");
        TemplateBindingMetaData::compute(self.db, self.class)
    }

    fn is_valid(&self, value: &TemplateBindingMetaData) -> bool {
        value.is_cache_valid(self.db)
    }
}

/// Cached [`TemplateBindingMetaData`] for the top-level class enclosing
/// `class`.
pub fn template_binding_metadata(
    db: &dyn Database,
    cache: &TemplateCache,
    class: ClassId,
) -> Option<Arc<TemplateBindingMetaData>> {
    let class = top_level_class(db, class);
    let element = db.class_element(class)?;
    Some(cache.get_or_compute(&element, &TemplateProvider { db, class }))
}
