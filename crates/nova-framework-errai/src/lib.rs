//! Errai UI data-binding intelligence for Nova.
//!
//! Errai binds widget fields of a `@Templated` class (`@Bound`) to properties
//! of a model object (`@AutoBound DataBinder<T>` or `@Model T`). This crate
//! provides:
//!
//! - JavaBeans property resolution, including dotted property paths through
//!   `@Bindable` (or configured bindable) types
//! - Widget compatibility checks against `TakesValue<T>`, honoring converters
//!   declared with `@Bound(converter = ...)`
//! - Per-class binding metadata, cached by class declaration
//! - Diagnostics for unknown properties and incompatible widgets

pub mod accessor;
mod bindable;
mod config;
mod convert;
pub mod names;
mod property;
mod template;
mod validate;

pub use accessor::property_from_accessor;
pub use bindable::{configured_bindable_types, BindableTypes};
pub use config::{
    ConfigError, ErraiConfig, DEFAULT_BINDABLE_TYPES_KEY, DEFAULT_PROPERTIES_FILE_NAME,
};
pub use convert::{resolve_convertibility, ConversionRule, ConvertibilityMetaData};
pub use property::{
    bean_properties, is_bindable, resolve_path_root, resolve_properties, resolve_single_property,
    resolve_type_class, Accessor, PropertyInfo, PropertyMap,
};
pub use template::{
    bound_metadata_for_class, template_binding_metadata, BoundMetaData, ModelRoot, ModelRootKind,
    TemplateBindingMetaData, TemplateCache,
};
pub use validate::{
    validate_bindability, BindabilityValidation, Capability, ValidationBasis, INVALID_WIDGET_TYPE,
};

pub use nova_types::{Diagnostic, Severity};

use std::sync::Arc;

use nova_framework::{Database, FrameworkAnalyzer};
use nova_types::{ClassId, ProjectId};

pub const ERRAI_BOUND_NO_MODEL: &str = "ERRAI_BOUND_NO_MODEL";
pub const ERRAI_BOUND_UNKNOWN_PROPERTY: &str = "ERRAI_BOUND_UNKNOWN_PROPERTY";
pub const ERRAI_BOUND_TYPE_MISMATCH: &str = "ERRAI_BOUND_TYPE_MISMATCH";

/// Outcome of checking one `@Bound` field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingCheck {
    pub bound: BoundMetaData,
    /// The resolved property; `None` when the path does not resolve.
    pub property: Option<PropertyInfo>,
    /// `None` when the property or the widget type could not be resolved.
    pub validation: Option<BindabilityValidation>,
}

pub struct ErraiAnalyzer {
    config: ErraiConfig,
    cache: TemplateCache,
}

impl ErraiAnalyzer {
    pub fn new() -> Self {
        Self::with_config(ErraiConfig::default())
    }

    pub fn with_config(config: ErraiConfig) -> Self {
        Self {
            config,
            cache: TemplateCache::new(),
        }
    }

    pub fn config(&self) -> &ErraiConfig {
        &self.config
    }

    /// Cached binding metadata of the top-level class enclosing `class`.
    pub fn template_metadata(
        &self,
        db: &dyn Database,
        class: ClassId,
    ) -> Option<Arc<TemplateBindingMetaData>> {
        template_binding_metadata(db, &self.cache, class)
    }

    /// Check every `@Bound` field declared directly in `class` against the
    /// model of its template. Returns `None` when the template has no model.
    pub fn check_bindings(&self, db: &dyn Database, class: ClassId) -> Option<Vec<BindingCheck>> {
        let metadata = self.template_metadata(db, class)?;
        let project = db.project_of_class(class)?;
        let model = metadata.model.as_ref()?;
        let Some(model_ty) = model.ty else {
            tracing::debug!(field = %model.field, "model type is not part of the database");
            return Some(Vec::new());
        };

        let bindable = configured_bindable_types(db, project, &self.config);
        let checks = metadata
            .bound_fields
            .iter()
            .filter(|bound| bound.class == class)
            .map(|bound| {
                let property = resolve_properties(db, &bindable, model_ty, &bound.property)
                    .swap_remove(&bound.property);
                let widget = resolve_type_class(db, project, &bound.widget_type);
                let validation = match (&property, widget) {
                    (Some(property), Some(widget)) => {
                        let convertibility = resolve_convertibility(db, project, &bound.annotation);
                        Some(validate_bindability(db, property.ty, widget, &convertibility))
                    }
                    _ => None,
                };
                BindingCheck {
                    bound: bound.clone(),
                    property,
                    validation,
                }
            })
            .collect();
        Some(checks)
    }
}

impl Default for ErraiAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameworkAnalyzer for ErraiAnalyzer {
    fn applies_to(&self, db: &dyn Database, project: ProjectId) -> bool {
        db.has_class_on_classpath_prefix(project, names::ERRAI_PACKAGE_PREFIX)
    }

    fn diagnostics(&self, db: &dyn Database, class: ClassId) -> Vec<Diagnostic> {
        let Some(checks) = self.check_bindings(db, class) else {
            return self
                .template_metadata(db, class)
                .map(|metadata| {
                    metadata
                        .bound_fields
                        .iter()
                        .filter(|bound| bound.class == class)
                        .map(|bound| {
                            Diagnostic::warning(
                                ERRAI_BOUND_NO_MODEL,
                                format!(
                                    "`@Bound` field `{}` has no `@AutoBound` data binder or `@Model` to bind to",
                                    bound.field
                                ),
                            )
                        })
                        .collect()
                })
                .unwrap_or_default();
        };

        checks.iter().filter_map(check_diagnostic).collect()
    }
}

fn check_diagnostic(check: &BindingCheck) -> Option<Diagnostic> {
    let bound = &check.bound;
    let Some(property) = &check.property else {
        return Some(Diagnostic::error(
            ERRAI_BOUND_UNKNOWN_PROPERTY,
            format!(
                "`@Bound` field `{}` refers to unknown property `{}`",
                bound.field, bound.property
            ),
        ));
    };

    let validation = check.validation.as_ref()?;
    if validation.is_valid() {
        return None;
    }

    let message = match validation.expected_widget_type() {
        Some(expected) => format!(
            "property `{}` cannot be bound to `{}` (widget `{}` expects `{}`)",
            property.name, bound.field, bound.widget_type, expected
        ),
        None => format!(
            "property `{}` has no resolvable type and cannot be bound to `{}`",
            property.name, bound.field
        ),
    };
    Some(Diagnostic::error(ERRAI_BOUND_TYPE_MISMATCH, message))
}
