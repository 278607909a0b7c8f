//! Compatibility between a bound property type and a widget type.

use std::collections::HashSet;

use nova_framework::{declared_supertypes, is_assignable, supertypes_of, Database, JAVA_LANG_OBJECT};
use nova_types::{ClassId, ClassType, ProjectId};

use crate::convert::ConvertibilityMetaData;
use crate::names;
use crate::property::resolve_type_class;

/// Reported as the expected widget type when a value-holder's type argument
/// cannot be resolved.
pub const INVALID_WIDGET_TYPE: &str = "<invalid>";

/// Widget interfaces that carry binding information.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `TakesValue<T>`: the widget holds a value of type `T`.
    ValueHolder,
    /// `HasText`: the widget displays text but declares no value type.
    TextCapable,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::ValueHolder, Capability::TextCapable];

    pub fn qualified_name(self) -> &'static str {
        match self {
            Capability::ValueHolder => names::TAKES_VALUE,
            Capability::TextCapable => names::HAS_TEXT,
        }
    }

    pub fn of(ty: &ClassType) -> Option<Capability> {
        Self::ALL
            .into_iter()
            .find(|capability| capability.qualified_name() == ty.name)
    }
}

/// Why a validation ended the way it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidationBasis {
    /// No property type to check.
    NoBindingType,
    /// The property type is assignable to the value-holder's type.
    Assignable,
    /// A declared converter covers the pair.
    Converter,
    /// The value-holder's type is incompatible.
    Mismatch,
    /// The value-holder's type argument could not be resolved.
    UnresolvedTypeParameter,
    /// No value-holder, but the widget is text-capable.
    TextCapable,
    /// Neither capability was found; accepted by default.
    NoEvidence,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindabilityValidation {
    valid: bool,
    expected_widget_type: Option<String>,
    basis: ValidationBasis,
}

impl BindabilityValidation {
    fn accepted(basis: ValidationBasis) -> Self {
        Self {
            valid: true,
            expected_widget_type: None,
            basis,
        }
    }

    fn rejected(expected_widget_type: Option<String>, basis: ValidationBasis) -> Self {
        Self {
            valid: false,
            expected_widget_type,
            basis,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Value type the widget expects, for diagnostics.
    pub fn expected_widget_type(&self) -> Option<&str> {
        self.expected_widget_type.as_deref()
    }

    pub fn basis(&self) -> ValidationBasis {
        self.basis
    }
}

enum Walk {
    Searching { text_capable: bool },
    Done(BindabilityValidation),
}

/// Decide whether a property of type `binding_type` can be bound to a widget
/// of type `widget_type`.
///
/// The supertypes of the widget are walked depth-first (last pushed first).
/// The first value-holder interface decides the outcome. When none is found
/// the binding is accepted.
pub fn validate_bindability(
    db: &dyn Database,
    binding_type: Option<ClassId>,
    widget_type: ClassId,
    convertibility: &ConvertibilityMetaData,
) -> BindabilityValidation {
    let Some(binding_type) = binding_type else {
        return BindabilityValidation::rejected(None, ValidationBasis::NoBindingType);
    };
    let Some(project) = db.project_of_class(widget_type) else {
        tracing::debug!(
            widget = widget_type.to_raw(),
            "widget type is not part of the database; accepting without evidence"
        );
        return BindabilityValidation::accepted(ValidationBasis::NoEvidence);
    };

    let mut stack = declared_supertypes(db, widget_type);
    let mut visited = HashSet::new();
    let mut state = Walk::Searching {
        text_capable: false,
    };

    while let Some(ty) = stack.pop() {
        if !visited.insert(ty.clone()) {
            continue;
        }
        stack.extend(
            supertypes_of(db, project, &ty)
                .into_iter()
                .filter(|sup| sup.name != JAVA_LANG_OBJECT),
        );

        state = match (state, Capability::of(&ty)) {
            (Walk::Searching { .. }, Some(Capability::ValueHolder)) => Walk::Done(
                check_value_holder(db, project, binding_type, &ty, convertibility),
            ),
            (Walk::Searching { .. }, Some(Capability::TextCapable)) => Walk::Searching {
                text_capable: true,
            },
            (state, _) => state,
        };

        if let Walk::Done(validation) = state {
            tracing::trace!(
                valid = validation.valid,
                basis = ?validation.basis,
                "bindability decided by value holder"
            );
            return validation;
        }
    }

    let text_capable = matches!(state, Walk::Searching { text_capable: true });
    BindabilityValidation::accepted(if text_capable {
        ValidationBasis::TextCapable
    } else {
        ValidationBasis::NoEvidence
    })
}

fn check_value_holder(
    db: &dyn Database,
    project: ProjectId,
    binding_type: ClassId,
    value_holder: &ClassType,
    convertibility: &ConvertibilityMetaData,
) -> BindabilityValidation {
    let Some(held) = value_holder
        .args
        .first()
        .and_then(|arg| resolve_type_class(db, project, arg))
    else {
        return BindabilityValidation::rejected(
            Some(INVALID_WIDGET_TYPE.to_string()),
            ValidationBasis::UnresolvedTypeParameter,
        );
    };

    if is_assignable(db, binding_type, held) {
        return BindabilityValidation::accepted(ValidationBasis::Assignable);
    }
    if convertibility.can_convert(binding_type, held) {
        return BindabilityValidation::accepted(ValidationBasis::Converter);
    }

    let expected = db
        .class(held)
        .map_or_else(|| INVALID_WIDGET_TYPE.to_string(), |data| data.name.clone());
    BindabilityValidation::rejected(Some(expected), ValidationBasis::Mismatch)
}
