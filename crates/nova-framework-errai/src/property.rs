//! Bean property resolution over accessor methods.

use indexmap::IndexMap;

use nova_framework::{all_methods, is_annotated, Database, MethodRef, JAVA_LANG_OBJECT};
use nova_types::{ClassId, ProjectId, Type};

use crate::accessor::{is_getter_name, is_setter_name, property_from_accessor};
use crate::bindable::BindableTypes;
use crate::names;

/// An accessor method backing a property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accessor {
    /// Class declaring the method.
    pub owner: ClassId,
    pub name: String,
    /// Return type of a getter, parameter type of a setter.
    pub ty: Type,
}

impl Accessor {
    fn from_method(method: &MethodRef<'_>, ty: &Type) -> Self {
        Self {
            owner: method.owner,
            name: method.method.name.clone(),
            ty: ty.clone(),
        }
    }
}

/// A bean property inferred from accessor methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    /// Declaration of the property type, primitives boxed. `None` when the
    /// type is not a class known to the database.
    pub ty: Option<ClassId>,
    pub getter: Option<Accessor>,
    pub setter: Option<Accessor>,
}

impl PropertyInfo {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            getter: None,
            setter: None,
        }
    }

    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }
}

/// Properties keyed by (path-prefixed) name, in discovery order.
pub type PropertyMap = IndexMap<String, PropertyInfo>;

/// Declaration backing `ty`, looked up through its boxed erasure
/// (`int` -> `java.lang.Integer`, `List<String>` -> `java.util.List`).
pub fn resolve_type_class(db: &dyn Database, project: ProjectId, ty: &Type) -> Option<ClassId> {
    let name = ty.boxed_name()?;
    db.resolve_class(project, &name)
}

/// Every property reachable at `path` from `class`.
///
/// Everything before the last `.` of `path` is the root, walked one property
/// at a time; each type along the way must be bindable. The properties of the
/// type at the end of the root are returned with `root.` prepended to their
/// names. An unresolvable root yields an empty map.
pub fn resolve_properties(
    db: &dyn Database,
    bindable: &BindableTypes,
    class: ClassId,
    path: &str,
) -> PropertyMap {
    let root = path.rfind('.').map(|idx| &path[..idx]);

    let target = match root {
        Some(root) => match resolve_path_root(db, bindable, class, root) {
            Some(target) => target,
            None => return PropertyMap::new(),
        },
        None => class,
    };

    let prefix = root.map(|root| format!("{root}.")).unwrap_or_default();
    bean_properties(db, target)
        .into_iter()
        .map(|(name, info)| (format!("{prefix}{name}"), info))
        .collect()
}

/// Walk the dotted `root` starting at `class`, returning the type the last
/// segment resolves to.
pub fn resolve_path_root(
    db: &dyn Database,
    bindable: &BindableTypes,
    class: ClassId,
    root: &str,
) -> Option<ClassId> {
    let mut current = class;
    for token in root.split('.') {
        let token = token.trim();
        if !is_bindable(db, bindable, current) {
            tracing::debug!(
                class = db.class(current).map(|c| c.name.as_str()).unwrap_or("<unknown>"),
                property = token,
                "property path walks through a type that is not bindable"
            );
            return None;
        }
        let Some(next) = resolve_single_property(db, current, token).and_then(|info| info.ty)
        else {
            tracing::debug!(property = token, "property path segment does not resolve");
            return None;
        };
        current = next;
    }
    Some(current)
}

/// Whether `class` may be traversed as a data-binding root.
pub fn is_bindable(db: &dyn Database, bindable: &BindableTypes, class: ClassId) -> bool {
    let configured = db
        .class(class)
        .is_some_and(|data| bindable.contains(&data.name));
    configured || is_annotated(db, class, names::BINDABLE)
}

/// Getter-based lookup of a single property of `class`.
///
/// Only zero-argument `get<Name>` / `is<Name>` methods are considered; the
/// first match wins. Setters are ignored.
pub fn resolve_single_property(
    db: &dyn Database,
    class: ClassId,
    property: &str,
) -> Option<PropertyInfo> {
    let project = db.project_of_class(class)?;
    let getter = all_methods(db, class).into_iter().find(|m| {
        m.method.is_public()
            && m.method.params.is_empty()
            && is_getter_name(&m.method.name, property)
    })?;

    let ty = &getter.method.return_type;
    Some(PropertyInfo {
        name: property.to_string(),
        ty: resolve_type_class(db, project, ty),
        getter: Some(Accessor::from_method(&getter, ty)),
        setter: None,
    })
}

/// All accessor-backed properties of `class`, excluding members of
/// `java.lang.Object`.
///
/// The property type comes from whichever accessor is seen first; a later
/// accessor only fills it in when the earlier type did not resolve.
pub fn bean_properties(db: &dyn Database, class: ClassId) -> PropertyMap {
    let mut properties = PropertyMap::new();
    let Some(project) = db.project_of_class(class) else {
        return properties;
    };

    for method in all_methods(db, class) {
        if !method.method.is_public() || declared_on_object(db, &method) {
            continue;
        }

        let name = &method.method.name;
        let property = property_from_accessor(name);
        let params = &method.method.params;

        let (ty, is_getter) = if params.is_empty() && is_getter_name(name, &property) {
            (&method.method.return_type, true)
        } else if params.len() == 1 && is_setter_name(name, &property) {
            (&params[0].ty, false)
        } else {
            continue;
        };

        if *ty == Type::Unknown {
            tracing::debug!(method = %name, "accessor type could not be read; skipping");
            continue;
        }

        let info = properties
            .entry(property.clone())
            .or_insert_with(|| PropertyInfo::new(property));
        if info.ty.is_none() {
            info.ty = resolve_type_class(db, project, ty);
        }
        let accessor = Accessor::from_method(&method, ty);
        if is_getter {
            info.getter = Some(accessor);
        } else {
            info.setter = Some(accessor);
        }
    }

    properties
}

fn declared_on_object(db: &dyn Database, method: &MethodRef<'_>) -> bool {
    db.class(method.owner)
        .map_or(true, |owner| owner.name == JAVA_LANG_OBJECT)
}
