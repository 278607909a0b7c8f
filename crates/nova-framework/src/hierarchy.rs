//! Class hierarchy queries on top of [`Database`].

use std::collections::{HashMap, HashSet, VecDeque};

use nova_hir::framework::MethodData;
use nova_types::{ClassId, ClassType, ProjectId, Type};

use crate::Database;

/// The universal root class. Its members never describe framework behavior.
pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";

/// A method together with the class that declares it.
#[derive(Debug, Clone, Copy)]
pub struct MethodRef<'db> {
    pub owner: ClassId,
    pub method: &'db MethodData,
}

/// Supertypes written on the declaration of `class`, superclass first.
///
/// Type variables of `class` itself stay unsubstituted.
pub fn declared_supertypes(db: &dyn Database, class: ClassId) -> Vec<ClassType> {
    db.class(class)
        .map(|data| data.declared_supertypes().cloned().collect())
        .unwrap_or_default()
}

/// Direct supertypes of the parameterized type `ty`, with the type arguments
/// of `ty` substituted into them.
///
/// A raw `ty` (no arguments, or an arity mismatch) leaves the declaring
/// class's type variables in place.
pub fn supertypes_of(db: &dyn Database, project: ProjectId, ty: &ClassType) -> Vec<ClassType> {
    let Some(data) = db
        .resolve_class(project, &ty.name)
        .and_then(|id| db.class(id))
    else {
        return Vec::new();
    };

    let bindings: HashMap<String, Type> = if ty.args.len() == data.type_params.len() {
        data.type_params
            .iter()
            .cloned()
            .zip(ty.args.iter().cloned())
            .collect()
    } else {
        HashMap::new()
    };

    data.declared_supertypes()
        .map(|sup| sup.substitute(&bindings))
        .collect()
}

/// All methods declared on `class` or inherited by it.
///
/// Declared methods come first, followed by the superclass chain and then
/// interfaces (depth-first). When a signature is declared more than once the
/// most derived declaration wins.
pub fn all_methods(db: &dyn Database, class: ClassId) -> Vec<MethodRef<'_>> {
    let Some(project) = db.project_of_class(class) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut visited = HashSet::new();
    let mut signatures = HashSet::new();
    collect_methods(db, project, class, &mut visited, &mut signatures, &mut out);
    out
}

type Signature = (String, Vec<Option<String>>);

fn collect_methods<'db>(
    db: &'db dyn Database,
    project: ProjectId,
    class: ClassId,
    visited: &mut HashSet<ClassId>,
    signatures: &mut HashSet<Signature>,
    out: &mut Vec<MethodRef<'db>>,
) {
    if !visited.insert(class) {
        return;
    }
    let Some(data) = db.class(class) else {
        return;
    };

    for method in &data.methods {
        let erased_params = method.params.iter().map(|p| p.ty.erased_name()).collect();
        if signatures.insert((method.name.clone(), erased_params)) {
            out.push(MethodRef {
                owner: class,
                method,
            });
        }
    }

    for sup in data.declared_supertypes() {
        match db.resolve_class(project, &sup.name) {
            Some(id) => collect_methods(db, project, id, visited, signatures, out),
            None => tracing::trace!(
                class = %data.name,
                supertype = %sup.name,
                "supertype is not part of the database; skipping its members"
            ),
        }
    }
}

/// Whether the class named `from` is `to` or one of its (transitive)
/// subtypes.
pub fn is_subtype(db: &dyn Database, project: ProjectId, from: &str, to: &str) -> bool {
    // Every reference type, interfaces included, is an `Object`.
    if from == to || to == JAVA_LANG_OBJECT {
        return true;
    }

    let mut queue = VecDeque::<String>::new();
    queue.push_back(from.to_string());

    let mut visited = HashSet::<String>::new();
    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }
        let Some(data) = db
            .resolve_class(project, &current)
            .and_then(|id| db.class(id))
        else {
            continue;
        };
        for sup in data.declared_supertypes() {
            if sup.name == to {
                return true;
            }
            queue.push_back(sup.name.clone());
        }
    }

    false
}

/// Whether a value of class `from` can be assigned to a variable of class `to`.
pub fn is_assignable(db: &dyn Database, from: ClassId, to: ClassId) -> bool {
    if from == to {
        return true;
    }
    let (Some(project), Some(from_data), Some(to_data)) =
        (db.project_of_class(from), db.class(from), db.class(to))
    else {
        return false;
    };
    is_subtype(db, project, &from_data.name, &to_data.name)
}

/// The outermost class enclosing `class` (or `class` itself).
pub fn top_level_class(db: &dyn Database, class: ClassId) -> ClassId {
    let mut current = class;
    let mut visited = HashSet::new();
    while visited.insert(current) {
        match db.class(current).and_then(|data| data.enclosing) {
            Some(outer) => current = outer,
            None => break,
        }
    }
    current
}
