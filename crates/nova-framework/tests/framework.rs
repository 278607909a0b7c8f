use std::path::Path;

use nova_framework::{
    all_methods, find_annotated, generic_type_arguments, is_annotated, is_assignable, is_subtype,
    supertypes_of, top_level_class, AnalyzerRegistry, Database, FrameworkAnalyzer, MemoryDatabase,
};
use nova_hir::framework::{Annotation, AnnotationValue, ClassData, FieldData, MethodData};
use nova_types::{ClassId, ClassType, Diagnostic, Parameter, PrimitiveType, ProjectId, Type};
use pretty_assertions::assert_eq;

fn string() -> Type {
    Type::named("java.lang.String")
}

#[test]
fn supertypes_substitute_type_arguments() {
    let mut db = MemoryDatabase::new();
    let project = db.add_project();
    db.add_class(
        project,
        ClassData::interface("com.example.HasValue")
            .with_type_params(&["T"])
            .implements(ClassType::with_args(
                "com.example.TakesValue",
                vec![Type::TypeVar("T".into())],
            )),
    );

    let parameterized = ClassType::with_args("com.example.HasValue", vec![string()]);
    assert_eq!(
        supertypes_of(&db, project, &parameterized),
        vec![ClassType::with_args("com.example.TakesValue", vec![string()])]
    );

    // Raw usage keeps the type variable.
    let raw = ClassType::new("com.example.HasValue");
    assert_eq!(
        supertypes_of(&db, project, &raw),
        vec![ClassType::with_args(
            "com.example.TakesValue",
            vec![Type::TypeVar("T".into())]
        )]
    );
}

#[test]
fn all_methods_prefers_most_derived_declaration() {
    let mut db = MemoryDatabase::new();
    let project = db.add_project();
    let base = db.add_class(
        project,
        ClassData::new("com.example.Base")
            .with_method(MethodData::new("getName", string(), vec![]))
            .with_method(MethodData::new(
                "getAge",
                Type::Primitive(PrimitiveType::Int),
                vec![],
            )),
    );
    let derived = db.add_class(
        project,
        ClassData::new("com.example.Derived")
            .extends(ClassType::new("com.example.Base"))
            .with_method(MethodData::new("getName", string(), vec![]))
            .with_method(MethodData::new(
                "setName",
                Type::Void,
                vec![Parameter::new("name", string())],
            )),
    );

    let methods: Vec<_> = all_methods(&db, derived)
        .into_iter()
        .map(|m| (m.owner, m.method.name.as_str()))
        .collect();
    assert_eq!(
        methods,
        vec![
            (derived, "getName"),
            (derived, "setName"),
            (base, "getAge"),
        ]
    );
}

#[test]
fn all_methods_survives_cyclic_and_missing_supertypes() {
    let mut db = MemoryDatabase::new();
    let project = db.add_project();
    let a = db.add_class(
        project,
        ClassData::new("com.example.A")
            .extends(ClassType::new("com.example.B"))
            .implements(ClassType::new("com.example.Missing"))
            .with_method(MethodData::new("getA", string(), vec![])),
    );
    db.add_class(
        project,
        ClassData::new("com.example.B")
            .extends(ClassType::new("com.example.A"))
            .with_method(MethodData::new("getB", string(), vec![])),
    );

    let names: Vec<_> = all_methods(&db, a)
        .into_iter()
        .map(|m| m.method.name.clone())
        .collect();
    assert_eq!(names, vec!["getA", "getB"]);
}

#[test]
fn subtyping_is_transitive_over_classes_and_interfaces() {
    let mut db = MemoryDatabase::new();
    let project = db.add_project();
    let number = db.add_class(project, ClassData::new("java.lang.Number"));
    let integer = db.add_class(
        project,
        ClassData::new("java.lang.Integer")
            .extends(ClassType::new("java.lang.Number"))
            .implements(ClassType::new("java.lang.Comparable")),
    );
    let string_class = db.add_class(project, ClassData::new("java.lang.String"));

    assert!(is_assignable(&db, integer, number));
    assert!(!is_assignable(&db, number, integer));
    assert!(!is_assignable(&db, string_class, number));
    assert!(is_subtype(
        &db,
        project,
        "java.lang.Integer",
        "java.lang.Comparable"
    ));
}

#[test]
fn every_reference_type_is_assignable_to_object() {
    let mut db = MemoryDatabase::new();
    let project = db.add_project();
    let object = db.add_class(project, ClassData::new("java.lang.Object"));
    let iface = db.add_class(project, ClassData::interface("com.example.Named"));
    let class = db.add_class(project, ClassData::new("com.example.Plain"));

    assert!(is_assignable(&db, iface, object));
    assert!(is_assignable(&db, class, object));
    assert!(!is_assignable(&db, object, iface));
}

#[test]
fn annotation_index_covers_nested_classes() {
    let mut db = MemoryDatabase::new();
    let project = db.add_project();
    let outer = db.add_class(
        project,
        ClassData::new("com.example.Form")
            .with_annotation(Annotation::new("org.jboss.errai.ui.shared.api.annotations.Templated"))
            .with_field(
                FieldData::new("name", Type::named("com.example.TextBox"))
                    .with_annotation(Annotation::new("Bound")),
            )
            .with_field(FieldData::new("unbound", string())),
    );
    let inner = db.add_class(
        project,
        ClassData::new("com.example.Form.Inner")
            .nested_in(outer)
            .with_field(
                FieldData::new("age", Type::named("com.example.IntegerBox"))
                    .with_annotation(Annotation::new("Bound")),
            ),
    );

    let found: Vec<_> = find_annotated(&db, outer, "Bound")
        .into_iter()
        .map(|e| (e.class, e.field.name.as_str()))
        .collect();
    assert_eq!(found, vec![(outer, "name"), (inner, "age")]);
    assert_eq!(top_level_class(&db, inner), outer);
    assert!(is_annotated(&db, outer, "Templated"));
    assert!(!is_annotated(&db, inner, "Templated"));
}

#[test]
fn class_literal_attributes_expose_their_type_argument() {
    let bound = Annotation::new("Bound").with_value(
        "converter",
        AnnotationValue::Class(Type::named("com.example.DateConverter")),
    );
    assert_eq!(
        generic_type_arguments(&bound, "converter"),
        vec!["com.example.DateConverter".to_string()]
    );
    assert!(generic_type_arguments(&bound, "property").is_empty());
}

#[test]
fn memory_database_tracks_files_and_revisions() {
    let mut db = MemoryDatabase::new();
    let project_a = db.add_project();
    let project_b = db.add_project();

    let file_a = db.add_file(project_a, "src/main/resources/ErraiApp.properties", "a=1");
    let file_b = db.add_file(project_b, "ErraiApp.properties", "b=2");

    assert_eq!(db.files(project_a), vec![file_a]);
    assert_eq!(db.files(project_b), vec![file_b]);
    assert_eq!(
        db.file_path(file_a),
        Some(Path::new("src/main/resources/ErraiApp.properties"))
    );

    let before = db.revision();
    db.set_file_text(file_a, "a=2");
    assert!(db.revision() > before);
    assert_eq!(db.file_text(file_a), Some("a=2"));
}

#[test]
fn updating_a_class_releases_the_previous_element() {
    let mut db = MemoryDatabase::new();
    let project = db.add_project();
    let class = db.add_class(project, ClassData::new("com.example.Form"));

    let element = db.class_element(class).unwrap();
    let weak = std::sync::Arc::downgrade(&element);
    drop(element);

    db.update_class(class, ClassData::new("com.example.Form"));
    assert!(weak.upgrade().is_none());
    assert_eq!(db.resolve_class(project, "com.example.Form"), Some(class));
}

#[test]
fn classpath_prefix_accepts_internal_and_binary_names() {
    let mut db = MemoryDatabase::new();
    let project = db.add_project();
    db.add_classpath_class(project, "org/jboss/errai/ui/shared/api/annotations/Bound");

    assert!(db.has_class_on_classpath_prefix(project, "org.jboss.errai."));
    assert!(db.has_class_on_classpath_prefix(project, "org/jboss/errai/"));
    assert!(!db.has_class_on_classpath_prefix(project, "lombok."));
}

struct FixedAnalyzer {
    project: ProjectId,
    message: &'static str,
}

impl FrameworkAnalyzer for FixedAnalyzer {
    fn applies_to(&self, _db: &dyn Database, project: ProjectId) -> bool {
        project == self.project
    }

    fn diagnostics(&self, _db: &dyn Database, _class: ClassId) -> Vec<Diagnostic> {
        vec![Diagnostic::warning("TEST_DIAG", self.message)]
    }
}

#[test]
fn registry_aggregates_only_applicable_analyzers() {
    let mut db = MemoryDatabase::new();
    let project_a = db.add_project();
    let project_b = db.add_project();
    let class_a = db.add_class(project_a, ClassData::new("com.example.A"));

    let mut registry = AnalyzerRegistry::new();
    registry.register(Box::new(FixedAnalyzer {
        project: project_a,
        message: "diag-a",
    }));
    registry.register(Box::new(FixedAnalyzer {
        project: project_b,
        message: "diag-b",
    }));

    let diags = registry.framework_diagnostics(&db, class_a);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message, "diag-a");
}
