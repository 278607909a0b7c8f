//! A small GWT / Errai world shared by the integration tests.
#![allow(dead_code)]

use nova_framework::MemoryDatabase;
use nova_framework_errai::names;
use nova_hir::framework::{Annotation, AnnotationValue, ClassData, FieldData, MethodData};
use nova_types::{ClassId, ClassType, Parameter, PrimitiveType, ProjectId, Type};

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const NUMBER: &str = "java.lang.Number";
pub const INTEGER: &str = "java.lang.Integer";
pub const BOOLEAN: &str = "java.lang.Boolean";

pub const HAS_VALUE: &str = "com.google.gwt.user.client.ui.HasValue";
pub const TEXT_BOX: &str = "com.google.gwt.user.client.ui.TextBox";
pub const INTEGER_BOX: &str = "com.google.gwt.user.client.ui.IntegerBox";
pub const NUMBER_BOX: &str = "com.example.widgets.NumberBox";
pub const LABEL: &str = "com.google.gwt.user.client.ui.Label";
pub const PANEL: &str = "com.google.gwt.user.client.ui.FlowPanel";
pub const RAW_BOX: &str = "com.example.widgets.RawBox";

pub const CUSTOMER: &str = "com.example.Customer";
pub const ADDRESS: &str = "com.example.Address";
pub const ORDER: &str = "com.example.Order";
pub const AGE_CONVERTER: &str = "com.example.AgeConverter";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn named(name: &str) -> Type {
    Type::named(name)
}

pub fn generic(name: &str, args: &[&str]) -> ClassType {
    ClassType::with_args(name, args.iter().map(|arg| Type::named(*arg)).collect())
}

pub fn getter(name: &str, ty: Type) -> MethodData {
    MethodData::new(name, ty, vec![])
}

pub fn setter(name: &str, ty: Type) -> MethodData {
    MethodData::new(name, Type::Void, vec![Parameter::new("value", ty)])
}

pub fn bound() -> Annotation {
    Annotation::new(names::BOUND)
}

pub fn bound_property(property: &str) -> Annotation {
    bound().with_value("property", AnnotationValue::String(property.into()))
}

pub fn with_converter(annotation: Annotation, converter: &str) -> Annotation {
    annotation.with_value("converter", AnnotationValue::Class(Type::named(converter)))
}

pub struct World {
    pub db: MemoryDatabase,
    pub project: ProjectId,
    pub string: ClassId,
    pub number: ClassId,
    pub integer: ClassId,
    pub text_box: ClassId,
    pub integer_box: ClassId,
    pub number_box: ClassId,
    pub label: ClassId,
    pub panel: ClassId,
    pub raw_box: ClassId,
    pub customer: ClassId,
    pub address: ClassId,
    pub order: ClassId,
}

impl World {
    pub fn new() -> Self {
        let mut db = MemoryDatabase::new();
        let project = db.add_project();
        db.add_classpath_class(project, "org/jboss/errai/ui/shared/api/annotations/Bound");

        db.add_class(
            project,
            ClassData::new(OBJECT)
                .with_method(getter("getClass", Type::named("java.lang.Class")))
                .with_method(getter("toString", named(STRING))),
        );
        let object = || ClassType::new(OBJECT);
        let string = db.add_class(project, ClassData::new(STRING).extends(object()));
        let number = db.add_class(project, ClassData::new(NUMBER).extends(object()));
        let integer = db.add_class(
            project,
            ClassData::new(INTEGER).extends(ClassType::new(NUMBER)),
        );
        db.add_class(project, ClassData::new(BOOLEAN).extends(object()));

        // Widget capabilities.
        db.add_class(
            project,
            ClassData::interface(names::TAKES_VALUE).with_type_params(&["T"]),
        );
        db.add_class(
            project,
            ClassData::interface(HAS_VALUE)
                .with_type_params(&["T"])
                .implements(ClassType::with_args(
                    names::TAKES_VALUE,
                    vec![Type::TypeVar("T".into())],
                )),
        );
        db.add_class(project, ClassData::interface(names::HAS_TEXT));
        db.add_class(
            project,
            ClassData::interface(names::CONVERTER).with_type_params(&["M", "W"]),
        );

        let text_box = db.add_class(
            project,
            ClassData::new(TEXT_BOX)
                .extends(object())
                .implements(generic(HAS_VALUE, &[STRING]))
                .implements(ClassType::new(names::HAS_TEXT)),
        );
        let integer_box = db.add_class(
            project,
            ClassData::new(INTEGER_BOX)
                .extends(object())
                .implements(generic(HAS_VALUE, &[INTEGER])),
        );
        let number_box = db.add_class(
            project,
            ClassData::new(NUMBER_BOX).implements(generic(HAS_VALUE, &[NUMBER])),
        );
        let label = db.add_class(
            project,
            ClassData::new(LABEL).implements(ClassType::new(names::HAS_TEXT)),
        );
        let panel = db.add_class(project, ClassData::new(PANEL).extends(object()));
        let raw_box = db.add_class(
            project,
            ClassData::new(RAW_BOX).implements(ClassType::new(names::TAKES_VALUE)),
        );

        // Model.
        let address = db.add_class(
            project,
            ClassData::new(ADDRESS)
                .extends(object())
                .with_method(getter("getCity", named(STRING)))
                .with_method(setter("setCity", named(STRING)))
                .with_method(getter(
                    "getStreetNumber",
                    Type::Primitive(PrimitiveType::Int),
                )),
        );
        let customer = db.add_class(
            project,
            ClassData::new(CUSTOMER)
                .extends(object())
                .with_annotation(Annotation::new(names::BINDABLE))
                .with_method(getter("getName", named(STRING)))
                .with_method(setter("setName", named(STRING)))
                .with_method(getter("getAge", Type::Primitive(PrimitiveType::Int)))
                .with_method(getter(
                    "isActive",
                    Type::Primitive(PrimitiveType::Boolean),
                ))
                .with_method(getter("getAddress", named(ADDRESS)))
                .with_method(setter("setAddress", named(ADDRESS))),
        );
        let order = db.add_class(
            project,
            ClassData::new(ORDER)
                .extends(object())
                .with_method(getter("getCustomer", named(CUSTOMER))),
        );

        db.add_class(
            project,
            ClassData::new(AGE_CONVERTER)
                .extends(object())
                .implements(generic(names::CONVERTER, &[INTEGER, STRING])),
        );

        Self {
            db,
            project,
            string,
            number,
            integer,
            text_box,
            integer_box,
            number_box,
            label,
            panel,
            raw_box,
            customer,
            address,
            order,
        }
    }

    /// A `@Templated` form bound to `Customer` through an `@AutoBound`
    /// data binder.
    pub fn add_customer_form(&mut self) -> ClassId {
        self.db.add_class(
            self.project,
            ClassData::new("com.example.client.CustomerForm")
                .extends(ClassType::new(OBJECT))
                .with_field(
                    FieldData::new(
                        "binder",
                        Type::Class(generic(names::DATA_BINDER, &[CUSTOMER])),
                    )
                    .with_annotation(Annotation::new(names::AUTO_BOUND)),
                )
                .with_field(FieldData::new("name", named(TEXT_BOX)).with_annotation(bound()))
                .with_field(FieldData::new("age", named(INTEGER_BOX)).with_annotation(bound()))
                .with_field(
                    FieldData::new("city", named(TEXT_BOX))
                        .with_annotation(bound_property("address.city")),
                )
                .with_field(FieldData::new("email", named(TEXT_BOX)).with_annotation(bound()))
                .with_field(
                    FieldData::new("ageText", named(TEXT_BOX))
                        .with_annotation(with_converter(bound_property("age"), AGE_CONVERTER)),
                )
                .with_field(
                    FieldData::new("ageRaw", named(TEXT_BOX))
                        .with_annotation(bound_property("age")),
                ),
        )
    }
}
