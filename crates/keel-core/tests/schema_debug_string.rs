use keel_core::schema::{
    Builder, DebugOptions, Model, PropertyAccessMode, PropertyId, SaveBehavior, ValueGenerated,
    ValueType,
};
use pretty_assertions::assert_eq;
use std_util::prelude::*;

use std::sync::Arc;

struct Fixture {
    model: Arc<Model>,
    customer_id: PropertyId,
    customer_name: PropertyId,
    customer_email: PropertyId,
    order_customer_id: PropertyId,
    order_version: PropertyId,
}

fn fixture() -> Fixture {
    let mut builder = Builder::new();
    builder.default_schema("Sales");

    let mut customer = assert_ok!(builder.add_entity_type("Customer"));
    let customer_id = customer
        .property("Id", ValueType::I64)
        .value_generated(ValueGenerated::OnAdd)
        .id();
    let customer_name = customer
        .property("Name", ValueType::String)
        .field_name("_name")
        .nullable(true)
        .max_length(200)
        .unicode(false)
        .access_mode(PropertyAccessMode::Field)
        .annotation("Relational:ColumnName", "customer_name")
        .id();
    let customer_email = customer.property("Email", ValueType::String).id();
    let customer_key = customer.primary_key([customer_id]);
    customer.alternate_key([customer_email]);

    let mut order = assert_ok!(builder.add_entity_type("Order"));
    let order_id = order.property("Id", ValueType::I64).id();
    let order_customer_id = order.property("CustomerId", ValueType::I64).id();
    let order_version = order
        .property("Version", ValueType::Bytes)
        .shadow(true)
        .concurrency_token(true)
        .before_save(SaveBehavior::Ignore)
        .after_save(SaveBehavior::Throw)
        .value_generated(ValueGenerated::OnAddOrUpdate)
        .id();
    order.primary_key([order_id]);
    order.foreign_key([order_customer_id], customer_key);
    order.index([order_customer_id], false);

    Fixture {
        model: assert_ok!(builder.finalize()),
        customer_id,
        customer_name,
        customer_email,
        order_customer_id,
        order_version,
    }
}

#[test]
fn property_markers_in_fixed_order() {
    let f = fixture();
    let short = DebugOptions::SHORT_DEFAULT;

    assert_eq!(
        f.model.property_debug_string(f.customer_id, short, 0),
        "Id (no field, i64) Required PK ValueGenerated.OnAdd"
    );
    assert_eq!(
        f.model.property_debug_string(f.customer_name, short, 0),
        "Name (_name, String) MaxLength(200) Ansi PropertyAccessMode.Field"
    );
    assert_eq!(
        f.model.property_debug_string(f.customer_email, short, 0),
        "Email (no field, String) Required AlternateKey"
    );
    assert_eq!(
        f.model.property_debug_string(f.order_customer_id, short, 0),
        "CustomerId (no field, i64) Required FK Index"
    );
    assert_eq!(
        f.model.property_debug_string(f.order_version, short, 0),
        "Version (no field, Vec<u8>) Shadow Required Concurrency BeforeSave:Ignore \
         AfterSave:Throw ValueGenerated.OnAddOrUpdate"
    );
}

#[test]
fn single_line_names_the_owner() {
    let f = fixture();

    assert_eq!(
        f.model
            .property_debug_string(f.order_customer_id, DebugOptions::SINGLE_LINE, 0),
        "Property: Order.CustomerId (no field, i64) Required FK Index"
    );
    assert_eq!(
        f.model.debug_string(DebugOptions::SINGLE_LINE),
        "Model: EntityType: Customer EntityType: Order"
    );
}

#[test]
fn property_indexes() {
    let f = fixture();
    let options = DebugOptions::SHORT_DEFAULT.include_indexes(true);

    assert_eq!(
        f.model
            .property_debug_string(f.order_customer_id, options, 0),
        "CustomerId (no field, i64) Required FK Index 1 -1 1 -1 -1"
    );
    assert_eq!(
        f.model.property_debug_string(f.order_version, options, 0),
        "Version (no field, Vec<u8>) Shadow Required Concurrency BeforeSave:Ignore \
         AfterSave:Throw ValueGenerated.OnAddOrUpdate 2 1 -1 0 0"
    );
}

#[test]
fn annotations_are_nested_below_the_property() {
    let f = fixture();

    assert_eq!(
        f.model
            .property_debug_string(f.customer_name, DebugOptions::LONG_DEFAULT, 2),
        [
            "  Name (_name, String) MaxLength(200) Ansi PropertyAccessMode.Field 1 -1 -1 -1 -1",
            "    Annotations: ",
            "      Relational:ColumnName: customer_name",
        ]
        .join("\n")
    );

    // Never on a single line
    let options = DebugOptions::SINGLE_LINE.include_annotations(true);
    assert!(!f
        .model
        .property_debug_string(f.customer_name, options, 0)
        .contains("Annotations"));
}

#[test]
fn entity_type_sections() {
    let f = fixture();
    let order = assert_some!(f.model.entity_type_by_name("Sales.Order"));

    assert_eq!(
        f.model
            .entity_type_debug_string(order, DebugOptions::SHORT_DEFAULT, 0),
        [
            "EntityType: Order",
            "  Properties: ",
            "    Id (no field, i64) Required PK",
            "    CustomerId (no field, i64) Required FK Index",
            "    Version (no field, Vec<u8>) Shadow Required Concurrency BeforeSave:Ignore \
             AfterSave:Throw ValueGenerated.OnAddOrUpdate",
            "  Keys: ",
            "    Key: Order.Id PK",
            "  Foreign keys: ",
            "    ForeignKey: Order {'CustomerId'} -> Customer {'Id'}",
            "  Indexes: ",
            "    Index: Order.CustomerId",
        ]
        .join("\n")
    );
}
