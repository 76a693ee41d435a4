use keel_core::schema::{Builder, Model, PropertyId, ValueType};
use pretty_assertions::assert_eq;
use std_util::prelude::*;

use std::{sync::Arc, thread};

const READERS: usize = 16;
const ROUNDS: usize = 500;

/// Ten entity types, each with a foreign key to the previous one.
fn model() -> (Arc<Model>, Vec<PropertyId>) {
    let mut builder = Builder::new();
    let mut refs = vec![];
    let mut previous = None;

    for i in 0..10 {
        let mut entity = assert_ok!(builder.add_entity_type(&format!("Entity{i}")));
        let id = entity.property("Id", ValueType::I64).id();
        let parent = entity.property("ParentId", ValueType::I64).nullable(true).id();
        let key = entity.primary_key([id]);
        entity.index([parent], false);

        if let Some(previous) = previous {
            entity.foreign_key([parent], previous);
        }

        previous = Some(key);
        refs.push(parent);
    }

    (assert_ok!(builder.finalize()), refs)
}

/// Everything a reader can observe about one property.
fn snapshot(model: &Model, property: PropertyId) -> (Option<PropertyId>, Vec<PropertyId>, String) {
    (
        model.find_first_principal(property),
        model.principals(property),
        model.property_debug_string(property, Default::default(), 0),
    )
}

#[test]
fn finalized_model_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Model>();
    assert_send_sync::<Arc<Model>>();
}

#[test]
fn concurrent_readers_observe_the_same_model() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (model, refs) = model();
    let expected: Vec<_> = refs.iter().map(|p| snapshot(&model, *p)).collect();

    thread::scope(|s| {
        for reader in 0..READERS {
            let model = model.clone();
            let refs = &refs;
            let expected = &expected;

            s.spawn(move || {
                for round in 0..ROUNDS {
                    let i = (reader + round) % refs.len();
                    assert_eq!(snapshot(&model, refs[i]), expected[i]);

                    let name = format!("Entity{i}");
                    let entity = assert_some!(model.entity_type_by_name(&name));
                    assert_eq!(entity.properties.len(), 2);
                }
            });
        }
    });

    // Entity9.ParentId walks back to Entity0.Id
    assert_eq!(model.principals(refs[9]).len(), 2);
    assert_eq!(model.find_first_principal(refs[0]), None);
}
