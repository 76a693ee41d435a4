use keel::{
    db::{Builder, Compiled},
    provider::Memory,
    schema::{EntityTypeBuilder, Model, ValueType},
    Entity, Result,
};
use pretty_assertions::assert_eq;
use std_util::prelude::*;

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
};

#[derive(Debug)]
struct Product;

impl Entity for Product {
    const NAME: &'static str = "Product";

    fn declare(product: &mut EntityTypeBuilder<'_>) -> Result<()> {
        let id = product.property("Id", ValueType::I32).id();
        product.property("Price", ValueType::Decimal).precision(10, Some(2));
        product.primary_key([id]);
        Ok(())
    }
}

fn build() -> Result<Arc<Model>> {
    Builder::default()
        .default_schema("Catalog")
        .register::<Product>()
        .build_model()
}

static MODEL: Compiled = Compiled::new(build);

#[test]
fn compiled_model_is_built_once_and_shared() {
    let _ = env_logger::builder().is_test(true).try_init();

    let models: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| assert_ok!(MODEL.get()))).collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("reader panicked"))
            .collect()
    });

    assert!(MODEL.is_initialized());
    for model in &models {
        assert!(Arc::ptr_eq(model, &models[0]));
    }

    let product = assert_some!(models[0].entity_type_by_name("Catalog.Product"));
    let price = assert_some!(product.property_by_name("Price"));
    assert_eq!(assert_ok!(price.type_mapping()).store_type, "decimal(10,2)");
}

static ATTEMPTS: AtomicUsize = AtomicUsize::new(0);

fn flaky_build() -> Result<Arc<Model>> {
    if ATTEMPTS.fetch_add(1, Ordering::SeqCst) == 0 {
        keel::bail!("first build fails");
    }

    build()
}

static FLAKY: Compiled = Compiled::new(flaky_build);

#[test]
fn failed_build_is_retried() {
    let err = assert_err!(FLAKY.get());
    assert_eq!(err.to_string(), "first build fails");
    assert!(!FLAKY.is_initialized());

    let model = assert_ok!(FLAKY.get());
    assert!(FLAKY.is_initialized());
    assert!(Arc::ptr_eq(&model, &assert_ok!(FLAKY.get())));
    assert_eq!(ATTEMPTS.load(Ordering::SeqCst), 2);
}

#[test]
fn db_can_use_a_precompiled_model() {
    let model = assert_ok!(MODEL.get());
    let db = assert_ok!(Builder::default()
        .model(model.clone())
        .build(Memory::new()));

    assert!(Arc::ptr_eq(db.model(), &model));
    assert!(db.set::<Product>().is_bound());
}

#[test]
fn registration_errors_surface_from_build() {
    #[derive(Debug)]
    struct Broken;

    impl Entity for Broken {
        const NAME: &'static str = "Broken";

        fn declare(broken: &mut EntityTypeBuilder<'_>) -> Result<()> {
            let id = broken.property("Id", ValueType::I32).nullable(true).id();
            broken.primary_key([id]);
            Ok(())
        }
    }

    let mut builder = Builder::default();
    builder.register::<Broken>();

    let err = assert_err!(builder.build(Memory::new()));
    assert!(err.is_validation());
    assert_eq!(err.violations().len(), 1);
}
