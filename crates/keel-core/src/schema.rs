mod builder;
pub use builder::{Builder, EntityTypeBuilder, Phase, PropertyBuilder};

mod debug;
pub use debug::{DebugOptions, PropertyIndexes};

mod entity_type;
pub use entity_type::{EntityType, EntityTypeId, TemporalTable};

mod foreign_key;
pub use foreign_key::{ForeignKey, ForeignKeyId};

mod index;
pub use index::{Index, IndexId};

mod key;
pub use key::{Key, KeyId};

mod model;
pub use model::{Model, PropertyRelations};

mod principal;

mod property;
pub use property::{
    Property, PropertyAccessMode, PropertyId, SaveBehavior, ValueGenerated, ValueType,
};

mod type_mapping;
pub use type_mapping::{TypeMapping, TypeMappings};

mod verify;

/// Free-form name/value metadata attached to model items, in insertion order.
pub type Annotations = indexmap::IndexMap<String, String>;
