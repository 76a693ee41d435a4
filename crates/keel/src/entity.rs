use crate::{schema::EntityTypeBuilder, Result};

/// A Rust type mapped to an entity type.
///
/// Implementations declare the entity's shape when the type is registered
/// with [`db::Builder`](crate::db::Builder).
pub trait Entity: Send + Sync + Sized + 'static {
    /// Entity type name, qualified with the default schema if unqualified
    const NAME: &'static str;

    /// Declare properties, keys and indexes.
    fn declare(entity: &mut EntityTypeBuilder<'_>) -> Result<()>;

    /// Declare foreign keys and the base type.
    ///
    /// Runs after every registered entity has been declared, so principal
    /// keys on other entity types can be resolved.
    fn relate(_entity: &mut EntityTypeBuilder<'_>) -> Result<()> {
        Ok(())
    }
}
