use super::{ForeignKey, Model, PropertyId};

use std::collections::HashSet;

impl Model {
    /// Returns the property constraining `property` through its first
    /// containing foreign key, in declaration order.
    ///
    /// Returns `None` when `property` is not a dependent of any foreign key.
    pub fn find_first_principal(&self, property: impl Into<PropertyId>) -> Option<PropertyId> {
        let property = property.into();

        self.containing_foreign_keys(property)
            .next()
            .and_then(|foreign_key| self.principals_through(foreign_key, property).next())
    }

    /// Returns `property` followed by every principal reachable from it.
    ///
    /// The foreign key graph is walked depth-first, following every containing
    /// foreign key of each property and every position the property holds in
    /// it. Principals are listed once, in the order they are first reached.
    /// Cycles terminate because visited properties are never expanded twice.
    pub fn principals(&self, property: impl Into<PropertyId>) -> Vec<PropertyId> {
        let mut visited = HashSet::new();
        let mut principals = vec![];
        let mut stack = vec![property.into()];

        while let Some(property) = stack.pop() {
            if !visited.insert(property) {
                continue;
            }

            principals.push(property);

            let discovered: Vec<_> = self
                .containing_foreign_keys(property)
                .flat_map(|foreign_key| self.principals_through(foreign_key, property))
                .collect();

            // Reversed so the first foreign key is expanded first
            stack.extend(discovered.into_iter().rev());
        }

        principals
    }

    /// Principal key properties paired with `property`, one per position it
    /// holds among the foreign key's dependents.
    fn principals_through<'a>(
        &'a self,
        foreign_key: &'a ForeignKey,
        property: PropertyId,
    ) -> impl Iterator<Item = PropertyId> + 'a {
        let principal_key = self.key(foreign_key.principal_key);

        foreign_key
            .properties
            .iter()
            .zip(&principal_key.properties)
            .filter(move |(dependent, _)| **dependent == property)
            .map(|(_, principal)| *principal)
    }
}
