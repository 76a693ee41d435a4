//! Human-readable renderings of the model, for diagnostics and tests.

use super::{
    Annotations, EntityType, ForeignKey, Index, Key, Model, PropertyAccessMode, PropertyId,
    SaveBehavior, ValueGenerated,
};

use std::fmt::Write;

/// Controls what a debug string includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugOptions {
    /// Render on one line, prefixing each item with its kind and owner
    pub single_line: bool,

    /// Append positional index diagnostics to each property
    pub include_indexes: bool,

    /// Dump annotations below each item. Ignored when `single_line` is set.
    pub include_annotations: bool,
}

/// Positional diagnostics of a property within its entity type.
///
/// Each slot is the property's position among the entity's properties of
/// that kind, or `None` when the property is not of that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyIndexes {
    pub index: usize,
    pub original_value: Option<usize>,
    pub relationship: Option<usize>,
    pub shadow: Option<usize>,
    pub store_generation: Option<usize>,
}

impl DebugOptions {
    pub const SHORT_DEFAULT: Self = Self {
        single_line: false,
        include_indexes: false,
        include_annotations: false,
    };

    pub const LONG_DEFAULT: Self = Self {
        single_line: false,
        include_indexes: true,
        include_annotations: true,
    };

    pub const SINGLE_LINE: Self = Self {
        single_line: true,
        include_indexes: false,
        include_annotations: false,
    };

    pub fn single_line(mut self, single_line: bool) -> Self {
        self.single_line = single_line;
        self
    }

    pub fn include_indexes(mut self, include_indexes: bool) -> Self {
        self.include_indexes = include_indexes;
        self
    }

    pub fn include_annotations(mut self, include_annotations: bool) -> Self {
        self.include_annotations = include_annotations;
        self
    }
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self::SHORT_DEFAULT
    }
}

impl Model {
    /// Renders `property`, e.g. `CustomerId (no field, i64) Required FK Index`.
    pub fn property_debug_string(
        &self,
        property: impl Into<PropertyId>,
        options: DebugOptions,
        indent: usize,
    ) -> String {
        let id = property.into();
        let property = self.property(id);
        let entity = self.entity_type(id.entity);
        let mut out = " ".repeat(indent);

        if options.single_line {
            let _ = write!(out, "Property: {}.", entity.short_name());
        }

        let _ = write!(out, "{} (", property.name);

        match &property.field_name {
            Some(field) => {
                let _ = write!(out, "{field}, ");
            }
            None => out.push_str("no field, "),
        }

        let _ = write!(out, "{})", property.ty);

        if property.shadow {
            out.push_str(" Shadow");
        }

        if property.indexer {
            out.push_str(" Indexer");
        }

        if !property.nullable {
            out.push_str(" Required");
        }

        let primary_key = self.is_primary_key(id);

        if primary_key {
            out.push_str(" PK");
        }

        if self.is_foreign_key(id) {
            out.push_str(" FK");
        }

        if self.is_key(id) && !primary_key {
            out.push_str(" AlternateKey");
        }

        if self.is_index(id) {
            out.push_str(" Index");
        }

        if property.concurrency_token {
            out.push_str(" Concurrency");
        }

        if property.before_save != SaveBehavior::Save {
            let _ = write!(out, " BeforeSave:{}", property.before_save);
        }

        if property.after_save != SaveBehavior::Save {
            let _ = write!(out, " AfterSave:{}", property.after_save);
        }

        if property.value_generated != ValueGenerated::Never {
            let _ = write!(out, " ValueGenerated.{}", property.value_generated);
        }

        if let Some(max_length) = property.max_length {
            let _ = write!(out, " MaxLength({max_length})");
        }

        if property.unicode == Some(false) {
            out.push_str(" Ansi");
        }

        if property.access_mode != PropertyAccessMode::PreferField {
            let _ = write!(out, " PropertyAccessMode.{}", property.access_mode);
        }

        if options.include_indexes {
            let indexes = self.property_indexes(id);
            let slot = |slot: Option<usize>| slot.map_or(-1, |slot| slot as i64);

            let _ = write!(
                out,
                " {} {} {} {} {}",
                indexes.index,
                slot(indexes.original_value),
                slot(indexes.relationship),
                slot(indexes.shadow),
                slot(indexes.store_generation),
            );
        }

        if !options.single_line && options.include_annotations {
            write_annotations(&mut out, &property.annotations, indent + 2);
        }

        out
    }

    /// Renders `key`, e.g. `Key: Order.Id PK`.
    pub fn key_debug_string(&self, key: &Key, _options: DebugOptions, indent: usize) -> String {
        let entity = self.entity_type(key.id.entity);
        let mut out = " ".repeat(indent);

        out.push_str("Key: ");
        self.write_property_list(&mut out, entity, &key.properties);

        if key.primary {
            out.push_str(" PK");
        }

        out
    }

    /// Renders `index`, e.g. `Index: Order.CustomerId Unique`.
    pub fn index_debug_string(&self, index: &Index, _options: DebugOptions, indent: usize) -> String {
        let entity = self.entity_type(index.id.entity);
        let mut out = " ".repeat(indent);

        out.push_str("Index: ");
        self.write_property_list(&mut out, entity, &index.properties);

        if let Some(name) = &index.name {
            let _ = write!(out, " {name}");
        }

        if index.unique {
            out.push_str(" Unique");
        }

        out
    }

    /// Renders `foreign_key`, e.g. `ForeignKey: Order {'CustomerId'} -> Customer {'Id'}`.
    pub fn foreign_key_debug_string(
        &self,
        foreign_key: &ForeignKey,
        _options: DebugOptions,
        indent: usize,
    ) -> String {
        let dependent = self.entity_type(foreign_key.declaring_entity());
        let principal = self.entity_type(foreign_key.principal_entity());
        let principal_key = self.key(foreign_key.principal_key);

        format!(
            "{}ForeignKey: {} {} -> {} {}",
            " ".repeat(indent),
            dependent.short_name(),
            self.quoted_names(&foreign_key.properties),
            principal.short_name(),
            self.quoted_names(&principal_key.properties),
        )
    }

    pub fn entity_type_debug_string(
        &self,
        entity: &EntityType,
        options: DebugOptions,
        indent: usize,
    ) -> String {
        let mut out = " ".repeat(indent);
        let _ = write!(out, "EntityType: {}", entity.short_name());

        if let Some(base) = entity.base_type {
            let _ = write!(out, " Base: {}", self.entity_type(base).short_name());
        }

        if entity.is_temporal() {
            out.push_str(" Temporal");
        }

        if options.single_line {
            return out;
        }

        out.push('\n');
        out.push_str(&" ".repeat(indent + 2));
        out.push_str("Properties: ");
        for property in &entity.properties {
            out.push('\n');
            out.push_str(&self.property_debug_string(property.id, options, indent + 4));
        }

        if !entity.keys.is_empty() {
            out.push('\n');
            out.push_str(&" ".repeat(indent + 2));
            out.push_str("Keys: ");
            for key in &entity.keys {
                out.push('\n');
                out.push_str(&self.key_debug_string(key, options, indent + 4));
            }
        }

        if !entity.foreign_keys.is_empty() {
            out.push('\n');
            out.push_str(&" ".repeat(indent + 2));
            out.push_str("Foreign keys: ");
            for foreign_key in &entity.foreign_keys {
                out.push('\n');
                out.push_str(&self.foreign_key_debug_string(foreign_key, options, indent + 4));
            }
        }

        if !entity.indices.is_empty() {
            out.push('\n');
            out.push_str(&" ".repeat(indent + 2));
            out.push_str("Indexes: ");
            for index in &entity.indices {
                out.push('\n');
                out.push_str(&self.index_debug_string(index, options, indent + 4));
            }
        }

        if options.include_annotations {
            write_annotations(&mut out, &entity.annotations, indent + 2);
        }

        out
    }

    /// Renders every entity type, in declaration order.
    pub fn debug_string(&self, options: DebugOptions) -> String {
        let mut out = String::from("Model:");

        for entity in self.entity_types() {
            if options.single_line {
                out.push(' ');
                out.push_str(&self.entity_type_debug_string(entity, options, 0));
            } else {
                out.push('\n');
                out.push_str(&self.entity_type_debug_string(entity, options, 2));
            }
        }

        out
    }

    /// Computes the positional diagnostics of `property`.
    pub fn property_indexes(&self, property: impl Into<PropertyId>) -> PropertyIndexes {
        let id = property.into();
        let entity = self.entity_type(id.entity);

        let position = |matches: &dyn Fn(PropertyId) -> bool| {
            if !matches(id) {
                return None;
            }

            Some(
                entity.properties[..id.index]
                    .iter()
                    .filter(|property| matches(property.id))
                    .count(),
            )
        };

        PropertyIndexes {
            index: id.index,
            original_value: position(&|p| {
                self.is_key(p) || self.property(p).concurrency_token
            }),
            relationship: position(&|p| self.is_key(p) || self.is_foreign_key(p)),
            shadow: position(&|p| self.property(p).shadow),
            store_generation: position(&|p| {
                self.property(p).value_generated != ValueGenerated::Never
            }),
        }
    }

    fn write_property_list(&self, out: &mut String, entity: &EntityType, properties: &[PropertyId]) {
        for (i, property) in properties.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }

            let _ = write!(
                out,
                "{}.{}",
                entity.short_name(),
                self.property(*property).name
            );
        }
    }

    fn quoted_names(&self, properties: &[PropertyId]) -> String {
        let names: Vec<_> = properties
            .iter()
            .map(|property| format!("'{}'", self.property(*property).name))
            .collect();

        format!("{{{}}}", names.join(", "))
    }
}

fn write_annotations(out: &mut String, annotations: &Annotations, indent: usize) {
    if annotations.is_empty() {
        return;
    }

    let pad = " ".repeat(indent);
    let _ = write!(out, "\n{pad}Annotations: ");

    for (name, value) in annotations {
        let _ = write!(out, "\n{pad}  {name}: {value}");
    }
}
