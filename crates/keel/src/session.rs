use crate::{query::Row, schema::EntityTypeId, Entity};

use std::{collections::HashSet, sync::Arc};

/// Entities attached by tracking queries, kept for later change detection.
#[derive(Debug, Default)]
pub struct Session {
    tracked: Vec<(EntityTypeId, Row)>,

    /// Addresses of the rows in `tracked`
    attached: HashSet<usize>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub(crate) fn attach(&mut self, entity: EntityTypeId, row: Row) {
        // The same row returned twice is tracked once
        if self.attached.insert(address(&row)) {
            self.tracked.push((entity, row));
        }
    }

    /// Number of tracked entities, of every type
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Tracked entities of type `E`, in attach order.
    pub fn tracked<E: Entity>(&self) -> impl Iterator<Item = Arc<E>> + '_ {
        self.tracked
            .iter()
            .filter_map(|(_, row)| row.clone().downcast::<E>().ok())
    }

    /// True if `entity` was attached by a tracking query.
    pub fn is_tracked<E: Entity>(&self, entity: &Arc<E>) -> bool {
        self.attached
            .contains(&(Arc::as_ptr(entity) as *const () as usize))
    }

    pub fn clear(&mut self) {
        self.tracked.clear();
        self.attached.clear();
    }
}

/// Rows stay alive while tracked, so their address cannot be reused.
fn address(row: &Row) -> usize {
    Arc::as_ptr(row) as *const () as usize
}
