use super::Temporal;
use crate::schema::EntityTypeId;

use std::{any::Any, fmt, sync::Arc};

/// One materialized row, owned by the provider and downcast by the caller.
pub type Row = Arc<dyn Any + Send + Sync>;

/// An executable query produced by a provider from a [`QueryRoot`](super::QueryRoot).
#[derive(Clone, PartialEq, Eq)]
pub struct Plan {
    /// Entity type the rows belong to
    pub entity: EntityTypeId,

    /// Table holding current rows
    pub table: String,

    /// History table consulted when the root is temporal
    pub history_table: Option<String>,

    /// Row versions to include
    pub temporal: Temporal,
}

impl Plan {
    /// True when rows are read from history as well as current state.
    pub fn reads_history(&self) -> bool {
        self.history_table.is_some() && self.temporal.is_temporal()
    }
}

impl fmt::Debug for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plan({} {:?}", self.table, self.entity)?;

        if self.temporal.is_temporal() {
            write!(f, " {}", self.temporal)?;
        }

        f.write_str(")")
    }
}
