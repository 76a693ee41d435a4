use super::{Capability, Plan, QueryRoot, Row};
use crate::Result;

use std::fmt::Debug;

/// Turns query roots into executable plans and runs them.
///
/// Implementations must handle every [`Temporal`](super::Temporal) variant
/// explicitly and fail on roots they cannot serve rather than falling back
/// to current-state reads.
pub trait Provider: Debug + Send + Sync + 'static {
    /// Describes the provider's capability, which informs query construction.
    fn capability(&self) -> &Capability;

    /// Build an executable plan for `root`.
    fn create_query(&self, root: &QueryRoot) -> Result<Plan>;

    /// Execute a plan previously returned by `create_query`.
    fn execute(&self, plan: &Plan) -> Result<Vec<Row>>;
}
