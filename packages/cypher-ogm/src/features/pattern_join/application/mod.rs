mod join;

pub use join::{JoinContext, JoinPlan, JoinSelectors, INNER_SLOT, OUTER_SLOT, RELATIONSHIP_SLOT};
