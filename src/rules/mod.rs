mod store;

pub use store::{Rule, RuleStore};
