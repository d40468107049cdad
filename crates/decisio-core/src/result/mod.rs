//! Decision result model
//!
//! Results are read-only once built. Accessors hand out references or
//! copies, never mutable views, so a result observed twice always looks the
//! same.

pub mod decision_result;
pub mod rule_result;
pub mod table_result;

pub use decision_result::DecisionResult;
pub use rule_result::RuleResult;
pub use table_result::{DecisionRuleResult, DecisionTableResult};
