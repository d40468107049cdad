//! Decision graph resolver
//!
//! Expands the "requires" edges of a decision into the order in which the
//! decisions of one call are evaluated.

use crate::error::{Result, RuntimeError};
use decisio_core::Decision;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Evaluation order for `root`.
///
/// Every decision reachable through requirements appears once, after all of
/// its own requirements, and `root` comes last. Decisions are identified by
/// key, so a requirement shared by several decisions is evaluated once.
pub fn resolve(root: &Arc<Decision>) -> Result<Vec<Arc<Decision>>> {
    let mut marks = HashMap::new();
    let mut order = Vec::new();
    visit(root, &mut marks, &mut order)?;
    Ok(order)
}

fn visit(
    decision: &Arc<Decision>,
    marks: &mut HashMap<String, Mark>,
    order: &mut Vec<Arc<Decision>>,
) -> Result<()> {
    match marks.get(&decision.key) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::InProgress) => {
            return Err(RuntimeError::CyclicDependency {
                key: decision.key.clone(),
            })
        }
        None => {}
    }

    marks.insert(decision.key.clone(), Mark::InProgress);
    for required in &decision.required_decisions {
        visit(required, marks, order)?;
    }
    marks.insert(decision.key.clone(), Mark::Done);
    order.push(decision.clone());
    Ok(())
}
