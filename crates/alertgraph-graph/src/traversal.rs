use alertgraph_core::{EmployeeDirectory, EmployeeId, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Computes everyone who reports to a manager, directly or transitively.
///
/// The reports-to relation may contain cycles, so the walk is guarded by a
/// visited set: each employee is expanded at most once and the root is never
/// part of the result. The visited set lives for one call only.
#[derive(Clone)]
pub struct SubtreeResolver {
    directory: Arc<dyn EmployeeDirectory>,
}

impl SubtreeResolver {
    pub fn new(directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { directory }
    }

    /// Every employee reachable from `root` by following reports-to edges in
    /// reverse, excluding `root`. The caller must ensure `root` exists.
    pub async fn resolve(&self, root: &str) -> Result<HashSet<EmployeeId>> {
        let mut visited: HashSet<EmployeeId> = HashSet::new();
        visited.insert(root.to_string());

        let mut subtree = HashSet::new();
        let mut stack = self.directory.direct_reports(root).await?;
        let mut expanded = 0usize;

        while let Some(current) = stack.pop() {
            if visited.contains(&current) {
                continue;
            }
            visited.insert(current.clone());
            expanded += 1;

            for report in self.directory.direct_reports(&current).await? {
                if !visited.contains(&report) {
                    stack.push(report);
                }
            }
            subtree.insert(current);
        }

        debug!(root, expanded, size = subtree.len(), "resolved reporting subtree");
        Ok(subtree)
    }
}
