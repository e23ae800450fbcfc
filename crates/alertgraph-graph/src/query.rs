use crate::SubtreeResolver;
use alertgraph_core::{
    AlertGraphError, AlertQuery, AlertQueryRequest, AlertStore, AlertWithOwner,
    EmployeeDirectory, EmployeeId, Result, Scope,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Answers "which alerts belong to this manager's people".
#[derive(Clone)]
pub struct AlertQueryService {
    directory: Arc<dyn EmployeeDirectory>,
    alerts: Arc<dyn AlertStore>,
    resolver: SubtreeResolver,
}

impl AlertQueryService {
    pub fn new(directory: Arc<dyn EmployeeDirectory>, alerts: Arc<dyn AlertStore>) -> Self {
        Self {
            resolver: SubtreeResolver::new(directory.clone()),
            directory,
            alerts,
        }
    }

    /// Validate a raw request, then run it.
    pub async fn query(&self, request: &AlertQueryRequest) -> Result<Vec<AlertWithOwner>> {
        let query = request.validate()?;
        self.run(&query).await
    }

    /// Alerts for the manager's direct reports or whole subtree, never the
    /// manager's own, newest first with ascending id on ties.
    pub async fn run(&self, query: &AlertQuery) -> Result<Vec<AlertWithOwner>> {
        if self.directory.get_employee(&query.manager_id).await?.is_none() {
            return Err(AlertGraphError::EmployeeNotFound(query.manager_id.clone()));
        }

        let employee_ids = self.employee_ids(&query.manager_id, query.scope).await?;
        let mut rows = self
            .alerts
            .query_alerts(&employee_ids, &query.filter)
            .await?;
        rows.sort_by(AlertWithOwner::display_order);

        debug!(
            manager_id = %query.manager_id,
            scope = %query.scope,
            employees = employee_ids.len(),
            alerts = rows.len(),
            "alert query complete"
        );
        Ok(rows)
    }

    async fn employee_ids(&self, manager_id: &str, scope: Scope) -> Result<HashSet<EmployeeId>> {
        let mut ids: HashSet<EmployeeId> = match scope {
            Scope::Direct => self
                .directory
                .direct_reports(manager_id)
                .await?
                .into_iter()
                .collect(),
            Scope::Subtree => self.resolver.resolve(manager_id).await?,
        };
        ids.remove(manager_id);
        Ok(ids)
    }
}
