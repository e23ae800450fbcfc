use crate::{
    AlertFilter, AlertStatus, AlertWithOwner, Employee, EmployeeId, EmployeeSummary,
    Result,
};
use async_trait::async_trait;
use std::collections::HashSet;

/// Read access to employee records and the reports-to relation.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn get_employee(&self, id: &str) -> Result<Option<Employee>>;

    /// Employees whose manager is `id`. Unknown ids have no reports.
    async fn direct_reports(&self, id: &str) -> Result<Vec<EmployeeId>>;

    async fn list_employees(&self) -> Result<Vec<EmployeeSummary>>;
}

/// Access to alert records. Status is the only mutable field.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Alerts owned by any of `employee_ids` that satisfy `filter`, in no
    /// particular order.
    async fn query_alerts(
        &self,
        employee_ids: &HashSet<EmployeeId>,
        filter: &AlertFilter,
    ) -> Result<Vec<AlertWithOwner>>;

    async fn get_alert(&self, id: &str) -> Result<Option<AlertWithOwner>>;

    /// Atomically overwrite one alert's status. `None` if the id is unknown.
    async fn update_status(
        &self,
        id: &str,
        status: AlertStatus,
    ) -> Result<Option<AlertWithOwner>>;
}
