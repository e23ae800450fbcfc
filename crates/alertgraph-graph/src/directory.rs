use alertgraph_core::{EmployeeDirectory, EmployeeSummary, Result};
use std::sync::Arc;

/// Lists every employee as a potential manager, ascending by id.
#[derive(Clone)]
pub struct DirectoryListing {
    directory: Arc<dyn EmployeeDirectory>,
}

impl DirectoryListing {
    pub fn new(directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { directory }
    }

    pub async fn list_all(&self) -> Result<Vec<EmployeeSummary>> {
        let mut employees = self.directory.list_employees().await?;
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(employees)
    }
}
