use alertgraph_core::{
    Alert, AlertFilter, AlertGraphError, AlertId, AlertStatus, AlertStore, AlertWithOwner,
    Employee, EmployeeDirectory, EmployeeId, EmployeeSummary, Result,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Employees, the reverse reports-to index and alerts, keyed by id.
#[derive(Debug, Default, Clone)]
pub(crate) struct StoreData {
    employees: HashMap<EmployeeId, Employee>,
    reports: HashMap<EmployeeId, BTreeSet<EmployeeId>>,
    alerts: HashMap<AlertId, Alert>,
}

impl StoreData {
    pub(crate) fn contains_employee(&self, id: &str) -> bool {
        self.employees.contains_key(id)
    }

    /// Insert or replace an employee. A manager reference must resolve unless
    /// it points at the employee itself.
    pub(crate) fn insert_employee(&mut self, employee: Employee) -> Result<()> {
        if let Some(ref manager) = employee.reports_to {
            if manager != &employee.id && !self.employees.contains_key(manager) {
                return Err(AlertGraphError::EmployeeNotFound(manager.clone()));
            }
        }

        let previous_manager = self
            .employees
            .get(&employee.id)
            .and_then(|e| e.reports_to.clone());
        self.unlink(&employee.id, previous_manager.as_deref());
        if let Some(ref manager) = employee.reports_to {
            self.reports
                .entry(manager.clone())
                .or_default()
                .insert(employee.id.clone());
        }
        self.employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    pub(crate) fn set_manager(&mut self, id: &str, manager: Option<&str>) -> Result<()> {
        if let Some(manager) = manager {
            if !self.employees.contains_key(manager) {
                return Err(AlertGraphError::EmployeeNotFound(manager.to_string()));
            }
        }
        let employee = self
            .employees
            .get_mut(id)
            .ok_or_else(|| AlertGraphError::EmployeeNotFound(id.to_string()))?;
        let previous = std::mem::replace(&mut employee.reports_to, manager.map(str::to_string));

        self.unlink(id, previous.as_deref());
        if let Some(manager) = manager {
            self.reports
                .entry(manager.to_string())
                .or_default()
                .insert(id.to_string());
        }
        Ok(())
    }

    pub(crate) fn insert_alert(&mut self, alert: Alert) -> Result<()> {
        if !self.employees.contains_key(&alert.employee_id) {
            return Err(AlertGraphError::EmployeeNotFound(alert.employee_id.clone()));
        }
        self.alerts.insert(alert.id.clone(), alert);
        Ok(())
    }

    fn unlink(&mut self, id: &str, manager: Option<&str>) {
        if let Some(manager) = manager {
            if let Some(set) = self.reports.get_mut(manager) {
                set.remove(id);
                if set.is_empty() {
                    self.reports.remove(manager);
                }
            }
        }
    }

    fn with_owner(&self, alert: &Alert) -> Result<AlertWithOwner> {
        let owner = self.employees.get(&alert.employee_id).ok_or_else(|| {
            AlertGraphError::Storage(format!(
                "alert {} references missing employee {}",
                alert.id, alert.employee_id
            ))
        })?;
        Ok(AlertWithOwner {
            alert: alert.clone(),
            owner: owner.summary(),
        })
    }
}

/// In-process data store backing both [`EmployeeDirectory`] and
/// [`AlertStore`]. Every write happens under a single lock, so each status
/// update is atomic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<StoreData>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_employee(&self, employee: Employee) -> Result<()> {
        self.data.write().insert_employee(employee)
    }

    /// Point `id` at a new manager, or detach it with `None`. Cycles are
    /// accepted.
    pub fn set_manager(&self, id: &str, manager: Option<&str>) -> Result<()> {
        self.data.write().set_manager(id, manager)
    }

    /// Fails with `EmployeeNotFound` when the owner does not exist.
    pub fn insert_alert(&self, alert: Alert) -> Result<()> {
        self.data.write().insert_alert(alert)
    }

    pub fn clear(&self) {
        *self.data.write() = StoreData::default();
    }

    pub fn employee_count(&self) -> usize {
        self.data.read().employees.len()
    }

    pub fn alert_count(&self) -> usize {
        self.data.read().alerts.len()
    }

    pub(crate) fn replace(&self, data: StoreData) {
        *self.data.write() = data;
    }

    fn lookup_employee(&self, id: &str) -> Option<Employee> {
        self.data.read().employees.get(id).cloned()
    }

    fn lookup_reports(&self, id: &str) -> Vec<EmployeeId> {
        self.data
            .read()
            .reports
            .get(id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn summaries(&self) -> Vec<EmployeeSummary> {
        self.data
            .read()
            .employees
            .values()
            .map(Employee::summary)
            .collect()
    }

    fn matching_alerts(
        &self,
        employee_ids: &HashSet<EmployeeId>,
        filter: &AlertFilter,
    ) -> Result<Vec<AlertWithOwner>> {
        let data = self.data.read();
        let mut out = Vec::new();
        for alert in data.alerts.values() {
            if !employee_ids.contains(&alert.employee_id) {
                continue;
            }
            let row = data.with_owner(alert)?;
            if filter.matches(&row.alert, &row.owner.name) {
                out.push(row);
            }
        }
        Ok(out)
    }

    fn lookup_alert(&self, id: &str) -> Result<Option<AlertWithOwner>> {
        let data = self.data.read();
        data.alerts.get(id).map(|a| data.with_owner(a)).transpose()
    }

    fn write_status(&self, id: &str, status: AlertStatus) -> Result<Option<AlertWithOwner>> {
        let mut data = self.data.write();
        let Some(alert) = data.alerts.get_mut(id) else {
            return Ok(None);
        };
        alert.status = status;
        let alert = alert.clone();
        data.with_owner(&alert).map(Some)
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryStore {
    async fn get_employee(&self, id: &str) -> Result<Option<Employee>> {
        Ok(self.lookup_employee(id))
    }

    async fn direct_reports(&self, id: &str) -> Result<Vec<EmployeeId>> {
        Ok(self.lookup_reports(id))
    }

    async fn list_employees(&self) -> Result<Vec<EmployeeSummary>> {
        Ok(self.summaries())
    }
}

#[async_trait]
impl AlertStore for InMemoryStore {
    async fn query_alerts(
        &self,
        employee_ids: &HashSet<EmployeeId>,
        filter: &AlertFilter,
    ) -> Result<Vec<AlertWithOwner>> {
        self.matching_alerts(employee_ids, filter)
    }

    async fn get_alert(&self, id: &str) -> Result<Option<AlertWithOwner>> {
        self.lookup_alert(id)
    }

    async fn update_status(
        &self,
        id: &str,
        status: AlertStatus,
    ) -> Result<Option<AlertWithOwner>> {
        self.write_status(id, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alertgraph_core::Severity;
    use chrono::Utc;

    fn store_with_chain() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert_employee(Employee::new("E1", "Avery")).unwrap();
        store
            .insert_employee(Employee::new("E2", "Blake").reporting_to("E1"))
            .unwrap();
        store
            .insert_employee(Employee::new("E3", "Jordan").reporting_to("E1"))
            .unwrap();
        store
    }

    #[tokio::test]
    async fn direct_reports_come_from_the_reverse_index() {
        let store = store_with_chain();
        assert_eq!(store.direct_reports("E1").await.unwrap(), vec!["E2", "E3"]);
        assert!(store.direct_reports("E2").await.unwrap().is_empty());
        assert!(store.direct_reports("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reassigning_a_manager_moves_the_index_entry() {
        let store = store_with_chain();
        store.set_manager("E3", Some("E2")).unwrap();
        assert_eq!(store.direct_reports("E1").await.unwrap(), vec!["E2"]);
        assert_eq!(store.direct_reports("E2").await.unwrap(), vec!["E3"]);

        store.set_manager("E3", None).unwrap();
        assert!(store.direct_reports("E2").await.unwrap().is_empty());
    }

    #[test]
    fn cycles_are_accepted_but_dangling_managers_are_not() {
        let store = store_with_chain();
        store.set_manager("E1", Some("E2")).unwrap();
        let err = store.set_manager("E1", Some("E99")).unwrap_err();
        assert!(matches!(err, AlertGraphError::EmployeeNotFound(_)));
        let err = store
            .insert_employee(Employee::new("E4", "Casey").reporting_to("E99"))
            .unwrap_err();
        assert!(matches!(err, AlertGraphError::EmployeeNotFound(_)));
        store
            .insert_employee(Employee::new("E5", "Self").reporting_to("E5"))
            .unwrap();
    }

    #[test]
    fn alerts_require_an_existing_owner() {
        let store = store_with_chain();
        let err = store
            .insert_alert(Alert::new("A1", "E42", Severity::Low, "x", Utc::now()))
            .unwrap_err();
        assert!(matches!(err, AlertGraphError::EmployeeNotFound(ref id) if id == "E42"));
        assert_eq!(store.alert_count(), 0);
    }

    #[tokio::test]
    async fn query_joins_owner_and_applies_filter() {
        let store = store_with_chain();
        store
            .insert_alert(Alert::new("A1", "E2", Severity::Low, "x", Utc::now()))
            .unwrap();
        store
            .insert_alert(Alert::new("A2", "E3", Severity::High, "x", Utc::now()))
            .unwrap();
        store
            .insert_alert(Alert::new("A3", "E1", Severity::Low, "x", Utc::now()))
            .unwrap();

        let ids: HashSet<EmployeeId> = ["E2".to_string(), "E3".to_string()].into();
        let rows = store
            .query_alerts(&ids, &AlertFilter::default().with_severities([Severity::Low]))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].alert.id, "A1");
        assert_eq!(rows[0].owner.name, "Blake");
    }

    #[tokio::test]
    async fn update_status_reports_unknown_ids() {
        let store = store_with_chain();
        store
            .insert_alert(Alert::new("A1", "E2", Severity::Low, "x", Utc::now()))
            .unwrap();
        let row = store
            .update_status("A1", AlertStatus::Dismissed)
            .await
            .unwrap()
            .unwrap();
        assert!(row.alert.is_dismissed());
        assert!(store
            .update_status("A404", AlertStatus::Dismissed)
            .await
            .unwrap()
            .is_none());
    }

    #[test]
    fn clear_drops_everything() {
        let store = store_with_chain();
        store
            .insert_alert(Alert::new("A1", "E2", Severity::Low, "x", Utc::now()))
            .unwrap();
        store.clear();
        assert_eq!(store.employee_count(), 0);
        assert_eq!(store.alert_count(), 0);
    }
}
