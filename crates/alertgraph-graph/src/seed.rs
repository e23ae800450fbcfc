use crate::storage::StoreData;
use crate::InMemoryStore;
use alertgraph_core::{Alert, AlertStatus, Employee, EmployeeId, Result, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
    #[serde(default)]
    pub alerts: Vec<SeedAlert>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedEmployee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub reports_to: Option<EmployeeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAlert {
    pub id: String,
    pub employee_id: EmployeeId,
    pub severity: Severity,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub status: AlertStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub employees: usize,
    pub alerts: usize,
    pub dropped_managers: usize,
}

impl SeedData {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&raw)
    }
}

impl InMemoryStore {
    /// Replace the store's contents with `seed`.
    ///
    /// Employees go in first and manager links are wired in a second pass, so
    /// order in the document does not matter and cycles load fine. A link to
    /// an unknown manager is dropped. An alert whose owner is unknown aborts
    /// the load and leaves the previous contents untouched.
    pub fn load_seed(&self, seed: &SeedData) -> Result<SeedSummary> {
        let mut data = StoreData::default();
        let mut summary = SeedSummary::default();

        for e in &seed.employees {
            data.insert_employee(Employee::new(e.id.clone(), e.name.clone()))?;
        }
        summary.employees = seed.employees.len();

        for e in &seed.employees {
            let Some(ref manager) = e.reports_to else {
                continue;
            };
            if data.contains_employee(manager) {
                data.set_manager(&e.id, Some(manager.as_str()))?;
            } else {
                warn!(employee_id = %e.id, manager_id = %manager, "unknown manager, link dropped");
                summary.dropped_managers += 1;
            }
        }

        for a in &seed.alerts {
            data.insert_alert(
                Alert::new(
                    a.id.clone(),
                    a.employee_id.clone(),
                    a.severity,
                    a.category.clone(),
                    a.created_at,
                )
                .with_status(a.status),
            )?;
        }
        summary.alerts = seed.alerts.len();

        self.replace(data);
        info!(
            employees = summary.employees,
            alerts = summary.alerts,
            "seed data loaded"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alertgraph_core::{AlertGraphError, AlertStore, EmployeeDirectory};
    use std::io::Write;

    const SEED: &str = r#"{
        "employees": [
            {"id": "E8", "name": "Morgan", "reports_to": "E6"},
            {"id": "E6", "name": "Sam", "reports_to": "E7"},
            {"id": "E7", "name": "Jamie", "reports_to": "E8"},
            {"id": "E9", "name": "Riley", "reports_to": "E404"}
        ],
        "alerts": [
            {"id": "A8", "employee_id": "E6", "severity": "medium", "category": "engagement",
             "created_at": "2025-09-08T09:00:00Z", "status": "open"},
            {"id": "A10", "employee_id": "E8", "severity": "low", "category": "workload",
             "created_at": "2025-09-10T09:00:00Z", "status": "dismissed"}
        ]
    }"#;

    #[tokio::test]
    async fn loads_cyclic_hierarchy_in_any_order() {
        let store = InMemoryStore::new();
        let summary = store
            .load_seed(&SeedData::from_json(SEED).unwrap())
            .unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                employees: 4,
                alerts: 2,
                dropped_managers: 1
            }
        );

        assert_eq!(store.direct_reports("E7").await.unwrap(), vec!["E6"]);
        assert_eq!(store.direct_reports("E6").await.unwrap(), vec!["E8"]);
        let riley = store.get_employee("E9").await.unwrap().unwrap();
        assert!(riley.reports_to.is_none());

        let a10 = store.get_alert("A10").await.unwrap().unwrap();
        assert!(a10.alert.is_dismissed());
    }

    #[test]
    fn loading_replaces_previous_contents() {
        let store = InMemoryStore::new();
        store.insert_employee(Employee::new("OLD", "Old")).unwrap();
        store
            .load_seed(&SeedData::from_json(SEED).unwrap())
            .unwrap();
        assert_eq!(store.employee_count(), 4);
    }

    #[test]
    fn alert_for_unknown_employee_aborts_without_changes() {
        let store = InMemoryStore::new();
        store.insert_employee(Employee::new("KEEP", "Keep")).unwrap();
        let seed = SeedData::from_json(
            r#"{"employees": [{"id": "E1", "name": "A"}],
                "alerts": [{"id": "A1", "employee_id": "E2", "severity": "low",
                            "category": "x", "created_at": "2025-09-01T09:00:00Z",
                            "status": "open"}]}"#,
        )
        .unwrap();

        let err = store.load_seed(&seed).unwrap_err();
        assert!(matches!(err, AlertGraphError::EmployeeNotFound(ref id) if id == "E2"));
        assert_eq!(store.employee_count(), 1);
        assert_eq!(store.alert_count(), 0);
    }

    #[test]
    fn unknown_severity_is_a_parse_error() {
        let err = SeedData::from_json(
            r#"{"alerts": [{"id": "A1", "employee_id": "E1", "severity": "critical",
                            "category": "x", "created_at": "2025-09-01T09:00:00Z",
                            "status": "open"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AlertGraphError::Serialization(_)));
    }

    #[tokio::test]
    async fn reads_seed_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();

        let seed = SeedData::from_path(file.path()).await.unwrap();
        assert_eq!(seed.employees.len(), 4);
        assert_eq!(seed.alerts.len(), 2);

        let missing = SeedData::from_path("/definitely/not/here.json").await;
        assert!(matches!(missing, Err(AlertGraphError::Io(_))));
    }
}
