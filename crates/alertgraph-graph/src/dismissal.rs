use alertgraph_core::{AlertGraphError, AlertStatus, AlertStore, AlertWithOwner, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Moves alerts from open to dismissed. Repeating the call is a no-op.
#[derive(Clone)]
pub struct DismissalHandler {
    alerts: Arc<dyn AlertStore>,
}

impl DismissalHandler {
    pub fn new(alerts: Arc<dyn AlertStore>) -> Self {
        Self { alerts }
    }

    pub async fn dismiss(&self, alert_id: &str) -> Result<AlertWithOwner> {
        let current = self
            .alerts
            .get_alert(alert_id)
            .await?
            .ok_or_else(|| AlertGraphError::AlertNotFound(alert_id.to_string()))?;

        if current.alert.is_dismissed() {
            debug!(alert_id, "alert already dismissed");
            return Ok(current);
        }

        let updated = self
            .alerts
            .update_status(alert_id, AlertStatus::Dismissed)
            .await?
            .ok_or_else(|| AlertGraphError::AlertNotFound(alert_id.to_string()))?;
        info!(alert_id, employee_id = %updated.owner.id, "alert dismissed");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;
    use alertgraph_core::{Alert, Employee, Severity};
    use chrono::{TimeZone, Utc};

    fn fixture() -> Arc<InMemoryStore> {
        let store = InMemoryStore::new();
        store.insert_employee(Employee::new("E3", "Jordan")).unwrap();
        store
            .insert_alert(Alert::new(
                "A1",
                "E3",
                Severity::High,
                "retention",
                Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap(),
            ))
            .unwrap();
        Arc::new(store)
    }

    #[tokio::test]
    async fn dismiss_is_idempotent() {
        let handler = DismissalHandler::new(fixture());

        let first = handler.dismiss("A1").await.unwrap();
        assert_eq!(first.alert.status, AlertStatus::Dismissed);

        let second = handler.dismiss("A1").await.unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn only_status_changes() {
        let store = fixture();
        let before = store.get_alert("A1").await.unwrap().unwrap();
        let after = DismissalHandler::new(store).dismiss("A1").await.unwrap();
        assert_eq!(after.alert.created_at, before.alert.created_at);
        assert_eq!(after.alert.severity, before.alert.severity);
        assert_eq!(after.owner, before.owner);
    }

    #[tokio::test]
    async fn unknown_alert_is_not_found() {
        let err = DismissalHandler::new(fixture())
            .dismiss("A404")
            .await
            .unwrap_err();
        assert!(matches!(err, AlertGraphError::AlertNotFound(ref id) if id == "A404"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_dismissals_converge() {
        let store = fixture();
        let handler = DismissalHandler::new(store.clone());
        let tasks = (0..16).map(|_| {
            let handler = handler.clone();
            tokio::spawn(async move { handler.dismiss("A1").await })
        });

        for result in futures::future::join_all(tasks).await {
            let row = result.unwrap().unwrap();
            assert!(row.alert.is_dismissed());
        }
        let stored = store.get_alert("A1").await.unwrap().unwrap();
        assert!(stored.alert.is_dismissed());
    }
}
