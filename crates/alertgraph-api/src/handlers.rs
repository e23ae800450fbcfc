use crate::{ApiError, ApiResult, AppState};
use alertgraph_core::{
    AlertQueryRequest, AlertStatus, AlertWithOwner, EmployeeSummary, Severity,
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{Method, Uri},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct EmployeeDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub id: String,
    pub employee: EmployeeDto,
    pub severity: Severity,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub status: AlertStatus,
}

impl From<AlertWithOwner> for AlertResponse {
    fn from(row: AlertWithOwner) -> Self {
        Self {
            id: row.alert.id,
            employee: EmployeeDto {
                id: row.owner.id,
                name: row.owner.name,
            },
            severity: row.alert.severity,
            category: row.alert.category,
            created_at: row.alert.created_at,
            status: row.alert.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ManagerResponse {
    pub id: String,
    pub name: String,
}

impl From<EmployeeSummary> for ManagerResponse {
    fn from(employee: EmployeeSummary) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/alerts?manager_id=&scope=&severity=&status=&q=`
pub async fn list_alerts(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Vec<AlertResponse>>> {
    let Query(pairs) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = AlertQueryRequest::from_pairs(pairs);
    let rows = state.alerts.query(&request).await?;
    Ok(Json(rows.into_iter().map(AlertResponse::from).collect()))
}

/// `POST /api/alerts/{id}/dismiss`
pub async fn dismiss_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<String>,
) -> ApiResult<Json<AlertResponse>> {
    let row = state.dismissals.dismiss(&alert_id).await?;
    Ok(Json(row.into()))
}

/// `GET /api/managers`
pub async fn list_managers(State(state): State<AppState>) -> ApiResult<Json<Vec<ManagerResponse>>> {
    let employees = state.directory.list_all().await?;
    Ok(Json(employees.into_iter().map(ManagerResponse::from).collect()))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{} {}", method, uri.path()))
}
