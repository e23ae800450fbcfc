use crate::AlertGraphError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub type EmployeeId = String;
pub type AlertId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = AlertGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(AlertGraphError::InvalidArgument(format!(
                "invalid severity: {}",
                other
            ))),
        }
    }
}

/// Alert lifecycle. The only legal transition is `Open -> Dismissed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Open,
    Dismissed,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Open => "open",
            AlertStatus::Dismissed => "dismissed",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertStatus {
    type Err = AlertGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(AlertStatus::Open),
            "dismissed" => Ok(AlertStatus::Dismissed),
            other => Err(AlertGraphError::InvalidArgument(format!(
                "invalid status: {}",
                other
            ))),
        }
    }
}

/// Which subordinates an alert query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Immediate direct reports only.
    #[default]
    Direct,
    /// Every transitive report, cycle-safe.
    Subtree,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Direct => f.write_str("direct"),
            Scope::Subtree => f.write_str("subtree"),
        }
    }
}

impl FromStr for Scope {
    type Err = AlertGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(Scope::Direct),
            "subtree" => Ok(Scope::Subtree),
            _ => Err(AlertGraphError::InvalidArgument("invalid scope".to_string())),
        }
    }
}

/// An employee record. `reports_to` is a lookup key, never an owning link,
/// and may form a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub reports_to: Option<EmployeeId>,
}

impl Employee {
    pub fn new(id: impl Into<EmployeeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reports_to: None,
        }
    }

    pub fn reporting_to(mut self, manager: impl Into<EmployeeId>) -> Self {
        self.reports_to = Some(manager.into());
        self
    }

    pub fn summary(&self) -> EmployeeSummary {
        EmployeeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub employee_id: EmployeeId,
    pub severity: Severity,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub status: AlertStatus,
}

impl Alert {
    pub fn new(
        id: impl Into<AlertId>,
        employee_id: impl Into<EmployeeId>,
        severity: Severity,
        category: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            employee_id: employee_id.into(),
            severity,
            category: category.into(),
            created_at,
            status: AlertStatus::Open,
        }
    }

    pub fn with_status(mut self, status: AlertStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_dismissed(&self) -> bool {
        self.status == AlertStatus::Dismissed
    }
}

/// An alert joined with its owning employee, as returned by queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertWithOwner {
    pub alert: Alert,
    pub owner: EmployeeSummary,
}

impl AlertWithOwner {
    /// Newest first, then ascending id. Total over distinct ids.
    pub fn display_order(a: &Self, b: &Self) -> Ordering {
        b.alert
            .created_at
            .cmp(&a.alert.created_at)
            .then_with(|| a.alert.id.cmp(&b.alert.id))
    }
}
