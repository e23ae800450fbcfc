use crate::{AlertFilter, AlertGraphError, EmployeeId, Result, Scope};

/// Alert query exactly as it arrives on the wire; nothing is validated yet.
#[derive(Debug, Clone, Default)]
pub struct AlertQueryRequest {
    pub manager_id: Option<String>,
    pub scope: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
}

/// A request that passed validation. The manager may still be unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertQuery {
    pub manager_id: EmployeeId,
    pub scope: Scope,
    pub filter: AlertFilter,
}

impl AlertQueryRequest {
    pub fn for_manager(manager_id: impl Into<String>) -> Self {
        Self {
            manager_id: Some(manager_id.into()),
            ..Self::default()
        }
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn name(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Fold raw query pairs into a request. A repeated key keeps its last
    /// value and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut request = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "manager_id" => &mut request.manager_id,
                "scope" => &mut request.scope,
                "severity" => &mut request.severity,
                "status" => &mut request.status,
                "q" => &mut request.q,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        request
    }

    /// Checks run in a fixed order: manager_id, scope, severity, status.
    pub fn validate(&self) -> Result<AlertQuery> {
        let manager_id = match self.manager_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(AlertGraphError::MissingParameter("manager_id".to_string())),
        };

        let scope = match self.scope.as_deref() {
            None => Scope::default(),
            Some(raw) => raw.parse::<Scope>()?,
        };

        let filter = AlertFilter::from_params(
            self.severity.as_deref(),
            self.status.as_deref(),
            self.q.as_deref(),
        )?;

        Ok(AlertQuery {
            manager_id,
            scope,
            filter,
        })
    }
}
