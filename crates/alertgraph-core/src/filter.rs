use crate::{Alert, AlertStatus, Result, Severity};
use std::collections::HashSet;
use std::str::FromStr;

/// Optional restrictions applied to an alert query.
///
/// `None` on a dimension means "do not filter on it". `Some` of an empty set
/// is a real filter that matches nothing; the two are never conflated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub severities: Option<HashSet<Severity>>,
    pub statuses: Option<HashSet<AlertStatus>>,
    pub name_contains: Option<String>,
}

impl AlertFilter {
    /// Build a filter from raw query-string values.
    ///
    /// An absent or empty parameter leaves that dimension unrestricted. Lists
    /// are comma separated; items are trimmed and blank items dropped. Any
    /// unrecognised item rejects the whole request.
    pub fn from_params(
        severity: Option<&str>,
        status: Option<&str>,
        name: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            severities: parse_set::<Severity>(severity)?,
            statuses: parse_set::<AlertStatus>(status)?,
            name_contains: name
                .filter(|q| !q.is_empty())
                .map(|q| q.to_string()),
        })
    }

    pub fn with_severities(mut self, severities: impl IntoIterator<Item = Severity>) -> Self {
        self.severities = Some(severities.into_iter().collect());
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = AlertStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    pub fn with_name(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    /// Conjunction of every present dimension.
    pub fn matches(&self, alert: &Alert, owner_name: &str) -> bool {
        if let Some(ref severities) = self.severities {
            if !severities.contains(&alert.severity) {
                return false;
            }
        }
        if let Some(ref statuses) = self.statuses {
            if !statuses.contains(&alert.status) {
                return false;
            }
        }
        if let Some(ref needle) = self.name_contains {
            if !contains_ignore_case(owner_name, needle) {
                return false;
            }
        }
        true
    }
}

/// Split a comma separated parameter, trimming items and dropping blanks.
pub fn parse_list_param(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

fn parse_set<T>(raw: Option<&str>) -> Result<Option<HashSet<T>>>
where
    T: FromStr<Err = crate::AlertGraphError> + Eq + std::hash::Hash,
{
    match raw {
        None | Some("") => Ok(None),
        Some(value) => parse_list_param(value)
            .into_iter()
            .map(T::from_str)
            .collect::<Result<HashSet<T>>>()
            .map(Some),
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
