//! Hub endpoints exported by a run.

use serde::Serialize;

/// Path segment → short label for every exported data category.
const DEFAULT_ENDPOINTS: [(&str, &str); 6] = [
    ("activity/backup/hr", "hr"),
    ("activity/backup/stress", "stress"),
    ("activity/backup/sleep", "sleep"),
    ("activity/backup/spo2", "spo2"),
    ("activity/backup/steps", "steps"),
    ("sports/backup", "sports"),
];

/// One remote read endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointSpec {
    /// Path relative to the hub base URL, e.g. `activity/backup/hr`
    pub path: String,
    /// Short label, e.g. `hr`
    pub label: String,
}

impl EndpointSpec {
    pub fn new(path: &str, label: &str) -> Self {
        Self {
            path: path.to_string(),
            label: label.to_string(),
        }
    }

    /// The six wearable data categories, in export order.
    pub fn defaults() -> Vec<Self> {
        DEFAULT_ENDPOINTS
            .iter()
            .map(|(path, label)| Self::new(path, label))
            .collect()
    }

    /// Output file prefix: the path with `/` replaced by `_`.
    pub fn file_stem(&self) -> String {
        self.path.replace('/', "_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_order_and_labels() {
        let endpoints = EndpointSpec::defaults();
        let labels: Vec<&str> = endpoints.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["hr", "stress", "sleep", "spo2", "steps", "sports"]);
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(
            EndpointSpec::new("activity/backup/hr", "hr").file_stem(),
            "activity_backup_hr"
        );
        assert_eq!(
            EndpointSpec::new("sports/backup", "sports").file_stem(),
            "sports_backup"
        );
    }
}
