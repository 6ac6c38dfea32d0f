//! Prediction model - response schema and cluster labels

use serde::Serialize;

/// Human-readable spending segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClusterLabel {
    Low,
    Medium,
    High,
    Unknown,
}

impl ClusterLabel {
    /// Total over all ids: anything outside the trained clusters is `Unknown`.
    pub fn from_id(cluster_id: i64) -> Self {
        match cluster_id {
            0 => ClusterLabel::Low,
            1 => ClusterLabel::Medium,
            2 => ClusterLabel::High,
            _ => ClusterLabel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterLabel::Low => "Low",
            ClusterLabel::Medium => "Medium",
            ClusterLabel::High => "High",
            ClusterLabel::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    #[serde(rename = "Customer")]
    pub customer: String,
    #[serde(rename = "Nama Kapal")]
    pub vessel_name: String,
    #[serde(rename = "KMeans_Label")]
    pub cluster_id: i64,
    #[serde(rename = "Prediksi")]
    pub label: ClusterLabel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_labels() {
        assert_eq!(ClusterLabel::from_id(0), ClusterLabel::Low);
        assert_eq!(ClusterLabel::from_id(1), ClusterLabel::Medium);
        assert_eq!(ClusterLabel::from_id(2), ClusterLabel::High);
    }

    #[test]
    fn test_unseen_ids_are_unknown() {
        for id in [-1, 3, 4, 42, i64::MIN, i64::MAX] {
            assert_eq!(ClusterLabel::from_id(id), ClusterLabel::Unknown);
        }
        assert_eq!(ClusterLabel::Unknown.as_str(), "Unknown");
    }

    #[test]
    fn test_response_wire_format() {
        let result = PredictionResult {
            customer: "Acme".to_string(),
            vessel_name: "MV Star".to_string(),
            cluster_id: 1,
            label: ClusterLabel::from_id(1),
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "Customer": "Acme",
                "Nama Kapal": "MV Star",
                "KMeans_Label": 1,
                "Prediksi": "Medium"
            })
        );
    }
}
