use rand::Rng;
use serde::{Deserialize, Serialize};

/// Components whose pipeline status is reported over the channel.
pub const DEFAULT_CATALOG: [&str; 12] = [
    "Web Application",
    "Mobile App",
    "API Service",
    "Database",
    "Microservice A",
    "Microservice B",
    "Frontend Dashboard",
    "Backend API",
    "Authentication Service",
    "Payment Gateway",
    "Notification Service",
    "Analytics Engine",
];

/// Pipeline status of a single monitored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusValue {
    Pending,
    Running,
    Success,
    Failed,
    Cancelled,
}

impl StatusValue {
    pub const ALL: [StatusValue; 5] = [
        StatusValue::Pending,
        StatusValue::Running,
        StatusValue::Success,
        StatusValue::Failed,
        StatusValue::Cancelled,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStatus {
    pub name: String,
    pub status: StatusValue,
}

/// Messages pushed to status-channel clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    StatusUpdate { statuses: Vec<ProductStatus> },
}

/// Fixed catalog of monitored items; hands out one randomized snapshot
/// per call. The random source is supplied by the caller so tests can
/// seed it.
#[derive(Debug, Clone)]
pub struct StatusFeed {
    items: Vec<String>,
}

impl StatusFeed {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn with_default_catalog() -> Self {
        Self::new(DEFAULT_CATALOG.iter().map(|name| name.to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// One (item, status) pair per catalog entry, in catalog order, each
    /// status drawn independently and uniformly.
    pub fn snapshot(&self, rng: &mut impl Rng) -> Vec<ProductStatus> {
        self.items
            .iter()
            .map(|name| ProductStatus {
                name: name.clone(),
                status: StatusValue::ALL[rng.gen_range(0..StatusValue::ALL.len())],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test_deadline::deadline]
    fn snapshot_covers_catalog_in_order() {
        let feed = StatusFeed::new(vec!["A".into(), "B".into(), "C".into()]);
        let mut rng = StdRng::seed_from_u64(7);

        let snapshot = feed.snapshot(&mut rng);

        let names: Vec<&str> = snapshot.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        for entry in &snapshot {
            assert!(StatusValue::ALL.contains(&entry.status));
        }
    }

    #[test_deadline::deadline]
    fn snapshot_of_empty_catalog_is_empty() {
        let feed = StatusFeed::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(feed.snapshot(&mut rng).is_empty());
    }

    #[test_deadline::deadline]
    fn seeded_snapshots_are_reproducible() {
        let feed = StatusFeed::with_default_catalog();
        let mut first = StdRng::seed_from_u64(42);
        let mut second = StdRng::seed_from_u64(42);

        assert_eq!(feed.snapshot(&mut first), feed.snapshot(&mut second));
    }

    #[test_deadline::deadline]
    fn status_update_wire_shape() {
        let message = ServerMessage::StatusUpdate {
            statuses: vec![ProductStatus {
                name: "Database".into(),
                status: StatusValue::Running,
            }],
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "statusUpdate");
        assert_eq!(json["statuses"][0]["name"], "Database");
        assert_eq!(json["statuses"][0]["status"], "running");
    }

    #[test_deadline::deadline]
    fn status_values_serialize_lowercase() {
        let rendered: Vec<String> = StatusValue::ALL
            .iter()
            .map(|status| serde_json::to_string(status).unwrap())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "\"pending\"",
                "\"running\"",
                "\"success\"",
                "\"failed\"",
                "\"cancelled\"",
            ]
        );
    }
}
