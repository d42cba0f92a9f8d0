//! Sample payloads served by the dashboard views. The frontend renders
//! these as-is; none of it is live data.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeData {
    pub title: &'static str,
    pub description: &'static str,
    pub stats: Vec<StatItem>,
    pub recent_activity: Vec<ActivityItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatItem {
    pub label: &'static str,
    pub value: u32,
    pub trend: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub action: &'static str,
    pub time: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CicdData {
    pub title: &'static str,
    pub description: &'static str,
    pub pipelines: Vec<Pipeline>,
    pub recent_deployments: Vec<Deployment>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: u32,
    pub name: &'static str,
    pub status: &'static str,
    pub duration: &'static str,
    pub last_run: &'static str,
    pub branch: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub environment: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub time: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerracesData {
    pub title: &'static str,
    pub description: &'static str,
    pub terraces: Vec<Terrace>,
    pub weather: WeatherInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Terrace {
    pub id: u32,
    pub name: &'static str,
    pub location: &'static str,
    pub status: &'static str,
    pub temperature: i32,
    pub humidity: u32,
    pub plants: u32,
    pub last_watered: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherInfo {
    pub current: &'static str,
    pub temperature: i32,
    pub humidity: u32,
    pub forecast: Vec<Forecast>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub day: &'static str,
    pub condition: &'static str,
    pub high: i32,
    pub low: i32,
}

pub fn home_data() -> HomeData {
    HomeData {
        title: "Welcome to Modern Web App",
        description: "This is the home dashboard with real-time data from the backend.",
        stats: vec![
            StatItem {
                label: "Total Users",
                value: 1250,
                trend: "+12%",
            },
            StatItem {
                label: "Active Sessions",
                value: 89,
                trend: "+5%",
            },
            StatItem {
                label: "Performance",
                value: 94,
                trend: "+2%",
            },
        ],
        recent_activity: vec![
            ActivityItem {
                action: "User login",
                time: "2 minutes ago",
                status: "success",
            },
            ActivityItem {
                action: "Data sync",
                time: "5 minutes ago",
                status: "success",
            },
            ActivityItem {
                action: "System update",
                time: "1 hour ago",
                status: "warning",
            },
            ActivityItem {
                action: "Backup completed",
                time: "2 hours ago",
                status: "success",
            },
        ],
    }
}

pub fn cicd_data() -> CicdData {
    CicdData {
        title: "CI/CD Pipeline",
        description: "Continuous Integration and Deployment dashboard with real-time status.",
        pipelines: vec![
            Pipeline {
                id: 1,
                name: "Frontend Build",
                status: "success",
                duration: "2m 34s",
                last_run: "5 minutes ago",
                branch: "main",
            },
            Pipeline {
                id: 2,
                name: "Backend Tests",
                status: "running",
                duration: "1m 12s",
                last_run: "Currently running",
                branch: "feature/auth",
            },
            Pipeline {
                id: 3,
                name: "Deployment",
                status: "failed",
                duration: "4m 56s",
                last_run: "1 hour ago",
                branch: "main",
            },
            Pipeline {
                id: 4,
                name: "Security Scan",
                status: "success",
                duration: "3m 21s",
                last_run: "30 minutes ago",
                branch: "main",
            },
        ],
        recent_deployments: vec![
            Deployment {
                environment: "Production",
                version: "v1.2.3",
                status: "success",
                time: "2 hours ago",
            },
            Deployment {
                environment: "Staging",
                version: "v1.2.4",
                status: "success",
                time: "1 hour ago",
            },
            Deployment {
                environment: "Development",
                version: "v1.2.5",
                status: "running",
                time: "30 minutes ago",
            },
            Deployment {
                environment: "Testing",
                version: "v1.2.6",
                status: "success",
                time: "15 minutes ago",
            },
        ],
    }
}

pub fn terraces_data() -> TerracesData {
    TerracesData {
        title: "Terraces Management",
        description: "Monitor and manage your terrace environments with real-time data.",
        terraces: vec![
            Terrace {
                id: 1,
                name: "Garden Terrace",
                location: "North Building",
                status: "active",
                temperature: 22,
                humidity: 65,
                plants: 12,
                last_watered: "2 hours ago",
            },
            Terrace {
                id: 2,
                name: "Rooftop Terrace",
                location: "Main Building",
                status: "maintenance",
                temperature: 25,
                humidity: 58,
                plants: 8,
                last_watered: "1 day ago",
            },
            Terrace {
                id: 3,
                name: "Balcony Garden",
                location: "East Wing",
                status: "active",
                temperature: 20,
                humidity: 70,
                plants: 15,
                last_watered: "3 hours ago",
            },
            Terrace {
                id: 4,
                name: "Greenhouse",
                location: "South Building",
                status: "active",
                temperature: 26,
                humidity: 75,
                plants: 25,
                last_watered: "1 hour ago",
            },
        ],
        weather: WeatherInfo {
            current: "Sunny",
            temperature: 24,
            humidity: 60,
            forecast: vec![
                Forecast {
                    day: "Today",
                    condition: "Sunny",
                    high: 26,
                    low: 18,
                },
                Forecast {
                    day: "Tomorrow",
                    condition: "Partly Cloudy",
                    high: 24,
                    low: 16,
                },
                Forecast {
                    day: "Wednesday",
                    condition: "Rainy",
                    high: 20,
                    low: 14,
                },
                Forecast {
                    day: "Thursday",
                    condition: "Cloudy",
                    high: 22,
                    low: 15,
                },
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_deadline::deadline]
    fn home_serializes_camel_case() {
        let json = serde_json::to_value(home_data()).unwrap();
        assert_eq!(json["stats"].as_array().unwrap().len(), 3);
        assert!(json["recentActivity"].is_array());
        assert_eq!(json["stats"][0]["label"], "Total Users");
    }

    #[test_deadline::deadline]
    fn cicd_lists_pipelines_and_deployments() {
        let json = serde_json::to_value(cicd_data()).unwrap();
        assert_eq!(json["pipelines"].as_array().unwrap().len(), 4);
        assert_eq!(json["recentDeployments"].as_array().unwrap().len(), 4);
        assert_eq!(json["pipelines"][1]["lastRun"], "Currently running");
    }

    #[test_deadline::deadline]
    fn terraces_include_weather_forecast() {
        let json = serde_json::to_value(terraces_data()).unwrap();
        assert_eq!(json["terraces"].as_array().unwrap().len(), 4);
        assert_eq!(json["weather"]["forecast"].as_array().unwrap().len(), 4);
        assert_eq!(json["terraces"][0]["lastWatered"], "2 hours ago");
    }
}
