use anyhow::Result;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A submitted CI/CD run, cached under a TTL-bound key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub run_id: String,
    pub status: String,
    pub submitted_at: u64,
    pub payload: serde_json::Value,
}

impl RunRecord {
    pub fn new(run_id: String, payload: serde_json::Value) -> Self {
        let submitted_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            run_id,
            status: "queued".to_string(),
            submitted_at,
            payload,
        }
    }
}

/// Redis-backed run cache. Every entry expires after the configured
/// retention window; the rest of the server works without it.
#[derive(Clone)]
pub struct Storage {
    redis: ConnectionManager,
    ttl_seconds: u64,
}

impl Storage {
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> Result<Self> {
        let client = Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        Ok(Self { redis, ttl_seconds })
    }

    pub async fn ping(&self) -> bool {
        let mut conn = self.redis.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .is_ok()
    }

    pub async fn save_run(&self, run: &RunRecord) -> Result<()> {
        let mut conn = self.redis.clone();
        let key = run_key(&run.run_id);
        let value = serde_json::to_string(run)?;

        conn.set_ex::<_, _, ()>(&key, value, self.ttl_seconds)
            .await?;

        Ok(())
    }

    pub async fn get_run(&self, run_id: &str) -> Result<Option<RunRecord>> {
        let mut conn = self.redis.clone();
        let value: Option<String> = conn.get(run_key(run_id)).await?;

        match value {
            Some(json) => {
                let run = serde_json::from_str(&json)?;
                Ok(Some(run))
            }
            None => Ok(None),
        }
    }

    pub async fn list_runs(&self) -> Result<Vec<RunRecord>> {
        let mut conn = self.redis.clone();
        let mut cursor: u64 = 0;
        let mut results = Vec::new();
        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .cursor_arg(cursor)
                .arg("MATCH")
                .arg("cicd:run:*")
                .arg("COUNT")
                .arg(100u32)
                .query_async(&mut conn)
                .await?;
            cursor = next_cursor;
            if !keys.is_empty() {
                let values: Vec<Option<String>> =
                    redis::cmd("MGET").arg(keys).query_async(&mut conn).await?;
                for value in values.into_iter().flatten() {
                    if let Ok(run) = serde_json::from_str::<RunRecord>(&value) {
                        results.push(run);
                    }
                }
            }
            if cursor == 0 {
                break;
            }
        }
        Ok(results)
    }

    pub async fn delete_run(&self, run_id: &str) -> Result<()> {
        let mut conn = self.redis.clone();
        conn.del::<_, ()>(run_key(run_id)).await?;
        Ok(())
    }

    /// Remaining lifetime of a cached run, if the key still exists.
    pub async fn run_ttl(&self, run_id: &str) -> Result<Option<i64>> {
        let mut conn = self.redis.clone();
        let ttl: i64 = conn.ttl(run_key(run_id)).await?;
        if ttl < 0 {
            Ok(None)
        } else {
            Ok(Some(ttl))
        }
    }

    pub async fn save_product_status(
        &self,
        product_id: &str,
        status: &serde_json::Value,
    ) -> Result<()> {
        let mut conn = self.redis.clone();
        let value = serde_json::to_string(status)?;

        conn.set_ex::<_, _, ()>(product_key(product_id), value, self.ttl_seconds)
            .await?;

        Ok(())
    }

    pub async fn get_product_status(&self, product_id: &str) -> Result<Option<serde_json::Value>> {
        let mut conn = self.redis.clone();
        let value: Option<String> = conn.get(product_key(product_id)).await?;

        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

fn run_key(run_id: &str) -> String {
    format!("cicd:run:{}", run_id)
}

fn product_key(product_id: &str) -> String {
    format!("cicd:product:{}", product_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Exercises a real Redis when REDIS_URL is exported; no-op otherwise.
    #[test_deadline::deadline]
    async fn run_round_trip_with_ttl() {
        let Ok(redis_url) = std::env::var("REDIS_URL") else {
            return;
        };

        let storage = Storage::connect(&redis_url, 60).await.unwrap();
        let run = RunRecord::new(
            uuid::Uuid::new_v4().to_string(),
            json!({"project": "frontend", "branch": "main"}),
        );

        storage.save_run(&run).await.unwrap();

        let fetched = storage.get_run(&run.run_id).await.unwrap().unwrap();
        assert_eq!(fetched.run_id, run.run_id);
        assert_eq!(fetched.status, "queued");
        assert_eq!(fetched.payload, run.payload);

        let ttl = storage.run_ttl(&run.run_id).await.unwrap().unwrap();
        assert!(ttl > 0 && ttl <= 60);

        storage.delete_run(&run.run_id).await.unwrap();
        assert!(storage.get_run(&run.run_id).await.unwrap().is_none());
        assert!(storage.run_ttl(&run.run_id).await.unwrap().is_none());
    }

    #[test_deadline::deadline]
    fn run_record_starts_queued() {
        let run = RunRecord::new("abc".into(), json!({"x": 1}));
        assert_eq!(run.status, "queued");
        assert!(run.submitted_at > 0);
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["runId"], "abc");
        assert!(json["submittedAt"].is_u64());
    }
}
