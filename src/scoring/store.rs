//! Record stores: blocking HTTP and in-memory.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, Response};
use rootlocus_types::GradeRecord;
use serde_json::{Map, Value};

use super::ScoringError;

/// Key-value store of grade records keyed by student identifier
pub trait RecordStore {
    /// Every stored entry. An empty store yields an empty map.
    fn fetch_all(&self) -> Result<Map<String, Value>, ScoringError>;

    /// Insert or replace the record of `record.student_id`
    fn upsert(&self, record: &GradeRecord) -> Result<(), ScoringError>;
}

/// Firebase-style REST store
#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: String,
    client: Client,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ScoringError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScoringError::Remote(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the whole mapping
    pub fn collection_url(&self) -> String {
        format!("{}.json", self.base_url)
    }

    /// URL of one record
    pub fn record_url(&self, student_id: &str) -> String {
        format!("{}/{}.json", self.base_url.trim_end_matches('/'), student_id)
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> ScoringError {
    if err.is_timeout() {
        ScoringError::Timeout(url.to_string())
    } else {
        ScoringError::Remote(err.to_string())
    }
}

fn check_status(url: &str, response: Response) -> Result<Response, ScoringError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ScoringError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

impl RecordStore for HttpStore {
    fn fetch_all(&self) -> Result<Map<String, Value>, ScoringError> {
        let url = self.collection_url();
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| transport_error(&url, e))?;
        let body: Value = check_status(&url, response)?
            .json()
            .map_err(|e| ScoringError::Malformed(e.to_string()))?;

        match body {
            Value::Null => Ok(Map::new()),
            Value::Object(map) => Ok(map),
            other => Err(ScoringError::Malformed(format!(
                "expected an object at {}, got {}",
                url, other
            ))),
        }
    }

    fn upsert(&self, record: &GradeRecord) -> Result<(), ScoringError> {
        let url = self.record_url(&record.student_id);
        debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .json(record)
            .send()
            .map_err(|e| transport_error(&url, e))?;
        check_status(&url, response)?;
        Ok(())
    }
}

/// In-process store for tests and offline sessions
#[derive(Debug)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, Value>>,
    online: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            online: AtomicBool::new(true),
        }
    }

    /// Store an arbitrary JSON value under `key`, bypassing record encoding
    pub fn insert_raw(&self, key: impl Into<String>, value: Value) {
        self.lock().insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// While offline every operation fails as a remote error
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Value>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_online(&self) -> Result<(), ScoringError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ScoringError::Remote("memory store is offline".to_string()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn fetch_all(&self) -> Result<Map<String, Value>, ScoringError> {
        self.ensure_online()?;
        Ok(self
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn upsert(&self, record: &GradeRecord) -> Result<(), ScoringError> {
        self.ensure_online()?;
        let value =
            serde_json::to_value(record).map_err(|e| ScoringError::Malformed(e.to_string()))?;
        self.lock().insert(record.student_id.clone(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, avg: f64) -> GradeRecord {
        GradeRecord {
            student_id: id.to_string(),
            kp_error: avg,
            ki_error: avg,
            kd_error: avg,
            avg_error: avg,
        }
    }

    #[test]
    fn test_urls() {
        let store = HttpStore::new("https://db.example.io/", Duration::from_secs(1)).unwrap();
        assert_eq!(store.collection_url(), "https://db.example.io/.json");
        assert_eq!(
            store.record_url("2206029123"),
            "https://db.example.io/2206029123.json"
        );

        let store = HttpStore::new("https://db.example.io/grades", Duration::from_secs(1)).unwrap();
        assert_eq!(store.collection_url(), "https://db.example.io/grades.json");
        assert_eq!(store.record_url("7"), "https://db.example.io/grades/7.json");
    }

    #[test]
    fn test_memory_store_last_write_wins() {
        let store = MemoryStore::new();
        store.upsert(&record("1", 3.0)).unwrap();
        store.upsert(&record("1", 1.5)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("1").unwrap()["Avg error"], json!(1.5));
    }

    #[test]
    fn test_memory_store_offline() {
        let store = MemoryStore::new();
        store.set_online(false);
        assert!(store.upsert(&record("1", 1.0)).unwrap_err().is_remote());
        assert!(store.fetch_all().unwrap_err().is_remote());
        assert!(store.is_empty());
    }
}
