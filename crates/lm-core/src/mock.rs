//! In-memory log source serving canned content, for tests and demos.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::{MergeError, MergeResult};
use crate::source::LogSource;

/// A mock log source that serves pre-loaded content by path.
pub struct MockLogSource {
    files: HashMap<String, Vec<u8>>,
}

impl MockLogSource {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    /// Add a file with the given content.
    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    /// Two services logging the same incident, including a stack trace and a
    /// quiet period of several minutes.
    pub fn with_service_pair() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/var/log/api-server.log",
            concat!(
                "2024-01-15 12:00:01,120 INFO  api: listening on :8080\n",
                "2024-01-15 12:00:05,004 INFO  api: GET /health 200\n",
                "2024-01-15 12:00:09,310 ERROR api: upstream call failed\n",
                "java.net.ConnectException: Connection refused\n",
                "    at com.example.Client.call(Client.java:42)\n",
                "    at com.example.Api.handle(Api.java:17)\n",
                "\n",
                "2024-01-15 12:04:30,000 INFO  api: GET /health 200\n",
            ),
        );
        m.add_file(
            "/var/log/worker.log",
            concat!(
                "worker boot banner v1.2\n",
                "2024-01-15 12:00:02,500 INFO  worker: polling queue\n",
                "2024-01-15 12:00:09,310 WARN  worker: job 17 retrying\n",
                "2024-01-15 12:00:12,000 INFO  worker: job 17 done\n",
            ),
        );
        m
    }

    /// One file with a one-minute gap in the middle.
    pub fn with_gap_sample() -> Self {
        let mut m = Self::new();
        let mut content = String::new();
        for i in 0..5 {
            content.push_str(&format!(
                "2023-01-01 10:00:{:02},000 [INFO] Normal log entry {}\n",
                i * 10,
                i + 1
            ));
        }
        content.push_str("2023-01-01 10:01:50,000 [WARN] This entry appears after a 1-minute gap\n");
        for i in 0..5 {
            content.push_str(&format!(
                "2023-01-01 10:02:{:02},000 [INFO] Post-gap entry {}\n",
                i * 10,
                i + 1
            ));
        }
        m.add_file("/var/log/time-gap.log", content);
        m
    }

    /// A file with no timestamps at all.
    pub fn with_untimed_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/var/log/no-timestamp.log",
            "This is a log without timestamp\nJust some random text\nNo time information here\n",
        );
        m
    }
}

impl Default for MockLogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSource for MockLogSource {
    async fn read_bytes(&self, path: &str) -> MergeResult<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| MergeError::NotFound(path.to_string()))
    }
}
