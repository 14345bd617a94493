//! ResultReport - ordered benchmark name -> measurement document
//!
//! The report grows monotonically while the suite runs and is serialized once
//! at the end: a single JSON map with the `version` string first, then one
//! entry per benchmark in insertion order.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Measurement record for one benchmark.
///
/// `duration` is wall-clock seconds for the whole timed region, `size` the
/// per-test unit count, `reps` the repetition count. Interpretation of `size`
/// varies per test (iteration unit, tier count, matrix dimension).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct BenchmarkResult {
    pub duration: f64,
    pub size: u64,
    pub reps: u64,
}

/// Ordered mapping from benchmark name to [`BenchmarkResult`].
#[derive(Debug, Clone)]
pub struct ResultReport {
    version: String,
    entries: Vec<(String, BenchmarkResult)>,
}

impl ResultReport {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            entries: Vec::new(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Append a benchmark result under `name`, preserving insertion order.
    pub fn insert(&mut self, name: impl Into<String>, result: BenchmarkResult) {
        self.entries.push((name.into(), result));
    }

    pub fn get(&self, name: &str) -> Option<&BenchmarkResult> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r)
    }

    /// Benchmark names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for ResultReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        map.serialize_entry("version", &self.version)?;
        for (name, result) in &self.entries {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(duration: f64) -> BenchmarkResult {
        BenchmarkResult {
            duration,
            size: 1024,
            reps: 32,
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut report = ResultReport::new("1.0.1");
        report.insert("cpu_simple", result(0.5));

        assert_eq!(report.len(), 1);
        assert_eq!(report.get("cpu_simple").unwrap().duration, 0.5);
        assert!(report.get("cpu_hash").is_none());
    }

    #[test]
    fn test_names_preserve_insertion_order() {
        let mut report = ResultReport::new("1.0.1");
        report.insert("mem_l1", result(0.1));
        report.insert("cpu_simple", result(0.2));
        report.insert("mmn_s1", result(0.3));

        let names: Vec<&str> = report.names().collect();
        assert_eq!(names, vec!["mem_l1", "cpu_simple", "mmn_s1"]);
    }

    #[test]
    fn test_json_has_version_first_and_ordered_entries() {
        let mut report = ResultReport::new("1.0.1");
        report.insert("mem_l1", result(0.1));
        report.insert("cpu_simple", result(0.2));

        let json = report.to_json_pretty().unwrap();
        let version_pos = json.find("\"version\"").unwrap();
        let mem_pos = json.find("\"mem_l1\"").unwrap();
        let cpu_pos = json.find("\"cpu_simple\"").unwrap();

        assert!(version_pos < mem_pos);
        assert!(mem_pos < cpu_pos);
    }

    #[test]
    fn test_result_fields_serialize_as_numbers() {
        let mut report = ResultReport::new("1.0.1");
        report.insert("cpu_simple", result(1.25));

        let value: serde_json::Value =
            serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        let entry = &value["cpu_simple"];

        assert!(entry["duration"].is_f64());
        assert!(entry["size"].is_u64());
        assert!(entry["reps"].is_u64());
        assert_eq!(value["version"], "1.0.1");
    }
}
