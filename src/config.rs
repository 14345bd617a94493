//! Benchmark suite configuration
//!
//! Every section carries reference defaults matching the shipped workload, so
//! an absent or partial YAML file still produces the canonical run. Loading is
//! optional: `BenchConfig::default()` is the full reference configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const KB: usize = 1024;
pub const MB: usize = KB * KB;

/// Canonical repetition unit: inner loop iterations per rep.
pub const REP: u64 = (KB * KB) as u64;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub logging: LoggingConfig,
    /// Workload scale factor. Accepted on the command line and recorded, but
    /// the reference workload ignores it.
    pub scale: f64,
    /// Inner iterations per repetition for the cpu and memory drivers.
    pub rep_unit: u64,
    pub cpu: CpuConfig,
    pub memory: MemoryConfig,
    pub dense: Vec<DenseStage>,
    pub sparse_mat_mat: Vec<SparseStage>,
    pub sparse_mat_vec: Vec<SparseStage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "tierbench.log".to_string(),
            use_json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuConfig {
    pub simple_reps: u64,
    pub hash_reps: u64,
    pub md5_reps: u64,
    pub md5_str_len: u64,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            simple_reps: 512,
            hash_reps: 128,
            md5_reps: 1,
            md5_str_len: 16,
        }
    }
}

/// One named memory benchmark: a list of power-of-two tier sizes in elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemLevel {
    pub name: String,
    pub tiers: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Backing buffer length in `i32` elements, shared by every level.
    pub backing_elems: usize,
    /// Keep the buffer contents between levels instead of reallocating.
    pub carry_over: bool,
    pub reps: u64,
    pub levels: Vec<MemLevel>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            backing_elems: 100 * MB,
            carry_over: true,
            reps: 32,
            levels: reference_mem_levels(),
        }
    }
}

fn reference_mem_levels() -> Vec<MemLevel> {
    vec![
        MemLevel {
            name: "mem_l1".to_string(),
            tiers: vec![4, 8, 16, 32, 64, 128, 256, 512, KB, 2 * KB],
        },
        MemLevel {
            name: "mem_l2".to_string(),
            tiers: vec![4 * KB, 8 * KB, 16 * KB, 32 * KB, 64 * KB, 128 * KB],
        },
        MemLevel {
            name: "mem_l3".to_string(),
            tiers: vec![256 * KB, 512 * KB, MB, 2 * MB, 4 * MB],
        },
        MemLevel {
            name: "mem_ll".to_string(),
            tiers: vec![8 * MB, 16 * MB, 32 * MB],
        },
    ]
}

/// One dense matmul stage: `size x size` matrices multiplied `reps` times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseStage {
    pub size: usize,
    pub reps: u64,
}

fn reference_dense_stages() -> Vec<DenseStage> {
    vec![
        DenseStage { size: 16, reps: 131_072 },
        DenseStage { size: 64, reps: 2048 },
        DenseStage { size: 128, reps: 256 },
        DenseStage { size: 512, reps: 4 },
    ]
}

/// One sparse stage: an `rows x cols` matrix populated to `nnz` entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparseStage {
    pub rows: usize,
    pub cols: usize,
    pub nnz: usize,
    pub reps: u64,
}

fn reference_mat_mat_stages() -> Vec<SparseStage> {
    vec![
        SparseStage { rows: 8, cols: 8, nnz: 16, reps: 262_144 },
        SparseStage { rows: 32, cols: 32, nnz: 64, reps: 4096 },
        SparseStage { rows: 128, cols: 128, nnz: 256, reps: 64 },
        SparseStage { rows: 512, cols: 512, nnz: 1024, reps: 1 },
    ]
}

fn reference_mat_vec_stages() -> Vec<SparseStage> {
    vec![
        SparseStage { rows: 8, cols: 8, nnz: 16, reps: 6_553_600 },
        SparseStage { rows: 32, cols: 32, nnz: 64, reps: 1_638_400 },
        SparseStage { rows: 128, cols: 128, nnz: 256, reps: 409_600 },
        SparseStage { rows: 8192, cols: 8192, nnz: 16384, reps: 6400 },
    ]
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            scale: 1.0,
            rep_unit: REP,
            cpu: CpuConfig::default(),
            memory: MemoryConfig::default(),
            dense: reference_dense_stages(),
            sparse_mat_mat: reference_mat_mat_stages(),
            sparse_mat_vec: reference_mat_vec_stages(),
        }
    }
}

impl BenchConfig {
    /// Load a YAML configuration file. Missing sections fall back to the
    /// reference defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config yaml: {}", path.display()))
    }

    /// Largest tier any memory level addresses, in elements.
    pub fn max_tier_elems(&self) -> usize {
        self.memory
            .levels
            .iter()
            .flat_map(|level| level.tiers.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_workload() {
        let cfg = BenchConfig::default();

        assert_eq!(cfg.rep_unit, 1024 * 1024);
        assert_eq!(cfg.cpu.simple_reps, 512);
        assert_eq!(cfg.cpu.hash_reps, 128);
        assert_eq!(cfg.cpu.md5_reps, 1);
        assert_eq!(cfg.cpu.md5_str_len, 16);

        assert_eq!(cfg.memory.backing_elems, 100 * 1024 * 1024);
        assert_eq!(cfg.memory.reps, 32);
        assert_eq!(cfg.memory.levels.len(), 4);
        assert_eq!(cfg.memory.levels[0].name, "mem_l1");
        assert_eq!(
            cfg.memory.levels[0].tiers,
            vec![4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048]
        );
        assert_eq!(
            cfg.memory.levels[3].tiers,
            vec![8 * 1024 * 1024, 16 * 1024 * 1024, 32 * 1024 * 1024]
        );

        assert_eq!(cfg.dense.len(), 4);
        assert_eq!(cfg.dense[0].size, 16);
        assert_eq!(cfg.dense[0].reps, 131_072);
        assert_eq!(cfg.dense[3].size, 512);
        assert_eq!(cfg.dense[3].reps, 4);

        assert_eq!(cfg.sparse_mat_mat[0].nnz, 16);
        assert_eq!(cfg.sparse_mat_mat[3].reps, 1);
        assert_eq!(cfg.sparse_mat_vec[3].rows, 8192);
        assert_eq!(cfg.sparse_mat_vec[3].reps, 6400);
    }

    #[test]
    fn test_max_tier_elems() {
        let cfg = BenchConfig::default();
        assert_eq!(cfg.max_tier_elems(), 32 * 1024 * 1024);
    }

    #[test]
    fn test_yaml_round_trip() {
        let cfg = BenchConfig::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: BenchConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.rep_unit, cfg.rep_unit);
        assert_eq!(parsed.memory.levels.len(), cfg.memory.levels.len());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "rep_unit: 64\nmemory:\n  reps: 2\n";
        let cfg: BenchConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(cfg.rep_unit, 64);
        assert_eq!(cfg.memory.reps, 2);
        // Untouched sections keep the reference values.
        assert_eq!(cfg.cpu.simple_reps, 512);
        assert_eq!(cfg.memory.levels.len(), 4);
        assert_eq!(cfg.dense.len(), 4);
    }
}
