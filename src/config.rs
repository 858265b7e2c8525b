//! Serialisable description of a [`Reducer`](crate::Reducer).
//!
//! The crate reads no files or environment variables itself; embed a
//! `ReduceConfig` in your own configuration and hand it to
//! [`Reducer::new`](crate::Reducer::new).

use serde::{Deserialize, Serialize};

/// Smallest chunk the parallel path will create unless the whole input is
/// smaller.
pub const DEFAULT_MIN_CHUNK_LEN: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReduceConfig {
    /// Run chunks on worker threads. `false` folds on the calling thread.
    pub parallel: bool,
    /// Size of a dedicated worker pool. `None` uses rayon's global pool.
    pub threads: Option<usize>,
    /// Number of chunks to aim for. `None` uses the available hardware
    /// concurrency.
    pub partitions: Option<usize>,
    pub min_chunk_len: usize,
    /// Merge partials in rounds of at most this many. `None` folds them all
    /// on the joining thread.
    pub fanout: Option<usize>,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            partitions: None,
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
            fanout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() -> anyhow::Result<()> {
        let cfg: ReduceConfig = serde_json::from_str(r#"{ "partitions": 4 }"#)?;
        assert_eq!(
            cfg,
            ReduceConfig {
                partitions: Some(4),
                ..ReduceConfig::default()
            }
        );
        Ok(())
    }

    #[test]
    fn sequential_config_round_trips() -> anyhow::Result<()> {
        let cfg = ReduceConfig {
            parallel: false,
            fanout: Some(4),
            ..ReduceConfig::default()
        };
        let text = serde_json::to_string(&cfg)?;
        let back: ReduceConfig = serde_json::from_str(&text)?;
        assert_eq!(back, cfg);
        Ok(())
    }
}
