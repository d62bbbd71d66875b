use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Delay between producer reads, load shaping only. Zero disables.
    #[serde(default = "default_read_delay_ms")]
    pub read_delay_ms: u64,

    /// Delay after each persisted reading, load shaping only. Zero disables.
    #[serde(default = "default_drain_delay_ms")]
    pub drain_delay_ms: u64,

    #[serde(default)]
    pub append: bool,
}

fn default_workers() -> usize {
    2
}

fn default_read_delay_ms() -> u64 {
    10
}

fn default_drain_delay_ms() -> u64 {
    25
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            workers: default_workers(),
            read_delay_ms: default_read_delay_ms(),
            drain_delay_ms: default_drain_delay_ms(),
            append: false,
        }
    }
}

impl PipelineConfig {
    pub fn read_delay(&self) -> Duration {
        Duration::from_millis(self.read_delay_ms)
    }

    pub fn drain_delay(&self) -> Duration {
        Duration::from_millis(self.drain_delay_ms)
    }
}

impl Config {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.pipeline.workers, 2);
        assert_eq!(config.pipeline.read_delay_ms, 10);
        assert_eq!(config.pipeline.drain_delay_ms, 25);
        assert!(!config.pipeline.append);
    }

    #[test]
    fn test_partial_override() {
        let config: Config = toml::from_str(
            r#"
[pipeline]
workers = 4
drain_delay_ms = 0
"#,
        )
        .unwrap();
        assert_eq!(config.pipeline.workers, 4);
        assert_eq!(config.pipeline.read_delay_ms, 10);
        assert_eq!(config.pipeline.drain_delay(), Duration::ZERO);
    }
}
