//! Engine configuration
//!
//! The discovery engine is driven by a small set of crawl budgets. They are
//! populated from CLI flags; defaults match the original tool's behaviour.

use crate::ScoutError;
use std::time::Duration;

/// Crawl budgets and timing for one discovery engine instance
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum link depth to follow from the start URL (0 = start page only)
    pub max_depth: u32,

    /// Maximum number of pages fetched per crawl session
    pub max_pages: u32,

    /// Timeout applied to each HTTP fetch
    pub timeout: Duration,

    /// Fixed delay between successive fetches within one session
    pub politeness_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_pages: 5,
            timeout: Duration::from_secs(10),
            politeness_delay: Duration::from_millis(500),
        }
    }
}

impl EngineConfig {
    /// Validates the configuration values
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Configuration is usable
    /// * `Err(ScoutError::Config)` - A budget is out of range
    pub fn validate(&self) -> Result<(), ScoutError> {
        if self.max_pages < 1 {
            return Err(ScoutError::Config(
                "max_pages must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ScoutError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budgets() {
        let config = EngineConfig::default();
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let config = EngineConfig {
            max_pages: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScoutError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = EngineConfig {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScoutError::Config(_))));
    }

    #[test]
    fn test_zero_depth_allowed() {
        let config = EngineConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
