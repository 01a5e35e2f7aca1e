use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::common::cycle_error::{CycleError, CycleResult, ErrCode};

pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_OVERBOUGHT: f64 = 70.0;
pub const DEFAULT_OVERSOLD: f64 = 30.0;

/// RSI cycle analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleConfig {
    /// RSI lookback, in bars
    pub rsi_period: usize,
    /// Crossing up through this level opens an overbought cycle
    pub overbought: f64,
    /// Crossing down through this level opens an oversold cycle
    pub oversold: f64,
    /// Widen a bar's high/low to cover open/close instead of rejecting it
    pub autofix: bool,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_RSI_PERIOD,
            overbought: DEFAULT_OVERBOUGHT,
            oversold: DEFAULT_OVERSOLD,
            autofix: false,
        }
    }
}

impl CycleConfig {
    /// Build from a loose key/value map; missing keys take defaults,
    /// unknown keys are rejected.
    pub fn new(conf: Option<HashMap<String, serde_json::Value>>) -> CycleResult<Self> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());
        let default = Self::default();

        let config = Self {
            rsi_period: conf.get("rsi_period")?.unwrap_or(default.rsi_period),
            overbought: conf.get("overbought")?.unwrap_or(default.overbought),
            oversold: conf.get("oversold")?.unwrap_or(default.oversold),
            autofix: conf.get("autofix")?.unwrap_or(default.autofix),
        };

        conf.check()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> CycleResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CycleError::new(
                format!("cannot read config {}: {}", path.display(), e),
                ErrCode::ConfigError,
            )
        })?;
        let map: HashMap<String, serde_json::Value> = serde_json::from_str(&text).map_err(|e| {
            CycleError::new(
                format!("config {} is not a JSON object: {}", path.display(), e),
                ErrCode::ConfigError,
            )
        })?;
        Self::new(Some(map))
    }

    pub fn with_period(mut self, rsi_period: usize) -> Self {
        self.rsi_period = rsi_period;
        self
    }

    pub fn with_thresholds(mut self, overbought: f64, oversold: f64) -> Self {
        self.overbought = overbought;
        self.oversold = oversold;
        self
    }

    pub fn validate(&self) -> CycleResult<()> {
        if self.rsi_period == 0 {
            return Err(CycleError::para("rsi_period must be > 0"));
        }
        check_thresholds(self.overbought, self.oversold)
    }
}

/// Threshold sanity shared by the config and the cross detector
pub fn check_thresholds(overbought: f64, oversold: f64) -> CycleResult<()> {
    if !overbought.is_finite() || !oversold.is_finite() {
        return Err(CycleError::para(format!(
            "thresholds must be finite, got overbought={} oversold={}",
            overbought, oversold
        )));
    }
    if overbought <= oversold {
        return Err(CycleError::para(format!(
            "overbought={} must be greater than oversold={}",
            overbought, oversold
        )));
    }
    Ok(())
}

/// Key/value map that remembers which keys were consumed
struct ConfigWithCheck {
    conf: HashMap<String, serde_json::Value>,
}

impl ConfigWithCheck {
    fn new(conf: HashMap<String, serde_json::Value>) -> Self {
        Self { conf }
    }

    fn get<T: DeserializeOwned>(&mut self, key: &str) -> CycleResult<Option<T>> {
        match self.conf.remove(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(v) => serde_json::from_value(v.clone()).map(Some).map_err(|e| {
                CycleError::new(format!("bad value for {}: {} ({})", key, v, e), ErrCode::ConfigError)
            }),
        }
    }

    fn check(&self) -> CycleResult<()> {
        let mut unknown: Vec<&String> = self.conf.keys().collect();
        unknown.sort();
        match unknown.first() {
            Some(k) => Err(CycleError::para(format!("unknown para = {}", k))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conf(v: serde_json::Value) -> Option<HashMap<String, serde_json::Value>> {
        Some(serde_json::from_value(v).unwrap())
    }

    #[test]
    fn test_defaults() {
        let c = CycleConfig::new(None).unwrap();
        assert_eq!(c, CycleConfig::default());
        assert_eq!(c.rsi_period, 14);
        assert_eq!(c.overbought, 70.0);
        assert_eq!(c.oversold, 30.0);
        assert!(!c.autofix);
    }

    #[test]
    fn test_partial_override() {
        let c = CycleConfig::new(conf(json!({"rsi_period": 7, "overbought": 80}))).unwrap();
        assert_eq!(c.rsi_period, 7);
        assert_eq!(c.overbought, 80.0);
        assert_eq!(c.oversold, 30.0);
    }

    #[test]
    fn test_unknown_key() {
        let err = CycleConfig::new(conf(json!({"rsi_cycle": 7}))).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ParaError);
        assert!(err.msg.contains("rsi_cycle"));
    }

    #[test]
    fn test_bad_type() {
        let err = CycleConfig::new(conf(json!({"rsi_period": "fourteen"}))).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ConfigError);
    }

    #[test]
    fn test_inverted_thresholds() {
        let err = CycleConfig::new(conf(json!({"overbought": 30, "oversold": 70}))).unwrap_err();
        assert!(err.is_para_err());
        assert!(CycleConfig::default().with_thresholds(50.0, 50.0).validate().is_err());
    }

    #[test]
    fn test_zero_period() {
        assert!(CycleConfig::default().with_period(0).validate().unwrap_err().is_para_err());
    }

    #[test]
    fn test_nan_threshold() {
        assert!(check_thresholds(f64::NAN, 30.0).is_err());
    }
}
