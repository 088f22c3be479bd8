use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    currency::{CurrencyCode, CurrencyPalette},
    errors::{ReportError, Result},
    report::ContactStatus,
};

const DEFAULT_DIR_NAME: &str = ".donor_reports";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Report-wide settings handed explicitly to every aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default)]
    pub palette: CurrencyPalette,
    /// Status a contact must hold for pledge equivalents to be computed.
    #[serde(default = "ReportConfig::default_financial_status")]
    pub financial_partner_status: ContactStatus,
    /// Lower bound of the trailing in-hand window, in months.
    #[serde(default = "ReportConfig::default_min_in_hand_months")]
    pub min_in_hand_months: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            palette: CurrencyPalette::default(),
            financial_partner_status: Self::default_financial_status(),
            min_in_hand_months: Self::default_min_in_hand_months(),
        }
    }
}

impl ReportConfig {
    pub fn default_financial_status() -> ContactStatus {
        ContactStatus::PartnerFinancial
    }

    pub fn default_min_in_hand_months() -> u32 {
        4
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_in_hand_months == 0 {
            return Err(ReportError::Config(
                "min_in_hand_months must be at least 1".into(),
            ));
        }
        if self.palette.is_empty() {
            return Err(ReportError::Config("palette must not be empty".into()));
        }
        Ok(())
    }
}

/// Account-list preferences that feed goal resolution and chart scaling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccountConfig {
    pub currency: CurrencyCode,
    #[serde(default)]
    pub monthly_goal: Option<f64>,
    #[serde(default)]
    pub total_pledges: Option<f64>,
}

impl AccountConfig {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: CurrencyCode::new(currency),
            monthly_goal: None,
            total_pledges: None,
        }
    }
}

/// Returns the application data directory, defaulting to `~/.donor_reports`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("DONOR_REPORTS_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Persists [`ReportConfig`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<ReportConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no report config on disk, using defaults");
            return Ok(ReportConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: ReportConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &ReportConfig) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "report config saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
