use crate::core::dataset::Column;
use crate::core::export::OutputFormat;
use crate::domain::model::SchemeChoice;
use crate::utils::error::{ExplorerError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub query: Option<QueryConfig>,
    /// 邏輯欄位 -> 額外的標題別名
    pub columns: Option<BTreeMap<String, Vec<String>>>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub radius: Option<u32>,
    pub color_scheme: Option<SchemeChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Option<Vec<String>>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExplorerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ExplorerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NUCLIDE_TABLE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ExplorerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn source_path(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.path.as_deref())
    }

    pub fn radius(&self) -> Option<u32> {
        self.query.as_ref().and_then(|q| q.radius)
    }

    pub fn color_scheme(&self) -> Option<SchemeChoice> {
        self.query.as_ref().and_then(|q| q.color_scheme)
    }

    /// 攤平成 (欄位, 別名) 清單
    pub fn column_aliases(&self) -> Vec<(String, String)> {
        self.columns
            .iter()
            .flatten()
            .flat_map(|(key, aliases)| {
                aliases
                    .iter()
                    .map(move |alias| (key.clone(), alias.clone()))
            })
            .collect()
    }

    pub fn output_formats(&self) -> Result<Option<Vec<OutputFormat>>> {
        match self.output.as_ref().and_then(|o| o.formats.as_ref()) {
            Some(formats) => formats
                .iter()
                .map(|f| f.parse::<OutputFormat>())
                .collect::<Result<Vec<_>>>()
                .map(Some),
            None => Ok(None),
        }
    }

    /// 啟用壓縮時回傳 ZIP 檔名
    pub fn archive_name(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|o| o.compression.as_ref())
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_str())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = self.source_path() {
            validation::validate_path("source.path", path)?;
        }

        if let Some(radius) = self.radius() {
            validation::validate_range("query.radius", radius, 0, crate::core::explorer::MAX_RADIUS)?;
        }

        if let Some(columns) = &self.columns {
            let known: Vec<&str> = Column::ALL.iter().map(|c| c.key()).collect();
            for key in columns.keys() {
                validation::validate_one_of("columns", &key.trim().to_lowercase(), &known)?;
            }
        }

        if let Some(output) = &self.output {
            validation::validate_path("output.path", &output.path)?;
            self.output_formats()?;
            if let Some(compression) = &output.compression {
                if compression.enabled {
                    validation::validate_non_empty_string(
                        "output.compression.filename",
                        &compression.filename,
                    )?;
                }
            }
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
path = "tabla_nucleidos.csv"

[query]
radius = 5
color_scheme = "decay"

[columns]
symbol = ["Elemento"]
half_life = ["T12"]

[output]
path = "./out"
formats = ["csv", "json"]

[output.compression]
enabled = true
filename = "vecindario.zip"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source_path(), Some("tabla_nucleidos.csv"));
        assert_eq!(config.radius(), Some(5));
        assert_eq!(config.color_scheme(), Some(SchemeChoice::Decay));
        assert_eq!(config.archive_name(), Some("vecindario.zip"));
        assert_eq!(
            config.output_formats().unwrap(),
            Some(vec![OutputFormat::Csv, OutputFormat::Json])
        );

        let aliases = config.column_aliases();
        assert!(aliases.contains(&("symbol".to_string(), "Elemento".to_string())));
        assert!(aliases.contains(&("half_life".to_string(), "T12".to_string())));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.source_path().is_none());
        assert!(config.radius().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_NUCLIDE_TABLE", "/data/nucleidos.csv");

        let toml_content = r#"
[source]
path = "${TEST_NUCLIDE_TABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source_path(), Some("/data/nucleidos.csv"));

        std::env::remove_var("TEST_NUCLIDE_TABLE");
    }

    #[test]
    fn test_config_validation() {
        let bad_radius = TomlConfig::from_toml_str("[query]\nradius = 500\n").unwrap();
        assert!(bad_radius.validate().is_err());

        let bad_format =
            TomlConfig::from_toml_str("[output]\npath = \"out\"\nformats = [\"xml\"]\n").unwrap();
        assert!(bad_format.validate().is_err());

        let bad_column = TomlConfig::from_toml_str("[columns]\ncolor = [\"Color\"]\n").unwrap();
        assert!(bad_column.validate().is_err());
    }

    #[test]
    fn test_column_keys_are_case_insensitive() {
        let config =
            TomlConfig::from_toml_str("[columns]\nSymbol = [\"Elemento\"]\nZ = [\"Numero\"]\n")
                .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_scheme_fails_to_parse() {
        assert!(TomlConfig::from_toml_str("[query]\ncolor_scheme = \"rainbow\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[query]\nradius = 3\ncolor_scheme = \"stability\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.color_scheme(), Some(SchemeChoice::Stability));
    }
}
