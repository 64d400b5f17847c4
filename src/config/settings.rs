use crate::config::toml_config::TomlConfig;
use crate::core::explorer::MAX_RADIUS;
use crate::core::export::ExportOptions;
use crate::core::query::DEFAULT_RADIUS;
use crate::domain::model::SchemeChoice;
use crate::domain::ports::{ConfigProvider, DataSource};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

/// 合併設定檔與命令列之後的最終設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    pub source: Option<DataSource>,
    pub radius: u32,
    pub color_scheme: SchemeChoice,
    pub column_aliases: Vec<(String, String)>,
    /// 未設定時不輸出檔案
    pub output_path: Option<String>,
    pub export: ExportOptions,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            source: None,
            radius: DEFAULT_RADIUS,
            color_scheme: SchemeChoice::default(),
            column_aliases: Vec::new(),
            output_path: None,
            export: ExportOptions::default(),
        }
    }
}

impl ExplorerConfig {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        let mut settings = Self {
            source: config.source_path().map(|p| DataSource::Path(p.into())),
            radius: config.radius().unwrap_or(DEFAULT_RADIUS),
            color_scheme: config.color_scheme().unwrap_or_default(),
            column_aliases: config.column_aliases(),
            output_path: config.output.as_ref().map(|o| o.path.clone()),
            export: ExportOptions::default(),
        };

        if let Some(formats) = config.output_formats()? {
            settings.export.formats = formats;
        }
        settings.export.archive = config.archive_name().map(str::to_string);

        Ok(settings)
    }
}

impl ConfigProvider for ExplorerConfig {
    fn source(&self) -> Option<&DataSource> {
        self.source.as_ref()
    }

    fn radius(&self) -> u32 {
        self.radius
    }

    fn color_scheme(&self) -> SchemeChoice {
        self.color_scheme
    }

    fn column_aliases(&self) -> Vec<(String, String)> {
        self.column_aliases.clone()
    }
}

impl Validate for ExplorerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("radius", self.radius, 0, MAX_RADIUS)?;

        if let Some(DataSource::Path(path)) = &self.source {
            let path = path.to_string_lossy();
            validation::validate_path("source", &path)?;
            validation::validate_file_extension("source", &path, &["csv", "tsv", "txt"])?;
        }

        // 調整過匯出選項卻沒有輸出目錄時，匯出永遠不會發生
        if self.export != ExportOptions::default() {
            validation::validate_required_field("output", &self.output_path)?;
        }

        if let Some(output) = &self.output_path {
            validation::validate_path("output", output)?;
        }

        if let Some(archive) = &self.export.archive {
            validation::validate_file_extension("zip", archive, &["zip"])?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::OutputFormat;
    use crate::utils::error::ExplorerError;

    #[test]
    fn test_defaults() {
        let config = ExplorerConfig::default();
        assert_eq!(config.radius, 3);
        assert_eq!(config.color_scheme, SchemeChoice::Auto);
        assert!(config.source.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let toml = TomlConfig::from_toml_str(
            r#"
[source]
path = "tabla_nucleidos.csv"

[query]
radius = 5

[output]
path = "out"
formats = ["tsv"]
"#,
        )
        .unwrap();

        let config = ExplorerConfig::from_toml(&toml).unwrap();
        assert_eq!(
            config.source,
            Some(DataSource::Path("tabla_nucleidos.csv".into()))
        );
        assert_eq!(config.radius, 5);
        assert_eq!(config.output_path.as_deref(), Some("out"));
        assert_eq!(config.export.formats, vec![OutputFormat::Tsv]);
        assert_eq!(config.export.archive, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_unsupported_source_extension() {
        let config = ExplorerConfig {
            source: Some(DataSource::Path("tabla.xlsx".into())),
            ..ExplorerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_options_require_output() {
        let zipped = ExplorerConfig {
            export: ExportOptions {
                archive: Some("fe.zip".to_string()),
                ..ExportOptions::default()
            },
            ..ExplorerConfig::default()
        };
        match zipped.validate() {
            Err(ExplorerError::MissingConfigError { field }) => assert_eq!(field, "output"),
            other => panic!("expected missing output, got {:?}", other),
        }

        let tsv_only = ExplorerConfig {
            export: ExportOptions {
                formats: vec![OutputFormat::Tsv],
                archive: None,
            },
            ..ExplorerConfig::default()
        };
        assert!(tsv_only.validate().is_err());

        let with_output = ExplorerConfig {
            output_path: Some("out".to_string()),
            ..zipped
        };
        assert!(with_output.validate().is_ok());
    }

    #[test]
    fn test_stream_source_skips_path_checks() {
        let config = ExplorerConfig {
            source: Some(DataSource::Stream(b"Z,A\n".to_vec())),
            ..ExplorerConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
