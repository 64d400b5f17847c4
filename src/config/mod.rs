pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::export::OutputFormat;
#[cfg(feature = "cli")]
use crate::domain::model::SchemeChoice;
#[cfg(feature = "cli")]
use crate::domain::ports::DataSource;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use settings::ExplorerConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "nuclide-explorer")]
#[command(about = "Look up an element and explore the nuclides around it")]
pub struct CliConfig {
    /// Nuclide table (CSV/TSV); use '-' to read it from stdin
    #[arg(short, long)]
    pub source: Option<String>,

    /// Element symbol to query; repeat for several. Without it an interactive prompt starts
    #[arg(short = 'y', long = "symbol")]
    pub symbols: Vec<String>,

    /// Z window radius around the element
    #[arg(short, long)]
    pub radius: Option<u32>,

    #[arg(long, value_enum)]
    pub scheme: Option<SchemeChoice>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory to export each neighborhood into
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub formats: Vec<String>,

    /// Bundle exported files into this ZIP archive
    #[arg(long)]
    pub zip: Option<String>,

    /// Print display records as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn reads_stdin(&self) -> bool {
        self.source.as_deref() == Some("-")
    }

    /// 命令列參數覆蓋設定檔
    pub fn apply_to(&self, settings: &mut ExplorerConfig) -> Result<()> {
        match self.source.as_deref() {
            Some("-") => {
                let mut bytes = Vec::new();
                std::io::Read::read_to_end(&mut std::io::stdin(), &mut bytes)?;
                settings.source = Some(DataSource::Stream(bytes));
            }
            Some(path) => settings.source = Some(DataSource::Path(path.into())),
            None => {}
        }

        if let Some(radius) = self.radius {
            settings.radius = radius;
        }
        if let Some(scheme) = self.scheme {
            settings.color_scheme = scheme;
        }
        if let Some(output) = &self.output {
            settings.output_path = Some(output.clone());
        }
        if !self.formats.is_empty() {
            settings.export.formats = self
                .formats
                .iter()
                .map(|f| f.parse::<OutputFormat>())
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(zip) = &self.zip {
            settings.export.archive = Some(zip.clone());
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_settings() {
        let cli = CliConfig::parse_from([
            "nuclide-explorer",
            "--source",
            "tabla.csv",
            "--symbol",
            "Fe",
            "--symbol",
            "u",
            "--radius",
            "5",
            "--scheme",
            "decay",
            "--formats",
            "csv,tsv",
        ]);
        assert_eq!(cli.symbols, vec!["Fe", "u"]);

        let mut settings = ExplorerConfig::default();
        cli.apply_to(&mut settings).unwrap();

        assert_eq!(settings.source, Some(DataSource::Path("tabla.csv".into())));
        assert_eq!(settings.radius, 5);
        assert_eq!(settings.color_scheme, SchemeChoice::Decay);
        assert_eq!(
            settings.export.formats,
            vec![OutputFormat::Csv, OutputFormat::Tsv]
        );
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let cli = CliConfig::parse_from(["nuclide-explorer", "--formats", "xml"]);
        let mut settings = ExplorerConfig::default();
        assert!(cli.apply_to(&mut settings).is_err());
    }
}
