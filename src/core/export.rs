use crate::core::dataset::Dataset;
use crate::domain::model::{Neighborhood, NuclideRecord};
use crate::domain::ports::Storage;
use crate::utils::error::{ExplorerError, Result};
use csv::WriterBuilder;
use std::io::Write;
use std::str::FromStr;
use zip::write::{FileOptions, ZipWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["csv", "tsv", "json"];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(ExplorerError::InvalidConfigValueError {
                field: "output.formats".to_string(),
                value: other.to_string(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OutputFormat::NAMES.join(", ")
                ),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub formats: Vec<OutputFormat>,
    /// 設定時將所有輸出打包成單一 ZIP
    pub archive: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Csv, OutputFormat::Json],
            archive: None,
        }
    }
}

/// 把查詢視窗寫到儲存端
pub struct Exporter<S: Storage> {
    storage: S,
}

impl<S: Storage> Exporter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 回傳實際寫出的檔名（相對於儲存端根目錄）
    pub fn export(
        &self,
        dataset: &Dataset,
        neighborhood: &Neighborhood,
        options: &ExportOptions,
    ) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for format in &options.formats {
            let name = format!("neighborhood_{}.{}", neighborhood.symbol, format.extension());
            let data = match format {
                OutputFormat::Csv => to_delimited(dataset, &neighborhood.records, b',')?,
                OutputFormat::Tsv => to_delimited(dataset, &neighborhood.records, b'\t')?,
                OutputFormat::Json => serde_json::to_vec_pretty(neighborhood)?,
            };
            files.push((name, data));
        }

        match &options.archive {
            Some(archive) => {
                tracing::debug!("Creating ZIP file with {} files", files.len());
                let zip_data = build_archive(&files)?;
                self.storage.write_file(archive, &zip_data)?;
                tracing::info!("📦 Wrote {} ({} bytes)", archive, zip_data.len());
                Ok(vec![archive.clone()])
            }
            None => {
                let mut written = Vec::new();
                for (name, data) in files {
                    self.storage.write_file(&name, &data)?;
                    tracing::info!("💾 Wrote {} ({} bytes)", name, data.len());
                    written.push(name);
                }
                Ok(written)
            }
        }
    }
}

/// 以來源檔的標題與原始欄位值重新輸出，數值不經過轉換
pub fn to_delimited(dataset: &Dataset, records: &[NuclideRecord], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(dataset.headers())?;
    for record in records {
        let raw = dataset
            .raw_row(record)
            .ok_or_else(|| ExplorerError::ProcessingError {
                message: format!("row {} is not part of the loaded nuclide table", record.row),
            })?;
        writer.write_record(raw)?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

fn build_archive(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, data) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
