use crate::core::query::normalize_symbol;
use crate::domain::model::NuclideRecord;
use crate::domain::ports::DataSource;
use crate::utils::error::LoadError;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 資料集的邏輯欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Symbol,
    AtomicNumber,
    MassNumber,
    Name,
    Stability,
    Decay,
    HalfLife,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Symbol,
        Column::AtomicNumber,
        Column::MassNumber,
        Column::Name,
        Column::Stability,
        Column::Decay,
        Column::HalfLife,
    ];

    /// 設定檔 `[columns]` 使用的鍵名
    pub fn key(&self) -> &'static str {
        match self {
            Column::Symbol => "symbol",
            Column::AtomicNumber => "z",
            Column::MassNumber => "a",
            Column::Name => "name",
            Column::Stability => "stability",
            Column::Decay => "decay",
            Column::HalfLife => "half_life",
        }
    }

    pub fn from_key(key: &str) -> Option<Column> {
        let key = key.trim().to_lowercase();
        Column::ALL.into_iter().find(|c| c.key() == key)
    }

    fn label(&self) -> &'static str {
        match self {
            Column::Symbol => "symbol",
            Column::AtomicNumber => "Z",
            Column::MassNumber => "A",
            Column::Name => "name",
            Column::Stability => "stability",
            Column::Decay => "decay",
            Column::HalfLife => "half-life",
        }
    }

    fn default_aliases(&self) -> &'static [&'static str] {
        match self {
            Column::Symbol => &["Simbolo", "Símbolo", "symbol"],
            Column::AtomicNumber => &["Z", "atomic_number"],
            Column::MassNumber => &["A", "mass_number"],
            Column::Name => &["Nombre", "name"],
            Column::Stability => &["Estabilidad", "stability"],
            Column::Decay => &["Decaimiento", "decay", "decay_mode"],
            Column::HalfLife => &["Tiempo_decaimiento", "half_life", "halflife"],
        }
    }
}

/// 標題別名表，比對時忽略大小寫與前後空白
#[derive(Debug, Clone)]
pub struct ColumnAliases {
    aliases: HashMap<Column, Vec<String>>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        let aliases = Column::ALL
            .into_iter()
            .map(|column| {
                let names: Vec<String> = column
                    .default_aliases()
                    .iter()
                    .map(|name| name.to_lowercase())
                    .collect();
                (column, names)
            })
            .collect();
        Self { aliases }
    }
}

impl ColumnAliases {
    pub fn add(&mut self, column: Column, alias: &str) {
        let alias = alias.trim().to_lowercase();
        let names = self.aliases.entry(column).or_default();
        if !alias.is_empty() && !names.contains(&alias) {
            names.push(alias);
        }
    }

    pub fn with_alias(mut self, column: Column, alias: &str) -> Self {
        self.add(column, alias);
        self
    }

    fn position(&self, column: Column, headers: &StringRecord) -> Option<usize> {
        let names = self.aliases.get(&column)?;
        headers
            .iter()
            .position(|header| names.contains(&header.trim().to_lowercase()))
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    symbol: usize,
    atomic_number: usize,
    mass_number: usize,
    name: usize,
    stability: Option<usize>,
    decay: Option<usize>,
    half_life: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, aliases: &ColumnAliases) -> Result<Self, LoadError> {
        let find = |column| aliases.position(column, headers);
        let mut missing = Vec::new();

        let mut required = |column: Column| {
            let index = find(column);
            if index.is_none() {
                missing.push(column.label().to_string());
            }
            index
        };

        let symbol = required(Column::Symbol);
        let atomic_number = required(Column::AtomicNumber);
        let mass_number = required(Column::MassNumber);
        let name = required(Column::Name);

        let stability = find(Column::Stability);
        let decay = find(Column::Decay);
        if stability.is_none() && decay.is_none() {
            missing.push("stability or decay".to_string());
        }

        match (symbol, atomic_number, mass_number, name) {
            (Some(symbol), Some(atomic_number), Some(mass_number), Some(name))
                if missing.is_empty() =>
            {
                Ok(Self {
                    symbol,
                    atomic_number,
                    mass_number,
                    name,
                    stability,
                    decay,
                    half_life: find(Column::HalfLife),
                })
            }
            _ => Err(LoadError::MissingColumns { missing }),
        }
    }
}

/// 載入後不可變的核素表
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    records: Vec<NuclideRecord>,
    has_stability: bool,
    has_decay: bool,
}

impl Dataset {
    pub fn load(source: Option<&DataSource>) -> Result<Self, LoadError> {
        Self::load_with(source, &ColumnAliases::default())
    }

    pub fn load_with(
        source: Option<&DataSource>,
        aliases: &ColumnAliases,
    ) -> Result<Self, LoadError> {
        match source {
            None => Err(LoadError::MissingSource),
            Some(DataSource::Path(path)) => {
                tracing::debug!("Reading nuclide table from {}", path.display());
                let file = File::open(path)?;
                Self::parse(file, delimiter_for(path), aliases)
            }
            Some(DataSource::Stream(bytes)) => {
                tracing::debug!("Reading nuclide table from a {} byte stream", bytes.len());
                Self::parse(bytes.as_slice(), b',', aliases)
            }
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        Self::parse(reader, b',', &ColumnAliases::default())
    }

    pub fn from_reader_with<R: Read>(reader: R, aliases: &ColumnAliases) -> Result<Self, LoadError> {
        Self::parse(reader, b',', aliases)
    }

    fn parse<R: Read>(reader: R, delimiter: u8, aliases: &ColumnAliases) -> Result<Self, LoadError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let index = ColumnIndex::resolve(&headers, aliases)?;
        tracing::debug!("Resolved columns {:?} from header {:?}", index, headers);

        let mut rows = Vec::new();
        let mut records = Vec::new();

        for (i, result) in reader.records().enumerate() {
            let raw = result?;
            let row = i + 1;

            records.push(NuclideRecord {
                row,
                symbol: normalize_symbol(cell(&raw, index.symbol)),
                atomic_number: parse_count(&raw, index.atomic_number, row, "Z")?,
                mass_number: parse_count(&raw, index.mass_number, row, "A")?,
                name: cell(&raw, index.name).to_string(),
                stability: optional_cell(&raw, index.stability),
                decay_mode: optional_cell(&raw, index.decay),
                half_life: optional_cell(&raw, index.half_life),
            });
            rows.push(raw);
        }

        tracing::info!("📥 Loaded {} nuclides", records.len());

        Ok(Self {
            headers,
            rows,
            records,
            has_stability: index.stability.is_some(),
            has_decay: index.decay.is_some(),
        })
    }

    pub fn records(&self) -> &[NuclideRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// 取回該紀錄在來源檔中的原始欄位值
    pub fn raw_row(&self, record: &NuclideRecord) -> Option<&StringRecord> {
        record
            .row
            .checked_sub(1)
            .and_then(|index| self.rows.get(index))
    }

    pub fn has_stability_column(&self) -> bool {
        self.has_stability
    }

    pub fn has_decay_column(&self) -> bool {
        self.has_decay
    }
}

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// 解析時去掉前後空白；原始列保持不變
fn cell(raw: &StringRecord, index: usize) -> &str {
    raw.get(index).map(str::trim).unwrap_or("")
}

fn optional_cell(raw: &StringRecord, index: Option<usize>) -> Option<String> {
    index
        .map(|i| cell(raw, i))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_count(raw: &StringRecord, index: usize, row: usize, field: &str) -> Result<u32, LoadError> {
    let value = cell(raw, index);
    value.parse::<u32>().map_err(|_| LoadError::MalformedRow {
        row,
        field: field.to_string(),
        value: value.to_string(),
    })
}
