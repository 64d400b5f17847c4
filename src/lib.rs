pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, settings::ExplorerConfig, toml_config::TomlConfig};

pub use crate::core::{
    color::color_for,
    dataset::{Column, ColumnAliases, Dataset},
    explorer::{neighborhood, Explorer},
    export::{ExportOptions, Exporter, OutputFormat},
    projection::project,
    query::{find_central_z, normalize_symbol, window_around, DEFAULT_RADIUS},
};
pub use crate::domain::model::{
    Color, ColorScheme, DisplayRecord, Neighborhood, NuclideRecord, SchemeChoice,
};
pub use crate::domain::ports::{ConfigProvider, DataSource, Storage};
pub use crate::utils::error::{ExplorerError, LoadError, NotFound, Result};
