use crate::core::color::resolve_scheme;
use crate::core::dataset::{Column, ColumnAliases, Dataset};
use crate::core::projection::project;
use crate::core::query::{find_central_z, normalize_symbol, window_around};
use crate::domain::model::{Neighborhood, SchemeChoice};
use crate::domain::ports::{ConfigProvider, DataSource};
use crate::utils::error::{ExplorerError, LoadError, Result};
use crate::utils::validation::validate_range;

/// 原子序上限，半徑超過它沒有意義
pub const MAX_RADIUS: u32 = 118;

/// 查找 → 取視窗 → 投影，任何一步失敗就中止
pub fn neighborhood(
    dataset: &Dataset,
    symbol: &str,
    radius: u32,
    choice: SchemeChoice,
) -> Result<Neighborhood> {
    let scheme = resolve_scheme(choice, dataset)?;
    let central_z = find_central_z(dataset, symbol)?;
    let window = window_around(dataset, central_z, radius);
    let display = project(&window, scheme);

    tracing::debug!(
        "Window Z={}±{} holds {} nuclides ({} colors)",
        central_z,
        radius,
        window.len(),
        scheme
    );

    Ok(Neighborhood {
        symbol: normalize_symbol(symbol),
        central_z,
        radius,
        scheme,
        records: window.into_iter().cloned().collect(),
        display,
    })
}

/// 一個使用者工作階段：持有設定與目前載入的資料集
pub struct Explorer<C: ConfigProvider> {
    config: C,
    dataset: Option<Dataset>,
    radius_override: Option<u32>,
}

impl<C: ConfigProvider> Explorer<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            dataset: None,
            radius_override: None,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn radius(&self) -> u32 {
        self.radius_override.unwrap_or_else(|| self.config.radius())
    }

    pub fn set_radius(&mut self, radius: u32) -> Result<()> {
        validate_range("query.radius", radius, 0, MAX_RADIUS)?;
        self.radius_override = Some(radius);
        Ok(())
    }

    fn aliases(&self) -> ColumnAliases {
        let mut aliases = ColumnAliases::default();
        for (key, alias) in self.config.column_aliases() {
            match Column::from_key(&key) {
                Some(column) => aliases.add(column, &alias),
                None => tracing::warn!("Ignoring alias '{}' for unknown column '{}'", alias, key),
            }
        }
        aliases
    }

    /// 從設定的來源載入，整批取代現有資料集
    pub fn load(&mut self) -> Result<&Dataset> {
        let dataset = Dataset::load_with(self.config.source(), &self.aliases())?;
        Ok(&*self.dataset.insert(dataset))
    }

    /// 換一個來源重新載入（例如新上傳的檔案）
    pub fn reload(&mut self, source: DataSource) -> Result<&Dataset> {
        let dataset = Dataset::load_with(Some(&source), &self.aliases())?;
        Ok(&*self.dataset.insert(dataset))
    }

    pub fn query(&mut self, symbol: &str) -> Result<Neighborhood> {
        if self.dataset.is_none() {
            self.load()?;
        }
        let dataset = self
            .dataset
            .as_ref()
            .ok_or(ExplorerError::Load(LoadError::MissingSource))?;

        tracing::info!("🔎 Looking up '{}'", symbol.trim());
        let result = neighborhood(dataset, symbol, self.radius(), self.config.color_scheme())?;
        tracing::info!(
            "✅ {} (Z={}): {} nuclides within ±{}",
            result.symbol,
            result.central_z,
            result.records.len(),
            result.radius
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Color, ColorScheme};

    struct TestConfig {
        source: Option<DataSource>,
        radius: u32,
        scheme: SchemeChoice,
        aliases: Vec<(String, String)>,
    }

    impl ConfigProvider for TestConfig {
        fn source(&self) -> Option<&DataSource> {
            self.source.as_ref()
        }

        fn radius(&self) -> u32 {
            self.radius
        }

        fn color_scheme(&self) -> SchemeChoice {
            self.scheme
        }

        fn column_aliases(&self) -> Vec<(String, String)> {
            self.aliases.clone()
        }
    }

    const DECAY_TABLE: &str = "\
symbol,Z,A,name,decay,half_life
Fe,26,56,Iron-56,stable,
Co,27,60,Cobalt-60,Beta-,5.27 y
Mn,25,54,Manganese-54,beta+,312 d
U,92,238,Uranium-238,alpha,4.47e9 y
";

    fn config(source: Option<DataSource>) -> TestConfig {
        TestConfig {
            source,
            radius: 3,
            scheme: SchemeChoice::Auto,
            aliases: Vec::new(),
        }
    }

    #[test]
    fn test_query_loads_on_demand() {
        let source = DataSource::Stream(DECAY_TABLE.as_bytes().to_vec());
        let mut explorer = Explorer::new(config(Some(source)));
        assert!(explorer.dataset().is_none());

        let result = explorer.query("fe").unwrap();
        assert_eq!(result.central_z, 26);
        assert_eq!(result.scheme, ColorScheme::Decay);
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.display.len(), result.records.len());
        assert_eq!(result.display[1].color, Color::Red);
        assert!(explorer.dataset().is_some());
    }

    #[test]
    fn test_table_and_plot_views_match() {
        let source = DataSource::Stream(DECAY_TABLE.as_bytes().to_vec());
        let mut explorer = Explorer::new(config(Some(source)));
        let result = explorer.query("Co").unwrap();

        for (record, marker) in result.records.iter().zip(&result.display) {
            assert_eq!(record.atomic_number, marker.atomic_number);
            assert_eq!(record.mass_number, marker.mass_number);
            assert_eq!(record.symbol, marker.symbol);
        }
    }

    #[test]
    fn test_missing_source_short_circuits() {
        let mut explorer = Explorer::new(config(None));
        let err = explorer.query("Fe").unwrap_err();
        assert!(matches!(err, ExplorerError::Load(LoadError::MissingSource)));
    }

    #[test]
    fn test_not_found_is_recoverable() {
        let source = DataSource::Stream(DECAY_TABLE.as_bytes().to_vec());
        let mut explorer = Explorer::new(config(Some(source)));
        assert!(matches!(explorer.query("Xx"), Err(ExplorerError::NotFound(_))));
        assert!(explorer.query("U").is_ok());
    }

    #[test]
    fn test_reload_replaces_dataset() {
        let source = DataSource::Stream(DECAY_TABLE.as_bytes().to_vec());
        let mut explorer = Explorer::new(config(Some(source)));
        explorer.load().unwrap();
        assert_eq!(explorer.dataset().map(Dataset::len), Some(4));

        let other = "Z,A,Simbolo,Nombre,Estabilidad\n8,16,O,Oxigeno,Estable\n";
        explorer
            .reload(DataSource::Stream(other.as_bytes().to_vec()))
            .unwrap();
        assert_eq!(explorer.dataset().map(Dataset::len), Some(1));
        assert!(explorer.query("Fe").is_err());
        assert_eq!(explorer.query("o").unwrap().scheme, ColorScheme::Stability);
    }

    #[test]
    fn test_radius_override() {
        let source = DataSource::Stream(DECAY_TABLE.as_bytes().to_vec());
        let mut explorer = Explorer::new(config(Some(source)));
        explorer.set_radius(0).unwrap();
        assert_eq!(explorer.query("Fe").unwrap().records.len(), 1);
        assert!(explorer.set_radius(500).is_err());
        assert_eq!(explorer.radius(), 0);
    }

    #[test]
    fn test_configured_aliases_are_applied() {
        let table = "elemento,Z,A,Nombre,Estabilidad\nFe,26,56,Hierro,Estable\n";
        let mut cfg = config(Some(DataSource::Stream(table.as_bytes().to_vec())));
        cfg.aliases = vec![("symbol".to_string(), "elemento".to_string())];
        let mut explorer = Explorer::new(cfg);
        assert_eq!(explorer.query("fe").unwrap().central_z, 26);
    }

    #[test]
    fn test_explicit_decay_scheme_without_column() {
        let table = "Z,A,Simbolo,Nombre,Estabilidad\n26,56,Fe,Hierro,Estable\n";
        let mut cfg = config(Some(DataSource::Stream(table.as_bytes().to_vec())));
        cfg.scheme = SchemeChoice::Decay;
        let mut explorer = Explorer::new(cfg);
        assert!(matches!(
            explorer.query("Fe"),
            Err(ExplorerError::ConfigError { .. })
        ));
    }
}
