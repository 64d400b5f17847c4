use crate::core::dataset::Dataset;
use crate::domain::model::NuclideRecord;
use crate::utils::error::NotFound;

/// 原始版本固定使用 Z ± 3
pub const DEFAULT_RADIUS: u32 = 3;

/// 將元素符號轉成標準寫法：首字大寫、其餘小寫，例如 "fE" -> "Fe"
pub fn normalize_symbol(symbol: &str) -> String {
    let mut chars = symbol.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// 以符號找出中心 Z；重複符號時取第一筆
pub fn find_central_z(dataset: &Dataset, symbol: &str) -> Result<u32, NotFound> {
    let normalized = normalize_symbol(symbol);

    if !normalized.is_empty() {
        if let Some(record) = dataset.records().iter().find(|r| r.symbol == normalized) {
            tracing::debug!(
                "Resolved {} to Z={} (row {})",
                normalized,
                record.atomic_number,
                record.row
            );
            return Ok(record.atomic_number);
        }
    }

    Err(NotFound { symbol: normalized })
}

/// 回傳 Z 落在 [central_z - radius, central_z + radius] 的所有紀錄，維持資料集順序
pub fn window_around(dataset: &Dataset, central_z: u32, radius: u32) -> Vec<&NuclideRecord> {
    let low = central_z.saturating_sub(radius);
    let high = central_z.saturating_add(radius);

    dataset
        .records()
        .iter()
        .filter(|r| (low..=high).contains(&r.atomic_number))
        .collect()
}
