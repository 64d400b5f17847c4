use crate::core::color::{record_color, tag_of};
use crate::domain::model::{ColorScheme, DisplayRecord, NuclideRecord};

/// 將視窗內的紀錄轉成繪圖用的標記，不修改來源資料
pub fn project(window: &[&NuclideRecord], scheme: ColorScheme) -> Vec<DisplayRecord> {
    window
        .iter()
        .map(|record| DisplayRecord {
            mass_number: record.mass_number,
            atomic_number: record.atomic_number,
            symbol: record.symbol.clone(),
            label: label_for(record),
            color: record_color(scheme, record),
            hover: hover_for(record, scheme),
        })
        .collect()
}

pub fn label_for(record: &NuclideRecord) -> String {
    format!("{}-{}", record.symbol, record.mass_number)
}

pub fn hover_for(record: &NuclideRecord, scheme: ColorScheme) -> String {
    let mut lines = vec![
        format!("{} ({})", record.name, label_for(record)),
        format!("Z={}, A={}", record.atomic_number, record.mass_number),
    ];

    let tag = tag_of(scheme, record).unwrap_or("unknown");
    match scheme {
        ColorScheme::Stability => lines.push(format!("Stability: {}", tag)),
        ColorScheme::Decay => lines.push(format!("Decay: {}", tag)),
    }

    if let Some(half_life) = &record.half_life {
        lines.push(format!("Half-life: {}", half_life));
    }

    lines.join("\n")
}
