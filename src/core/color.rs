use crate::core::dataset::Dataset;
use crate::domain::model::{Color, ColorScheme, NuclideRecord, SchemeChoice};
use crate::utils::error::{ExplorerError, Result};

pub const STABILITY_FALLBACK: Color = Color::Gray;
pub const DECAY_FALLBACK: Color = Color::LightGray;

/// 依設定與資料集欄位決定實際的上色方式
pub fn resolve_scheme(choice: SchemeChoice, dataset: &Dataset) -> Result<ColorScheme> {
    match choice {
        SchemeChoice::Auto if dataset.has_decay_column() => Ok(ColorScheme::Decay),
        SchemeChoice::Auto => Ok(ColorScheme::Stability),
        SchemeChoice::Decay if !dataset.has_decay_column() => Err(ExplorerError::ConfigError {
            message: "color scheme 'decay' requires a decay column in the nuclide table"
                .to_string(),
        }),
        SchemeChoice::Decay => Ok(ColorScheme::Decay),
        SchemeChoice::Stability if !dataset.has_stability_column() => {
            Err(ExplorerError::ConfigError {
                message: "color scheme 'stability' requires a stability column in the nuclide table"
                    .to_string(),
            })
        }
        SchemeChoice::Stability => Ok(ColorScheme::Stability),
    }
}

/// 查表上色。任何輸入（含空值、未知標籤）都有對應顏色
pub fn color_for(scheme: ColorScheme, tag: Option<&str>) -> Color {
    let key = tag.map(|t| t.trim().to_lowercase()).unwrap_or_default();

    match scheme {
        ColorScheme::Stability => match key.as_str() {
            "estable" | "stable" => Color::Green,
            "inestable" | "unstable" => Color::Red,
            _ => STABILITY_FALLBACK,
        },
        ColorScheme::Decay => match key.as_str() {
            "stable" | "estable" => Color::Black,
            "beta-" => Color::Red,
            "beta+" => Color::Blue,
            "alpha" => Color::Purple,
            "isomer" => Color::Orange,
            _ => DECAY_FALLBACK,
        },
    }
}

/// 取出該方案對應的欄位值
pub fn tag_of(scheme: ColorScheme, record: &NuclideRecord) -> Option<&str> {
    match scheme {
        ColorScheme::Stability => record.stability.as_deref(),
        ColorScheme::Decay => record.decay_mode.as_deref(),
    }
}

pub fn record_color(scheme: ColorScheme, record: &NuclideRecord) -> Color {
    color_for(scheme, tag_of(scheme, record))
}
