use serde::{Deserialize, Serialize};
use std::fmt;

/// 核素表中的一列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuclideRecord {
    /// 資料列編號（1 起算，不含標題列）
    pub row: usize,
    /// 已正規化的元素符號，例如 "Fe"
    pub symbol: String,
    pub atomic_number: u32,
    pub mass_number: u32,
    pub name: String,
    pub stability: Option<String>,
    pub decay_mode: Option<String>,
    /// 原樣保存，不做任何換算
    pub half_life: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Gray,
    Black,
    Blue,
    Purple,
    Orange,
    LightGray,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Gray => "gray",
            Color::Black => "black",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Orange => "orange",
            Color::LightGray => "lightgray",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 上色依據：穩定性欄位或衰變模式欄位，兩者互斥
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Stability,
    Decay,
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorScheme::Stability => f.write_str("stability"),
            ColorScheme::Decay => f.write_str("decay"),
        }
    }
}

/// 設定層的選項，`Auto` 依資料集欄位決定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SchemeChoice {
    #[default]
    Auto,
    Stability,
    Decay,
}

/// 交給繪圖端的單一標記
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub mass_number: u32,
    pub atomic_number: u32,
    pub symbol: String,
    pub label: String,
    pub color: Color,
    pub hover: String,
}

/// 一次查詢的結果；表格與圖都從同一個視窗產生
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub symbol: String,
    pub central_z: u32,
    pub radius: u32,
    pub scheme: ColorScheme,
    pub records: Vec<NuclideRecord>,
    pub display: Vec<DisplayRecord>,
}
