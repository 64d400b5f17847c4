use crate::domain::model::SchemeChoice;
use crate::utils::error::Result;
use std::path::PathBuf;

/// 資料來源：檔案路徑或已讀入的位元組串流（例如上傳內容）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Stream(Vec<u8>),
}

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn source(&self) -> Option<&DataSource>;
    fn radius(&self) -> u32;
    fn color_scheme(&self) -> SchemeChoice;
    /// 額外的欄位別名：(邏輯欄位, 別名)
    fn column_aliases(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}
