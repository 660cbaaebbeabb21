//! 结果导出服务 - 业务能力层
//!
//! 把最近一次的检查结果原样写成 JSON 文件

use crate::error::{AppError, AppResult, FileError};
use crate::models::api::CheckResponse;
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 导出文件名：`check-results-<YYYY-MM-DD>.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("check-results-{}.json", date.format("%Y-%m-%d"))
}

/// 导出文件名使用的日期（UTC）
pub fn export_date_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 序列化为带缩进的 JSON
pub fn export_json(response: &CheckResponse) -> AppResult<String> {
    serde_json::to_string_pretty(response).map_err(|e| AppError::Other(e.to_string()))
}

/// 写入导出文件，返回文件路径
pub async fn export_results(
    response: &CheckResponse,
    dir: &Path,
    date: NaiveDate,
) -> AppResult<PathBuf> {
    let path = dir.join(export_file_name(date));
    let json = export_json(response)?;

    debug!("导出结果: {} ({} 字节)", path.display(), json.len());

    tokio::fs::write(&path, json)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

    Ok(path)
}

/// 读取导出的结果文件
pub async fn load_exported(path: &Path) -> AppResult<CheckResponse> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    serde_json::from_str(&content).map_err(|source| {
        AppError::File(FileError::ExportParseFailed {
            path: path.display().to_string(),
            source,
        })
    })
}
