use crate::error::{AppError, AppResult, FileError};
use crate::models::upload::UploadFile;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从磁盘路径创建待上传文件（只读取元数据，不读取内容）
pub async fn load_upload_file(path: &Path) -> AppResult<UploadFile> {
    let metadata = fs::metadata(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::File(FileError::NotFound {
                path: path.display().to_string(),
            })
        } else {
            AppError::file_read_failed(path.display().to_string(), e)
        }
    })?;

    Ok(UploadFile::from_path(path, metadata.len()))
}

/// 按给定顺序加载多个路径
///
/// 目录会被展开为其中的普通文件（按文件名排序，不递归），
/// 其余路径原样保留顺序，交给选择组件做类型/大小校验。
pub async fn load_upload_files(paths: &[PathBuf]) -> AppResult<Vec<UploadFile>> {
    let mut expanded = Vec::new();

    for path in paths {
        if fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false) {
            let entries = list_directory(path).await?;
            tracing::info!(
                "📁 展开目录 {}: {} 个文件",
                path.display(),
                entries.len()
            );
            expanded.extend(entries);
        } else {
            expanded.push(path.clone());
        }
    }

    try_join_all(expanded.iter().map(|p| load_upload_file(p))).await
}

async fn list_directory(folder: &Path) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder.display().to_string(), e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder.display().to_string(), e))?
    {
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if is_file {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}
