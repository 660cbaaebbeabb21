use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// 支持的办公文档/PDF 扩展名与 MIME 类型
pub const OFFICE_MIME_TYPES: &[(&str, &str)] = &[
    (
        ".docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    (".doc", "application/msword"),
    (
        ".xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    (".xls", "application/vnd.ms-excel"),
    (".pdf", "application/pdf"),
    (
        ".pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    (".ppt", "application/vnd.ms-powerpoint"),
];

/// 根据扩展名查找 MIME 类型（扩展名需带前导点，不区分大小写）
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    let extension = extension.to_lowercase();
    OFFICE_MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// 文件内容来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// 磁盘上的文件，提交时才读取
    Path(PathBuf),
    /// 内存中的内容
    Memory(Vec<u8>),
}

/// 用户选择的待上传文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
    source: FileSource,
}

impl UploadFile {
    /// 引用磁盘上的文件
    pub fn from_path(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            size,
            source: FileSource::Path(path),
        }
    }

    /// 使用内存中的内容
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// 小写的扩展名（带前导点），没有扩展名时返回 `None`
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
    }

    /// 上传时使用的 MIME 类型
    pub fn mime_type(&self) -> &'static str {
        self.extension()
            .as_deref()
            .and_then(mime_for_extension)
            .unwrap_or("application/octet-stream")
    }

    /// 读取文件内容
    pub async fn read_bytes(&self) -> AppResult<Vec<u8>> {
        match &self.source {
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            FileSource::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| AppError::file_read_failed(path.display().to_string(), e)),
        }
    }
}

impl std::fmt::Display for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({})",
            self.name,
            crate::utils::format::format_file_size(self.size)
        )
    }
}
