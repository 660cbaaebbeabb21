//! 文件校验服务 - 业务能力层
//!
//! 只负责判断"单个文件能否加入待上传列表"，不关心列表本身

use crate::models::api::ServiceConfig;
use crate::models::upload::{mime_for_extension, UploadFile};
use crate::utils::format::{format_file_size, format_megabytes};

/// 未取得服务端配置时使用的默认最大文件数
pub const DEFAULT_MAX_FILES: usize = 10;

/// 未取得服务端配置时使用的默认单文件上限（50MB）
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// 未取得服务端配置时使用的默认扩展名
pub const DEFAULT_SUPPORTED_EXTENSIONS: [&str; 7] =
    [".docx", ".doc", ".xlsx", ".xls", ".pdf", ".pptx", ".ppt"];

/// 客户端校验使用的限制
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionLimits {
    /// 待上传列表的最大文件数
    pub max_files: usize,
    /// 单个文件的最大字节数
    pub max_file_size: u64,
    /// 允许的扩展名（小写，带前导点）
    pub supported_extensions: Vec<String>,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            supported_extensions: DEFAULT_SUPPORTED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl SelectionLimits {
    /// 根据服务端配置生成限制
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            max_files: config.max_files_count,
            max_file_size: config.max_file_size,
            supported_extensions: config
                .supported_extensions
                .iter()
                .map(|e| normalize_extension(e))
                .collect(),
        }
    }

    /// 服务端配置缺失时回退到默认值
    pub fn from_optional(config: Option<&ServiceConfig>) -> Self {
        config.map(Self::from_config).unwrap_or_default()
    }

    /// 扩展名是否同时在服务端白名单和内置 MIME 表中
    pub fn allows_extension(&self, extension: &str) -> bool {
        let extension = normalize_extension(extension);
        mime_for_extension(&extension).is_some()
            && self.supported_extensions.iter().any(|e| *e == extension)
    }

    /// 用于界面提示的一行说明
    pub fn describe(&self) -> String {
        format!(
            "対応形式: {} | 最大ファイルサイズ: {} | 最大ファイル数: {}",
            self.supported_extensions.join(", "),
            format_file_size(self.max_file_size),
            self.max_files
        )
    }
}

fn normalize_extension(extension: &str) -> String {
    let extension = extension.trim().to_lowercase();
    if extension.starts_with('.') {
        extension
    } else {
        format!(".{}", extension)
    }
}

/// 文件被拒绝的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// 类型不在白名单内
    UnsupportedType { extension: Option<String> },
    /// 超过单文件大小上限
    TooLarge { size: u64, limit: u64 },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::UnsupportedType { extension } => write!(
                f,
                "対応していない形式です ({})",
                extension.as_deref().unwrap_or("拡張子なし")
            ),
            RejectReason::TooLarge { size, limit } => write!(
                f,
                "サイズ制限（{}）を超えています ({})",
                format_megabytes(*limit),
                format_file_size(*size)
            ),
        }
    }
}

/// 单个文件的校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileVerdict {
    Accepted,
    Rejected(RejectReason),
}

impl FileVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, FileVerdict::Accepted)
    }
}

/// 校验单个文件的类型和大小
///
/// 类型先于大小检查：不支持的文件不会再报告大小问题。
pub fn validate_file(file: &UploadFile, limits: &SelectionLimits) -> FileVerdict {
    let extension = file.extension();
    let type_ok = extension
        .as_deref()
        .map(|ext| limits.allows_extension(ext))
        .unwrap_or(false);

    if !type_ok {
        return FileVerdict::Rejected(RejectReason::UnsupportedType { extension });
    }

    if file.size > limits.max_file_size {
        return FileVerdict::Rejected(RejectReason::TooLarge {
            size: file.size,
            limit: limits.max_file_size,
        });
    }

    FileVerdict::Accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_config() -> ServiceConfig {
        ServiceConfig {
            max_file_size: 52_428_800,
            max_files_count: 5,
            supported_extensions: vec![
                ".docx".to_string(),
                "XLSX".to_string(),
                ".pdf".to_string(),
                ".pptx".to_string(),
                ".txt".to_string(),
            ],
            log_level: "INFO".to_string(),
            max_sentence_length: None,
        }
    }

    #[test]
    fn test_defaults_when_config_missing() {
        let limits = SelectionLimits::from_optional(None);
        assert_eq!(limits.max_files, 10);
        assert_eq!(limits.max_file_size, 50 * 1024 * 1024);
        assert!(limits.allows_extension(".ppt"));
        assert!(limits.allows_extension(".DOC"));
    }

    #[test]
    fn test_config_extensions_are_normalized() {
        let limits = SelectionLimits::from_config(&service_config());
        assert_eq!(limits.max_files, 5);
        assert!(limits.allows_extension(".xlsx"));
        // 不在服务端白名单
        assert!(!limits.allows_extension(".doc"));
        // 服务端允许但不是办公文档 MIME
        assert!(!limits.allows_extension(".txt"));
    }

    #[test]
    fn test_oversize_file_is_rejected() {
        let limits = SelectionLimits::from_config(&service_config());
        let file = UploadFile::from_path("big.pdf", 52_428_801);
        assert_eq!(
            validate_file(&file, &limits),
            FileVerdict::Rejected(RejectReason::TooLarge {
                size: 52_428_801,
                limit: 52_428_800
            })
        );

        let exact = UploadFile::from_path("exact.pdf", 52_428_800);
        assert!(validate_file(&exact, &limits).is_accepted());
    }

    #[test]
    fn test_type_checked_before_size() {
        let limits = SelectionLimits::default();
        let file = UploadFile::from_path("movie.mp4", u64::MAX);
        assert_eq!(
            validate_file(&file, &limits),
            FileVerdict::Rejected(RejectReason::UnsupportedType {
                extension: Some(".mp4".to_string())
            })
        );
    }

    #[test]
    fn test_reason_messages() {
        let reason = RejectReason::TooLarge {
            size: 60 * 1024 * 1024,
            limit: 50 * 1024 * 1024,
        };
        assert_eq!(reason.to_string(), "サイズ制限（50MB）を超えています (60 MB)");
    }
}
