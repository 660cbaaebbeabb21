//! 后端 API 的请求/响应数据结构
//!
//! 字段名与后端 JSON 保持一致，可选字段在为空时不序列化，
//! 以保证导出的结果可以原样解析回来。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// `GET /config` 返回的服务端配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// 单个文件的最大字节数
    pub max_file_size: u64,
    /// 单次上传的最大文件数
    pub max_files_count: usize,
    /// 支持的扩展名（带前导点，如 `.docx`）
    pub supported_extensions: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 后端校对规则中的最大句长
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sentence_length: Option<u32>,
}

fn default_log_level() -> String {
    "INFO".to_string()
}

/// `GET /health` 返回的健康检查结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<HealthDependencies>,
}

/// 后端依赖组件是否可用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDependencies {
    pub textract: bool,
    pub textlint: bool,
}

/// `GET /` 存活探测
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// 问题严重程度
///
/// 未知级别保留后端给出的原始字符串，序列化时原样写回。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Other(raw) => raw,
        }
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            "info" => Severity::Info,
            _ => Severity::Other(raw),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Severity::from)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个文件的处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Success,
    Error,
}

/// 校对发现的单个问题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIssue {
    #[serde(rename = "type")]
    pub issue_type: String,
    pub severity: Severity,
    pub line: u32,
    pub message: String,
    pub rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// 未建模的字段，导出时原样写回
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 单个文件的检查结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCheckResult {
    pub filename: String,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(default)]
    pub issues: Vec<CheckIssue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileCheckResult {
    pub fn is_success(&self) -> bool {
        self.status == FileStatus::Success
    }
}

/// `POST /check` 的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub total_files: usize,
    pub processed_files: usize,
    pub results: Vec<FileCheckResult>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
