use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认的后端地址（本地开发环境）
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// 默认的配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "doc-precheck.toml";

/// 程序配置
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// 后端 API 地址
    pub api_base_url: String,
    /// 请求超时（秒），需要容纳大文件上传
    pub request_timeout_secs: u64,
    /// 结果导出目录
    pub export_dir: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 60,
            export_dir: PathBuf::from("."),
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件中的可选字段
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    export_dir: Option<PathBuf>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 按 默认值 < 配置文件 < 环境变量 的顺序加载配置
    ///
    /// 配置文件路径取自 `DOC_PRECHECK_CONFIG`，否则尝试当前目录下的
    /// `doc-precheck.toml`；文件不存在时直接跳过。
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("DOC_PRECHECK_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let base = if path.exists() {
            Self::default().merge_file(&path)?
        } else {
            Self::default()
        };

        Ok(base.merge_env())
    }

    /// 合并 TOML 配置文件
    pub fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
                path: path.display().to_string(),
                source,
            })?;
        self.merge_toml(&content, path)
    }

    fn merge_toml(self, content: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })?;

        Ok(Self {
            api_base_url: file.api_base_url.unwrap_or(self.api_base_url),
            request_timeout_secs: file
                .request_timeout_secs
                .unwrap_or(self.request_timeout_secs),
            export_dir: file.export_dir.unwrap_or(self.export_dir),
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
        })
    }

    fn merge_env(self) -> Self {
        Self {
            api_base_url: std::env::var("DOC_PRECHECK_API_BASE_URL").unwrap_or(self.api_base_url),
            request_timeout_secs: std::env::var("DOC_PRECHECK_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.request_timeout_secs),
            export_dir: std::env::var("DOC_PRECHECK_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.export_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }

    /// 去掉末尾斜杠后的 API 地址
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_to_local_backend() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn test_toml_overrides_only_present_fields() {
        let content = r#"
            api_base_url = "http://precheck.internal:9000/"
            verbose_logging = true
        "#;
        let config = Config::default()
            .merge_toml(content, Path::new("doc-precheck.toml"))
            .unwrap();

        assert_eq!(config.api_base_url, "http://precheck.internal:9000/");
        assert_eq!(config.base_url(), "http://precheck.internal:9000");
        assert!(config.verbose_logging);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_env_overrides_file_values() {
        std::env::set_var("DOC_PRECHECK_TIMEOUT_SECS", "180");
        std::env::set_var("DOC_PRECHECK_EXPORT_DIR", "/tmp/precheck-exports");
        let config = Config::default()
            .merge_toml("request_timeout_secs = 90", Path::new("doc-precheck.toml"))
            .unwrap()
            .merge_env();
        std::env::remove_var("DOC_PRECHECK_TIMEOUT_SECS");
        std::env::remove_var("DOC_PRECHECK_EXPORT_DIR");

        assert_eq!(config.request_timeout_secs, 180);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/precheck-exports"));
    }

    #[test]
    fn test_invalid_toml_is_reported_with_path() {
        let err = Config::default()
            .merge_toml("api_base_url = ", Path::new("broken.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }
}
