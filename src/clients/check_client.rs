/// 文档检查后端 API 客户端
///
/// 封装所有与后端 HTTP 接口相关的调用逻辑。只做单次请求，
/// 不重试、不退避，失败直接返回给调用方。
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, ConfigError};
use crate::models::api::{CheckResponse, HealthResponse, PingResponse, ServiceConfig};
use crate::models::upload::UploadFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// multipart 中文件字段的名称
pub const FILES_FIELD: &str = "files";

/// 后端能力接口
///
/// `App` 只依赖这个接口，测试时可以替换为内存实现。
#[async_trait]
pub trait CheckBackend: Send + Sync {
    /// `GET /health`
    async fn get_health(&self) -> AppResult<HealthResponse>;
    /// `GET /config`
    async fn get_config(&self) -> AppResult<ServiceConfig>;
    /// `POST /check`，每个文件对应一个 `files` 字段，顺序与传入一致
    async fn submit_files(&self, files: &[UploadFile]) -> AppResult<CheckResponse>;
    /// `GET /`
    async fn ping(&self) -> AppResult<PingResponse>;
}

/// 基于 reqwest 的后端客户端
pub struct CheckClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

impl CheckClient {
    /// 创建新的客户端，超时时间取自配置
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ConfigError::ClientBuildFailed)?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 获取后端的校对规则列表
    ///
    /// 后端会把规则文件内容作为 JSON 字符串返回，这里兼容两种形式：
    /// 直接的数组，或包含数组文本的字符串。
    pub async fn get_rules(&self) -> AppResult<Vec<Value>> {
        let endpoint = "/rules";
        let value: Value = self.get_json(endpoint).await?;

        let value = match value {
            Value::String(text) => serde_json::from_str(&text).map_err(|source| {
                ApiError::JsonParseFailed {
                    endpoint: endpoint.to_string(),
                    source,
                }
            })?,
            other => other,
        };

        serde_json::from_value(value).map_err(|source| {
            AppError::Api(ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source,
            })
        })
    }

    /// 覆盖后端的校对规则，返回后端的提示消息
    pub async fn update_rules(&self, rules: &[Value]) -> AppResult<String> {
        let endpoint = "/rules";
        debug!("API 请求: POST {} ({} 条规则)", endpoint, rules.len());

        let response = self
            .http
            .post(self.url(endpoint))
            .json(rules)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let reply: MessageResponse = Self::decode(endpoint, response).await?;
        Ok(reply.message)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        debug!("API 请求: GET {}", endpoint);

        let response = self
            .http
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        Self::decode(endpoint, response).await
    }

    /// 检查状态码并解析 JSON
    async fn decode<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> AppResult<T> {
        let status = response.status();
        debug!("API 响应: {} {}", status.as_u16(), endpoint);

        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        if !status.is_success() {
            warn!("API 返回错误状态 {} ({})", status.as_u16(), endpoint);
            return Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: (!body.is_empty()).then_some(body),
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|source| {
            AppError::Api(ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source,
            })
        })
    }

    /// 构造 multipart 表单，文件顺序与选择顺序一致
    async fn build_form(files: &[UploadFile]) -> AppResult<(Form, u64)> {
        let mut form = Form::new();
        let mut total_bytes = 0u64;

        for file in files {
            let bytes = file.read_bytes().await?;
            total_bytes += bytes.len() as u64;

            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(file.mime_type())
                .map_err(|e| ApiError::InvalidUpload {
                    filename: file.name.clone(),
                    reason: e.to_string(),
                })?;
            form = form.part(FILES_FIELD, part);
        }

        Ok((form, total_bytes))
    }
}

#[async_trait]
impl CheckBackend for CheckClient {
    async fn get_health(&self) -> AppResult<HealthResponse> {
        self.get_json("/health").await
    }

    async fn get_config(&self) -> AppResult<ServiceConfig> {
        self.get_json("/config").await
    }

    async fn submit_files(&self, files: &[UploadFile]) -> AppResult<CheckResponse> {
        let endpoint = "/check";
        let (form, total_bytes) = Self::build_form(files).await?;

        debug!(
            "API 请求: POST {} ({} 个文件, {})",
            endpoint,
            files.len(),
            crate::utils::format::format_file_size(total_bytes)
        );

        let response = self
            .http
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        Self::decode(endpoint, response).await
    }

    async fn ping(&self) -> AppResult<PingResponse> {
        self.get_json("/").await
    }
}
