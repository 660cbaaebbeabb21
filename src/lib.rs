//! # Doc Precheck
//!
//! 文档事前检查服务的客户端：选择 Word/Excel/PDF/PowerPoint 文件，
//! 在本地按服务端下发的限制做校验，上传到后端检查并展示每个文件的问题。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 唯一直接发 HTTP 请求的地方
//! - `CheckBackend` - 后端能力接口，`CheckClient` 为 reqwest 实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，都是无状态的纯函数
//! - `file_validator` - 单个文件的类型/大小校验
//! - `result_view` - 结果统计与渲染
//! - `result_exporter` - 结果导出为 JSON
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 界面状态与待上传列表
//! - `view_state` - `update(state, event)` 状态转换
//! - `selection` - 追加、移除、清空待上传文件
//!
//! ### ④ 编排层（App）
//! - `app` - 执行副作用（调用后端），把结果作为事件写回状态

pub mod app;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{CheckBackend, CheckClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{CheckResponse, ServiceConfig, UploadFile};
pub use workflow::{Event, ViewState};
