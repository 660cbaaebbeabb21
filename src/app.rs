//! 编排层
//!
//! `App` 持有后端客户端、界面状态和待上传列表，
//! 把后端调用的结果转换成事件交给 `workflow::view_state::update`。
//! 所有后端错误都在这里被捕获并记录，不会向上传播。

use crate::cli::Commands;
use crate::clients::{CheckBackend, CheckClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::api::CheckResponse;
use crate::models::loaders::load_upload_files;
use crate::models::upload::UploadFile;
use crate::services::file_validator::SelectionLimits;
use crate::services::result_exporter::{export_date_today, export_results};
use crate::services::result_view::{render_results, CheckSummary};
use crate::utils::logging;
use crate::workflow::selection::{FileSelection, SelectionOutcome};
use crate::workflow::view_state::{update, Effect, Event, ViewState};
use anyhow::Context;
use chrono::NaiveDate;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// 应用主结构
pub struct App<B: CheckBackend> {
    config: Config,
    backend: B,
    state: ViewState,
    selection: FileSelection,
}

impl App<CheckClient> {
    /// 使用 HTTP 客户端创建应用
    pub fn from_config(config: Config) -> AppResult<Self> {
        let backend = CheckClient::new(&config)?;
        Ok(Self::with_backend(config, backend))
    }
}

impl<B: CheckBackend> App<B> {
    pub fn with_backend(config: Config, backend: B) -> Self {
        Self {
            config,
            backend,
            state: ViewState::default(),
            selection: FileSelection::new(SelectionLimits::default()),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 获取服务端配置
    ///
    /// 失败时记录固定提示，选择组件继续使用内置默认限制。
    pub async fn initialize(&mut self) -> &ViewState {
        match self.backend.get_config().await {
            Ok(config) => {
                let limits = SelectionLimits::from_config(&config);
                logging::log_limits(&limits, true);
                self.selection.set_limits(limits);
                self.dispatch(Event::ConfigLoaded(config));
            }
            Err(e) => {
                error!("❌ 配置加载失败: {}", e);
                logging::log_limits(self.selection.limits(), false);
                self.dispatch(Event::ConfigFailed);
            }
        }
        &self.state
    }

    /// 通过选择组件添加文件
    ///
    /// 选择区域未显示时（加载中、检查中、已有结果或配置错误未重置）返回 `None`。
    /// 列表有变化时立即把完整列表提交检查。
    pub async fn add_files(&mut self, files: Vec<UploadFile>) -> Option<SelectionOutcome> {
        if !self.state.shows_upload_widget() {
            warn!("⚠️ 当前无法选择文件，请先重置");
            return None;
        }

        let outcome = self.selection.add_files(files);
        logging::log_selection_outcome(&outcome, self.selection.len());

        if outcome.changed() {
            let files = self.selection.files().to_vec();
            self.select_files(files).await;
        }

        Some(outcome)
    }

    /// 从选择组件中移除文件，剩余列表重新提交（为空时清空结果）
    pub async fn remove_file(&mut self, index: usize) -> Option<UploadFile> {
        let removed = self.selection.remove(index)?;
        debug!("移除文件: {}", removed.name);
        let files = self.selection.files().to_vec();
        self.select_files(files).await;
        Some(removed)
    }

    /// 清空选择组件
    pub async fn clear_files(&mut self) {
        self.selection.clear();
        self.select_files(Vec::new()).await;
    }

    /// 替换当前选择；非空时提交检查
    pub async fn select_files(&mut self, files: Vec<UploadFile>) {
        if let Some(effect) = self.dispatch(Event::FilesSelected(files)) {
            self.perform(effect).await;
        }
    }

    /// 清除结果、错误和选择
    pub fn reset(&mut self) {
        self.selection.clear();
        self.dispatch(Event::Reset);
        info!("🔄 已重置");
    }

    /// 最近一次检查的结果
    pub fn results(&self) -> Option<&CheckResponse> {
        self.state.check_results.as_ref()
    }

    pub fn summary(&self) -> Option<CheckSummary> {
        self.results().map(CheckSummary::from_response)
    }

    /// 渲染最近一次检查的结果
    pub fn render(&self) -> Option<String> {
        self.results().map(render_results)
    }

    /// 导出最近一次检查的结果，没有结果时返回 `None`
    pub async fn export(&self, date: NaiveDate) -> AppResult<Option<PathBuf>> {
        match self.results() {
            Some(results) => Ok(Some(
                export_results(results, &self.config.export_dir, date).await?,
            )),
            None => Ok(None),
        }
    }

    fn dispatch(&mut self, event: Event) -> Option<Effect> {
        let state = std::mem::take(&mut self.state);
        let (next, effect) = update(state, event);
        self.state = next;
        effect
    }

    async fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::SubmitFiles { generation, files } => self.submit(generation, files).await,
        }
    }

    /// 提交文件到后端检查，结果以事件形式写回状态
    async fn submit(&mut self, generation: u64, files: Vec<UploadFile>) {
        info!("📤 正在提交 {} 个文件 (第 {} 次提交)...", files.len(), generation);

        match self.backend.submit_files(&files).await {
            Ok(response) => {
                info!(
                    "✓ 检查完成: {}/{} 个文件处理成功",
                    response.processed_files, response.total_files
                );
                self.dispatch(Event::CheckSucceeded {
                    generation,
                    response,
                });
            }
            Err(e) => {
                error!("❌ 文档检查失败: {}", e);
                self.dispatch(Event::CheckFailed { generation });
            }
        }
    }
}

/// 执行命令行子命令
pub async fn run(command: Commands, config: Config) -> anyhow::Result<()> {
    logging::log_startup(&config);
    let mut app = App::from_config(config)?;

    match command {
        Commands::Check { paths, export, .. } => run_check(&mut app, &paths, export).await,
        Commands::Health => {
            let health = app.backend().get_health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
            Ok(())
        }
        Commands::Ping => {
            let ping = app.backend().ping().await?;
            println!("{}", ping.message);
            Ok(())
        }
        Commands::Config => {
            let config = app.backend().get_config().await?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            println!("{}", SelectionLimits::from_config(&config).describe());
            Ok(())
        }
        Commands::Rules { update } => run_rules(&app, update).await,
    }
}

async fn run_check(
    app: &mut App<CheckClient>,
    paths: &[PathBuf],
    export: bool,
) -> anyhow::Result<()> {
    app.initialize().await;

    if let Some(err) = app.state().error.clone() {
        eprintln!("エラー: {}", err);
        // 相当于用户点击"リセット"，之后使用内置默认限制
        app.reset();
    }

    let files = load_upload_files(paths).await?;
    info!("📁 找到 {} 个文件", files.len());

    let outcome = app
        .add_files(files)
        .await
        .context("ファイル選択ができない状態です")?;
    for warning in &outcome.warnings {
        eprintln!("⚠️ {}", warning);
    }

    if let Some(err) = &app.state().error {
        anyhow::bail!("{}", err);
    }

    let Some(text) = app.render() else {
        warn!("⚠️ 没有可提交的文件");
        return Ok(());
    };
    println!("{}", text);

    if let Some(summary) = app.summary() {
        logging::print_final_stats(&summary);
    }

    if export {
        if let Some(path) = app.export(export_date_today()).await? {
            info!("💾 结果已导出至: {}", path.display());
        }
    }

    Ok(())
}

async fn run_rules(app: &App<CheckClient>, update: Option<PathBuf>) -> anyhow::Result<()> {
    let client = app.backend();

    if let Some(path) = update {
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("无法读取规则文件: {}", path.display()))?;
        let rules: Vec<Value> = serde_json::from_str(&content)
            .with_context(|| format!("规则文件必须是 JSON 数组: {}", path.display()))?;

        let message = client.update_rules(&rules).await?;
        println!("{}", message);
        return Ok(());
    }

    let rules = client.get_rules().await?;
    println!("{}", serde_json::to_string_pretty(&rules)?);
    Ok(())
}
