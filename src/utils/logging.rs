/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::config::Config;
use crate::services::file_validator::SelectionLimits;
use crate::services::result_view::CheckSummary;
use crate::workflow::selection::SelectionOutcome;
use tracing::{info, warn};

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 ドキュメント事前チェック - 启动");
    info!("🌐 后端地址: {}", config.base_url());
    info!("⏱️ 请求超时: {} 秒", config.request_timeout_secs);
    info!("{}", "=".repeat(60));
}

/// 记录当前生效的校验限制
pub fn log_limits(limits: &SelectionLimits, from_server: bool) {
    let source = if from_server { "服务端配置" } else { "内置默认值" };
    info!("📋 校验限制（{}）: {}", source, limits.describe());
}

/// 记录一次文件添加的结果
pub fn log_selection_outcome(outcome: &SelectionOutcome, total_selected: usize) {
    for warning in &outcome.warnings {
        warn!("⚠️ {}", warning);
    }
    info!(
        "📄 本次加入 {} 个文件，待上传共 {} 个",
        outcome.accepted, total_selected
    );
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &CheckSummary) {
    info!("\n{}", "=".repeat(60));
    info!("📊 检查完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.successful_files, summary.total_files);
    info!("❌ 失败: {}", summary.error_files);
    info!("📝 问题总数: {}", summary.total_issues);
    info!("{}", "=".repeat(60));
}
