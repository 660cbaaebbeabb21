//! 命令行参数解析（`clap`）

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "doc-precheck",
    version,
    about = "Word/Excel/PDF/PowerPoint の校正チェッククライアント",
    long_about = "Upload office documents to the pre-check backend and review the reported issues.\n\nConfiguration precedence: CLI > environment > doc-precheck.toml > defaults.",
    after_help = "Examples:\n  doc-precheck check report.docx slides.pptx\n  doc-precheck check ./docs --export --export-dir out\n  doc-precheck health",
    arg_required_else_help = true
)]
pub struct Cli {
    /// 后端地址（覆盖配置文件和环境变量）
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// 输出调试日志
    #[arg(long, short, global = true, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 上传文件并显示检查结果
    Check {
        /// 文件或目录（目录只展开一层）
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// 把结果导出为 check-results-<日期>.json
        #[arg(long, action = clap::ArgAction::SetTrue)]
        export: bool,
        /// 导出目录
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// 显示后端健康状态
    Health,
    /// 显示服务端配置和生效的校验限制
    Config,
    /// 存活探测
    Ping,
    /// 查看或更新校对规则
    Rules {
        /// 用 JSON 数组文件覆盖后端规则
        #[arg(long)]
        update: Option<PathBuf>,
    },
}

impl Cli {
    /// 把命令行参数合并到配置上
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
        if self.verbose {
            config.verbose_logging = true;
        }
        if let Commands::Check {
            export_dir: Some(dir),
            ..
        } = &self.cmd
        {
            config.export_dir = dir.clone();
        }
    }
}
