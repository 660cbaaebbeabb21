use anyhow::Result;
use clap::Parser;
use doc_precheck::cli::Cli;
use doc_precheck::{app, logger, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置：默认值 < 配置文件 < 环境变量 < 命令行
    let mut config = Config::load()?;
    cli.apply(&mut config);

    // 初始化日志
    logger::init(config.verbose_logging);

    app::run(cli.cmd, config).await
}
