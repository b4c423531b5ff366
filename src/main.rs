use anyhow::{Context, Result};
use csv_pipeline::{app, config::Config};
use std::path::PathBuf;

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("config.toml"), PathBuf::from);
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("加载配置失败: {}", config_path.display()))?;

    #[cfg(feature = "logging")]
    {
        let log_config = csv_pipeline::logging::LogConfig::from_settings(&config.log)?;
        csv_pipeline::logging::init_logging(log_config)?;
        tracing::info!("使用配置文件: {}", config_path.display());
    }

    let report = app::run(&config)?;
    println!(
        "生成 {} 条记录，顺序处理 {} 个作业，工作池处理 {} 个作业（丢弃 {} 行，失败 {} 个），总耗时: {:.2?}",
        report.generation.records_written,
        report.sequential.processed,
        report.pooled.processed,
        report.pooled.dispatch.dropped,
        report.pooled.failed(),
        report.total
    );
    Ok(())
}
