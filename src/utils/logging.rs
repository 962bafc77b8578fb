/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug 或 info 级别。
/// 重复调用不会报错（测试中会多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - Top {} 餐厅排序提交", config.top_k);
    info!("📁 输入文件: {}", config.input_file);
    info!("📄 输出文件: {}", config.output_file);
    info!("🌐 验证服务: {}", config.api_base_url);
    info!("{}", "=".repeat(60));
}

/// 记录数据加载信息
///
/// # 参数
/// - `total`: 读取到的记录数
pub fn log_records_loaded(total: usize) {
    info!("✓ 读取到 {} 条记录", total);
}

/// 记录打分结果
///
/// # 参数
/// - `scored`: 成功打分数量
/// - `skipped`: 跳过数量
pub fn log_scoring_complete(scored: usize, skipped: usize) {
    info!("✓ 打分完成: 成功 {} 条, 跳过 {} 条", scored, skipped);
}

/// 打印最终统计信息
///
/// # 参数
/// - `state`: 结束状态描述
/// - `loaded`: 读取的记录数
/// - `scored`: 成功打分数量
/// - `skipped`: 跳过数量
/// - `selected`: 输出的记录数
pub fn print_final_stats(state: &str, loaded: usize, scored: usize, skipped: usize, selected: usize) {
    info!("{}", "=".repeat(60));
    info!("📊 运行结束统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🏁 结束状态: {}", state);
    info!("📥 读取: {} | ✅ 打分: {} | ❌ 跳过: {}", loaded, scored, skipped);
    info!("🏆 输出: {} 条", selected);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
