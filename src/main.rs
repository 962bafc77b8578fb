use anyhow::Result;
use topk_submit::utils::logging;
use topk_submit::{App, Config};
use tracing::warn;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 加载配置
    let (config, config_err) = Config::load();

    // 初始化日志
    logging::init(config.verbose_logging);

    if let Some(e) = config_err {
        warn!("⚠️ {}，使用默认配置", e);
    }

    // 运行应用，任何失败都只记录日志
    let _report = App::new(config).run().await;

    Ok(())
}
