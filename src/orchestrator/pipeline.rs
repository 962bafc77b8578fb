use std::fmt;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::clients::{VerificationApi, VerifyClient};
use crate::config::Config;
use crate::error::{ApiError, AppError};
use crate::models::{load_records, ResultRecord};
use crate::services::{rank, ResultWriter};
use crate::utils::logging;
use crate::workflow::RecordFlow;

/// 运行状态
///
/// ```text
/// Start → Loaded → Scored → Ranked → Written → Authorized → Submitted → Done
///   └→ NoData (无可处理数据)          └→ NoToken (获取令牌失败)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    Loaded,
    Scored,
    Ranked,
    Written,
    Authorized,
    Submitted,
    Done,
    NoData,
    NoToken,
}

impl RunState {
    /// 是否为结束状态
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::NoData | RunState::NoToken)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Start => "Start",
            RunState::Loaded => "Loaded",
            RunState::Scored => "Scored",
            RunState::Ranked => "Ranked",
            RunState::Written => "Written",
            RunState::Authorized => "Authorized",
            RunState::Submitted => "Submitted",
            RunState::Done => "Done",
            RunState::NoData => "NoData",
            RunState::NoToken => "NoToken",
        };
        f.write_str(name)
    }
}

/// 一次运行的结果
#[derive(Debug)]
pub struct RunReport {
    pub final_state: RunState,
    /// 读取到的原始记录数
    pub loaded: usize,
    /// 成功打分的记录数
    pub scored: usize,
    /// 跳过的记录数
    pub skipped: usize,
    /// 排序后输出的结果
    pub results: Vec<ResultRecord>,
    /// 结果文件是否写入成功
    pub output_written: bool,
    /// 提交结果，未提交时为 None
    pub submission: Option<Result<String, ApiError>>,
}

impl RunReport {
    fn new() -> Self {
        Self {
            final_state: RunState::Start,
            loaded: 0,
            scored: 0,
            skipped: 0,
            results: Vec::new(),
            output_written: false,
            submission: None,
        }
    }

    /// 提交是否被服务端接受
    pub fn submitted_ok(&self) -> bool {
        matches!(self.submission, Some(Ok(_)))
    }

    fn advance(&mut self, next: RunState) {
        debug!("状态: {} → {}", self.final_state, next);
        self.final_state = next;
    }
}

/// 应用主结构
///
/// 按顺序执行：加载 → 打分 → 排序 → 写文件 → 获取令牌 → 提交。
/// 所有错误都在这里记录并决定继续还是提前结束，不向外抛出。
pub struct App<A = VerifyClient> {
    config: Config,
    api: A,
    flow: RecordFlow,
    writer: ResultWriter,
}

impl App<VerifyClient> {
    /// 使用真实的验证服务客户端初始化
    pub fn new(config: Config) -> Self {
        let api = VerifyClient::new(&config);
        Self::with_api(config, api)
    }
}

impl<A: VerificationApi> App<A> {
    /// 使用指定的验证服务实现初始化
    pub fn with_api(config: Config, api: A) -> Self {
        Self {
            flow: RecordFlow::new(config.verbose_logging),
            writer: ResultWriter::with_path(&config.output_file),
            config,
            api,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> RunReport {
        logging::log_startup(&self.config);

        let mut report = RunReport::new();
        self.execute(&mut report).await;

        logging::print_final_stats(
            &report.final_state.to_string(),
            report.loaded,
            report.scored,
            report.skipped,
            report.results.len(),
        );

        report
    }

    async fn execute(&self, report: &mut RunReport) {
        // ========== 加载 ==========
        info!("📁 正在读取输入文件...");
        let records = match load_records(Path::new(&self.config.input_file)).await {
            Ok(records) => records,
            Err(e) => {
                error!("❌ {}", AppError::from(e));
                Vec::new()
            }
        };

        if records.is_empty() {
            warn!("⚠️ 没有可处理的数据，程序结束");
            report.advance(RunState::NoData);
            return;
        }

        report.loaded = records.len();
        logging::log_records_loaded(report.loaded);
        report.advance(RunState::Loaded);

        // ========== 打分 ==========
        let summary = self.flow.run_all(&records);
        report.scored = summary.scored.len();
        report.skipped = summary.skipped;
        logging::log_scoring_complete(report.scored, report.skipped);

        if summary.scored.is_empty() {
            warn!("⚠️ 没有任何记录可以打分，程序结束");
            report.advance(RunState::NoData);
            return;
        }
        report.advance(RunState::Scored);

        // ========== 排序 ==========
        let top = rank(summary.scored, self.config.top_k);
        for (i, r) in top.iter().enumerate() {
            info!("  {:>2}. {}", i + 1, r);
        }
        report.results = top.iter().map(|r| r.to_result()).collect();
        report.advance(RunState::Ranked);

        // ========== 写文件（失败不影响提交） ==========
        match self.writer.write(&report.results).await {
            Ok(()) => {
                info!(
                    "✓ Top {} 结果已保存至 '{}'",
                    report.results.len(),
                    self.writer.path().display()
                );
                report.output_written = true;
            }
            Err(e) => error!("❌ {}", AppError::from(e)),
        }
        report.advance(RunState::Written);

        // ========== 获取令牌 ==========
        info!("🔑 正在获取授权令牌...");
        let token = match self.api.fetch_token().await {
            Ok(token) => token,
            Err(e) => {
                error!("❌ {}", AppError::from(e));
                warn!("⚠️ 未获取到授权令牌，跳过提交");
                report.advance(RunState::NoToken);
                return;
            }
        };
        info!("✓ 已获取授权令牌");
        report.advance(RunState::Authorized);

        // ========== 提交 ==========
        info!("📤 正在提交 Top {} 结果进行验证...", report.results.len());
        let outcome = self.api.submit(&token, &report.results).await;
        match &outcome {
            Ok(body) => {
                info!("✓ 提交成功");
                info!("服务端响应: {}", body);
            }
            Err(e) => error!("❌ {}", e),
        }
        report.submission = Some(outcome);
        report.advance(RunState::Submitted);

        report.advance(RunState::Done);
    }
}
