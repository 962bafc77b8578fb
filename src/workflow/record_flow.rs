//! 记录处理流程 - 流程层
//!
//! 核心职责：定义"一条记录"的处理流程
//!
//! 流程顺序：
//! 1. 解析字段 → 2. 打分
//!
//! 任一步失败只跳过当前记录，不影响其他记录

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::RecordError;
use crate::models::{Restaurant, ScoredRestaurant};
use crate::services::scorer;
use crate::utils::logging::truncate_text;

/// 单条记录处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResult {
    /// 打分成功
    Scored(ScoredRestaurant),
    /// 跳过（字段缺失或类型错误）
    Skipped(RecordError),
}

/// 一批记录的打分汇总
#[derive(Debug, Default)]
pub struct ScoringSummary {
    pub scored: Vec<ScoredRestaurant>,
    pub skipped: usize,
}

/// 记录处理流程
///
/// - 不持有任何资源
/// - 每条记录独立处理，不引用其他记录
pub struct RecordFlow {
    verbose_logging: bool,
}

impl RecordFlow {
    pub fn new(verbose_logging: bool) -> Self {
        Self { verbose_logging }
    }

    /// 处理单条记录
    pub fn run(&self, index: usize, record: &Value) -> ProcessResult {
        let result = Restaurant::from_json(record).and_then(scorer::score_restaurant);

        match result {
            Ok(scored) => {
                if self.verbose_logging {
                    debug!("[记录 {}] ✓ {}", index, scored);
                }
                ProcessResult::Scored(scored)
            }
            Err(e) => {
                warn!(
                    "[记录 {}] ⚠️ 已跳过: {} | 原始数据: {}",
                    index,
                    e,
                    truncate_text(&record.to_string(), 120)
                );
                ProcessResult::Skipped(e)
            }
        }
    }

    /// 处理整批记录
    pub fn run_all(&self, records: &[Value]) -> ScoringSummary {
        let mut summary = ScoringSummary::default();

        for (idx, record) in records.iter().enumerate() {
            match self.run(idx + 1, record) {
                ProcessResult::Scored(scored) => summary.scored.push(scored),
                ProcessResult::Skipped(_) => summary.skipped += 1,
            }
        }

        summary
    }
}
