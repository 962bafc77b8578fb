//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责把各个能力按固定顺序串起来，是整个系统的"指挥中心"。
//!
//! ### `pipeline` - 单次运行
//! - 读取输入文件（Vec<Value>）
//! - 逐条打分（交给 workflow::RecordFlow）
//! - 排序截取 Top K、写结果文件
//! - 获取令牌并提交
//! - 输出运行统计
//!
//! ## 层次关系
//!
//! ```text
//! pipeline::App (处理整批记录)
//!     ↓
//! workflow::RecordFlow (处理单条记录)
//!     ↓
//! services (能力层：scorer / ranker / result_writer)
//!     ↓
//! clients (外部接口：VerifyClient)
//! ```
//!
//! ## 设计原则
//!
//! 1. **顺序执行**：每一步 await 完成后才进入下一步
//! 2. **错误就地处理**：下层返回 Result，由本层决定继续还是提前结束
//! 3. **向下依赖**：编排层 → workflow → services → clients
//! 4. **无业务逻辑**：只做调度和统计，不做打分排序细节

pub mod pipeline;

// 重新导出主要类型
pub use pipeline::{App, RunReport, RunState};
