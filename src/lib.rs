//! # Top-K Submit
//!
//! 一个为餐厅列表打分、排序并提交验证的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 记录类型与 JSON 加载
//! - `Restaurant` / `ScoredRestaurant` / `ResultRecord`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `scorer` - 单条记录打分
//! - `ranker` - 组合键排序与截取
//! - `ResultWriter` - 写结果文件
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一条记录"的处理流程（解析 → 打分）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 加载、打分、排序、写文件、获取令牌、提交
//!
//! ### 外部接口（Clients）
//! - `clients/` - 验证服务 HTTP 客户端
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{VerificationApi, VerifyClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Restaurant, ResultRecord, ScoredRestaurant};
pub use orchestrator::{App, RunReport, RunState};
pub use workflow::{ProcessResult, RecordFlow};
