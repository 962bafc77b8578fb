use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 单条记录错误
    #[error("记录错误: {0}")]
    Record(#[from] RecordError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 输入文件不存在
    #[error("输入文件不存在: {path}")]
    InputNotFound { path: String },
    /// 读取输入文件失败
    #[error("读取输入文件失败 ({path}): {source}")]
    InputRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 输入内容不是合法的记录列表
    #[error("输入文件格式错误 ({path}): {reason}")]
    InputMalformed { path: String, reason: String },
    /// 写入输出文件失败
    #[error("写入输出文件失败 ({path}): {source}")]
    OutputWriteFailure {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 单条记录错误，只影响当前记录
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    /// 缺少必需字段
    #[error("缺少字段 '{field}'")]
    MissingField { field: &'static str },
    /// 字段类型不符
    #[error("字段 '{field}' 类型错误: 期望 {expected}, 实际为 {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// 分数计算结果不是有限数
    #[error("分数计算溢出 (id: {id})")]
    NonFiniteScore { id: String },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 获取授权令牌失败
    #[error("获取授权令牌失败 ({endpoint}): {detail}")]
    TokenFetchFailure {
        endpoint: String,
        detail: RequestFailure,
    },
    /// 提交结果失败
    #[error("提交结果失败 ({endpoint}): {detail}")]
    SubmissionFailure {
        endpoint: String,
        detail: RequestFailure,
    },
}

/// 单次 HTTP 请求的失败原因
#[derive(Debug, Error)]
pub enum RequestFailure {
    /// 网络传输失败
    #[error("网络请求失败: {0}")]
    Transport(#[from] reqwest::Error),
    /// 服务端返回非 2xx 状态码
    #[error("HTTP 状态码 {status}: {body}")]
    BadStatus { status: u16, body: String },
    /// 响应体无法解析
    #[error("响应体无法解析: {0}")]
    BadBody(String),
    /// 响应中没有令牌
    #[error("响应中未找到 authorizationToken")]
    MissingToken,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ApiError {
    /// 是否为令牌获取阶段的错误
    pub fn is_token_failure(&self) -> bool {
        matches!(self, ApiError::TokenFetchFailure { .. })
    }

    /// 服务端返回的状态码（如有）
    pub fn status(&self) -> Option<u16> {
        let detail = match self {
            ApiError::TokenFetchFailure { detail, .. }
            | ApiError::SubmissionFailure { detail, .. } => detail,
        };
        match detail {
            RequestFailure::BadStatus { status, .. } => Some(*status),
            RequestFailure::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
