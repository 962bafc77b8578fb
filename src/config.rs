use crate::error::ConfigError;
use crate::services::DEFAULT_TOP_K;
use serde::Deserialize;
use std::path::Path;

/// 默认配置文件名（位于当前工作目录）
pub const DEFAULT_CONFIG_FILE: &str = "topk.toml";

/// 程序配置
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// 验证服务地址
    pub api_base_url: String,
    /// 获取令牌的接口路径
    pub register_endpoint: String,
    /// 提交结果的接口路径
    pub check_topk_endpoint: String,
    /// 输入数据文件
    pub input_file: String,
    /// 输出结果文件
    pub output_file: String,
    /// 保留的前 K 条记录
    pub top_k: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://u8whitimu7.execute-api.ap-southeast-1.amazonaws.com/prod"
                .to_string(),
            register_endpoint: "/register".to_string(),
            check_topk_endpoint: "/test/check-topk-sort".to_string(),
            input_file: "validated_dataset.json".to_string(),
            output_file: "top_results.json".to_string(),
            top_k: DEFAULT_TOP_K,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件内容，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_base_url: Option<String>,
    register_endpoint: Option<String>,
    check_topk_endpoint: Option<String>,
    input_file: Option<String>,
    output_file: Option<String>,
    top_k: Option<usize>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 仅使用环境变量覆盖默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// 完整加载：默认值 → 配置文件 → 环境变量
    ///
    /// 配置文件路径取自 `TOPK_CONFIG`，未设置时使用 [`DEFAULT_CONFIG_FILE`]。
    /// 默认文件不存在时直接跳过；显式指定的文件不存在则返回错误。
    /// 出错时同时返回已可用的配置（默认值 + 环境变量），由调用方决定是否继续。
    pub fn load() -> (Self, Option<ConfigError>) {
        let explicit = std::env::var("TOPK_CONFIG").ok();
        let path = explicit.as_deref().unwrap_or(DEFAULT_CONFIG_FILE);

        let (base, err) = if explicit.is_none() && !Path::new(path).exists() {
            (Self::default(), None)
        } else {
            match Self::from_toml_file(path) {
                Ok(config) => (config, None),
                Err(e) => (Self::default(), Some(e)),
            }
        };

        (base.with_env_overrides(|key| std::env::var(key).ok()), err)
    }

    /// 从 TOML 文件加载，未填写的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: FileConfig = toml::from_str(content)?;
        let default = Self::default();
        Ok(Self {
            api_base_url: file.api_base_url.unwrap_or(default.api_base_url),
            register_endpoint: file.register_endpoint.unwrap_or(default.register_endpoint),
            check_topk_endpoint: file.check_topk_endpoint.unwrap_or(default.check_topk_endpoint),
            input_file: file.input_file.unwrap_or(default.input_file),
            output_file: file.output_file.unwrap_or(default.output_file),
            top_k: file.top_k.unwrap_or(default.top_k),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
        })
    }

    /// 用环境变量覆盖当前配置，无法解析的值保持原样
    fn with_env_overrides(self, var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_base_url: var("API_BASE_URL").unwrap_or(self.api_base_url),
            register_endpoint: var("REGISTER_ENDPOINT").unwrap_or(self.register_endpoint),
            check_topk_endpoint: var("CHECK_TOPK_ENDPOINT").unwrap_or(self.check_topk_endpoint),
            input_file: var("INPUT_FILE").unwrap_or(self.input_file),
            output_file: var("OUTPUT_FILE").unwrap_or(self.output_file),
            top_k: var("TOP_K").and_then(|v| v.parse().ok()).unwrap_or(self.top_k),
            verbose_logging: var("VERBOSE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }

    /// 令牌接口完整地址
    pub fn register_url(&self) -> String {
        join_url(&self.api_base_url, &self.register_endpoint)
    }

    /// 提交接口完整地址
    pub fn check_topk_url(&self) -> String {
        join_url(&self.api_base_url, &self.check_topk_endpoint)
    }
}

fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
