// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::utils::url_utils::{site_origin, DEFAULT_BASE_URL};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 站点配置
    pub site: SiteSettings,
    /// HTTP配置
    pub http: HttpSettings,
    /// 爬取配置
    pub crawl: CrawlSettings,
    /// 字段提取配置
    pub extract: ExtractSettings,
}

/// 站点配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// 站点基础地址，用于拼接列表页、拍品页URL
    pub base_url: String,
}

/// HTTP配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// User-Agent 请求头
    pub user_agent: String,
    /// 请求超时时间（秒），未设置时沿用传输层默认值
    pub timeout_secs: Option<u64>,
}

/// 单页失败时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// 终止整个运行
    Abort,
    /// 记录警告并跳过该拍品
    Skip,
}

/// 爬取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 同时获取拍品详情页的最大数量，1 表示严格顺序
    pub concurrency: usize,
    /// 拍品页失败处理策略
    pub on_error: ErrorPolicy,
    /// 只从第 0 页列表发现拍品（复现旧版输出）
    pub legacy_first_page_only: bool,
}

/// 字段提取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractSettings {
    /// `desc` 取完整描述文本，而不是最后一个词
    pub full_description: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加代码默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 以及 `LOTCRAWL__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            .set_default("site.base_url", DEFAULT_BASE_URL)?
            .set_default(
                "http.user_agent",
                format!("lotcrawl/{}", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("crawl.concurrency", 1)?
            .set_default("crawl.on_error", "abort")?
            .set_default("crawl.legacy_first_page_only", false)?
            .set_default("extract.full_description", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("LOTCRAWL").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crawl.concurrency == 0 {
            return Err(ConfigError::Message(
                "crawl.concurrency must be at least 1".to_string(),
            ));
        }
        self.site_origin()?;
        Ok(())
    }

    /// 站点来源（不带末尾斜杠）
    pub fn site_origin(&self) -> Result<String, ConfigError> {
        site_origin(&self.site.base_url).map_err(|e| {
            ConfigError::Message(format!("invalid site.base_url '{}': {}", self.site.base_url, e))
        })
    }
}
