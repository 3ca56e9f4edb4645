// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::EngineError;
use thiserror::Error;

/// 爬取错误类型
///
/// 覆盖一次爬取运行中可能出现的所有失败：
/// 页面获取、文档解析、必填字段提取、空结果以及输出阶段的错误。
#[derive(Error, Debug)]
pub enum CrawlError {
    /// 网络或 HTTP 层失败
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: EngineError,
    },

    /// 无法构建可查询的文档
    #[error("failed to parse {url}: {reason}")]
    Parse { url: String, reason: String },

    /// 必填字段的选择器没有匹配任何元素
    #[error("required field `{field}` not found on {url}")]
    Extraction { url: String, field: &'static str },

    /// 没有发现任何拍品，无法生成输出
    #[error("no lots were discovered; nothing to write")]
    EmptyResult,

    /// 配置错误
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CrawlError {
    /// 将引擎错误包装为针对某个 URL 的获取错误
    pub fn fetch(url: impl Into<String>, source: EngineError) -> Self {
        CrawlError::Fetch {
            url: url.into(),
            source,
        }
    }

    /// 构造解析错误
    pub fn parse(url: impl Into<String>, reason: impl Into<String>) -> Self {
        CrawlError::Parse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// 是否属于单个页面级别的错误
    ///
    /// 页面级错误可以在 `skip` 策略下被跳过，其余错误总是终止运行。
    pub fn is_page_level(&self) -> bool {
        matches!(
            self,
            CrawlError::Fetch { .. } | CrawlError::Parse { .. } | CrawlError::Extraction { .. }
        )
    }
}
