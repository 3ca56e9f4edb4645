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

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非 2xx 响应
    #[error("HTTP {status} returned by {url}")]
    HttpStatus { url: String, status: u16 },
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 响应状态码（如果有）
    pub fn status(&self) -> Option<u16> {
        match self {
            EngineError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            EngineError::HttpStatus { status, .. } => Some(*status),
            EngineError::Other(_) => None,
        }
    }
}

/// 获取到的原始页面
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// 请求的URL
    pub url: String,
    /// HTTP状态码
    pub status_code: u16,
    /// 内容类型（Content-Type 头）
    pub content_type: Option<String>,
    /// 原始响应体
    pub body: Bytes,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

impl FetchedPage {
    /// 从内存中的 HTML 构造页面，主要用于测试和离线重放
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: 200,
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: Bytes::from(html.into()),
            response_time_ms: 0,
        }
    }
}

/// 页面获取器特质
///
/// 对一个 URL 发起 GET 请求并返回原始内容。
/// 不包含重试、限速或缓存。
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 获取页面
    async fn fetch(&self, url: &str) -> Result<FetchedPage, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, EngineError> {
        (**self).fetch(url).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
