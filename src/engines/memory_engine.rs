// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, FetchedPage, PageFetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// 内存页面引擎
///
/// 按URL返回预先登记的HTML，并记录请求顺序。未登记的URL返回404。
#[derive(Default)]
pub struct MemoryEngine {
    pages: HashMap<String, Result<String, u16>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个页面
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Ok(html.into()));
        self
    }

    /// 登记一个返回错误状态码的URL
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.pages.insert(url.into(), Err(status));
        self
    }

    /// 已发出的请求（按顺序）
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MemoryEngine {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, EngineError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(html)) => Ok(FetchedPage::from_html(url, html.clone())),
            Some(Err(status)) => Err(EngineError::HttpStatus {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(EngineError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
