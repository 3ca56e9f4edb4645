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

use crate::{
    config::settings::{CrawlSettings, ErrorPolicy, Settings},
    domain::{
        models::{
            event::Event,
            lot::{LotRecord, LotUrl, ResultSet},
            page::HtmlPage,
        },
        services::{
            field_extractor::{DescriptionMode, FieldExtractor},
            link_extractor::LinkExtractor,
            pagination_walker::{CrawlSession, PaginationWalker},
        },
    },
    engines::traits::PageFetcher,
    utils::errors::CrawlError,
};
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

/// 爬取选项
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// 同时获取的拍品页数量
    pub concurrency: usize,
    /// 拍品页失败处理策略
    pub on_error: ErrorPolicy,
    /// 只从第 0 页发现拍品
    pub legacy_first_page_only: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            on_error: ErrorPolicy::Abort,
            legacy_first_page_only: false,
        }
    }
}

impl From<&CrawlSettings> for CrawlOptions {
    fn from(settings: &CrawlSettings) -> Self {
        Self {
            concurrency: settings.concurrency.max(1),
            on_error: settings.on_error,
            legacy_first_page_only: settings.legacy_first_page_only,
        }
    }
}

/// 拍品发现结果
#[derive(Debug, Clone)]
pub struct Discovery {
    /// 首页分页链接中的最大页码
    pub last_page_hint: u32,
    /// 实际扫描的列表页数量
    pub pages_walked: u32,
    /// 按发现顺序排列的拍品URL
    pub lot_urls: Vec<LotUrl>,
}

/// 被跳过的拍品
#[derive(Debug, Clone)]
pub struct SkippedLot {
    pub url: LotUrl,
    pub reason: String,
}

/// 一次场次爬取的结果
#[derive(Debug)]
pub struct CrawlReport {
    pub event: Event,
    pub discovery: Discovery,
    pub results: ResultSet,
    pub skipped: Vec<SkippedLot>,
}

/// 场次爬取用例
///
/// 发现全部拍品URL，逐个获取并提取字段，汇总为结果集。
pub struct CrawlEventUseCase<F: PageFetcher> {
    fetcher: F,
    links: LinkExtractor,
    extractor: FieldExtractor,
    options: CrawlOptions,
}

impl<F: PageFetcher> CrawlEventUseCase<F> {
    pub fn new(
        fetcher: F,
        links: LinkExtractor,
        extractor: FieldExtractor,
        options: CrawlOptions,
    ) -> Self {
        Self {
            fetcher,
            links,
            extractor,
            options,
        }
    }

    /// 根据配置组装用例
    ///
    /// # 参数
    ///
    /// * `fetcher` - 页面获取器
    /// * `settings` - 应用配置
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlEventUseCase)` - 组装成功
    /// * `Err(CrawlError)` - 站点地址或规则表无效
    pub fn from_settings(fetcher: F, settings: &Settings) -> Result<Self, CrawlError> {
        let origin = settings
            .site_origin()
            .map_err(|e| CrawlError::Config(e.to_string()))?;
        let description = if settings.extract.full_description {
            DescriptionMode::FullText
        } else {
            DescriptionMode::LastToken
        };

        Ok(Self::new(
            fetcher,
            LinkExtractor::new(origin),
            FieldExtractor::with_default_rules(description)?,
            CrawlOptions::from(&settings.crawl),
        ))
    }

    /// 发现场次的全部拍品URL
    pub async fn discover(&self, event: &Event) -> Result<Discovery, CrawlError> {
        let walker = PaginationWalker::new(&self.fetcher, &self.links);
        let mut session = CrawlSession::new(event.clone());

        let first = walker.fetch_listing(event, 0).await?;
        let last_page_hint = if self.options.legacy_first_page_only {
            walker.scan_all_links(&mut session, &first).last_page_hint
        } else {
            let scans = walker.walk_session(&mut session, Some(first)).await?;
            scans.first().map(|s| s.last_page_hint).unwrap_or(0)
        };

        info!(
            event = %event,
            last_page = last_page_hint,
            pages_walked = session.pages_walked(),
            lots = session.lot_urls().len(),
            "Lot discovery finished"
        );

        Ok(Discovery {
            last_page_hint,
            pages_walked: session.pages_walked(),
            lot_urls: session.into_lot_urls(),
        })
    }

    /// 获取并提取单个拍品
    ///
    /// 拍品页的空响应体视为解析失败。
    pub async fn fetch_lot(&self, url: &LotUrl) -> Result<LotRecord, CrawlError> {
        let fetched = self
            .fetcher
            .fetch(url.as_str())
            .await
            .map_err(|e| CrawlError::fetch(url.as_str(), e))?;
        if fetched.body.iter().all(u8::is_ascii_whitespace) {
            return Err(CrawlError::parse(url.as_str(), "empty response body"));
        }
        let page = HtmlPage::parse(&fetched);
        self.extractor.extract(&page, url.as_str())
    }

    /// 执行完整的场次爬取
    ///
    /// 结果集为空时不报错，由输出阶段决定如何处理。
    pub async fn run(&self, event: &Event) -> Result<CrawlReport, CrawlError> {
        let discovery = self.discover(event).await?;
        let (results, skipped) = self.collect_records(&discovery.lot_urls).await?;

        if results.is_empty() {
            warn!(event = %event, "No lots were extracted");
        }
        info!(
            event = %event,
            lots = results.len(),
            skipped = skipped.len(),
            "Crawl finished"
        );

        Ok(CrawlReport {
            event: event.clone(),
            discovery,
            results,
            skipped,
        })
    }

    async fn collect_records(
        &self,
        urls: &[LotUrl],
    ) -> Result<(ResultSet, Vec<SkippedLot>), CrawlError> {
        let total = urls.len();
        let mut results = ResultSet::new();
        let mut skipped = Vec::new();

        // buffered() yields in submission order, so discovery order is kept
        let mut lots = stream::iter(urls.iter().enumerate())
            .map(|(index, url)| async move {
                info!(
                    "[{}] Getting details for listing: {}",
                    progress_label(index, total),
                    url
                );
                (url, self.fetch_lot(url).await)
            })
            .buffered(self.options.concurrency.max(1));

        while let Some((url, result)) = lots.next().await {
            match result {
                Ok(record) => results.push(record),
                Err(e) if e.is_page_level() && self.options.on_error == ErrorPolicy::Skip => {
                    warn!(url = %url, error = %e, "Skipping lot");
                    skipped.push(SkippedLot {
                        url: url.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok((results, skipped))
    }
}

/// 进度标签，例如 `" 12.50%"`（宽度 7，含百分号）
pub fn progress_label(index: usize, total: usize) -> String {
    let pct = if total == 0 {
        0.0
    } else {
        index as f64 / total as f64 * 100.0
    };
    format!("{:6.2}%", pct)
}

#[cfg(test)]
#[path = "crawl_event_use_case_test.rs"]
mod tests;
