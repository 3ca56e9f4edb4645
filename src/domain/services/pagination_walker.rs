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

use crate::domain::models::event::Event;
use crate::domain::models::lot::LotUrl;
use crate::domain::models::page::HtmlPage;
use crate::domain::services::link_extractor::LinkExtractor;
use crate::engines::traits::{FetchedPage, PageFetcher};
use crate::utils::errors::CrawlError;
use std::collections::HashSet;
use tracing::{debug, info};

/// 爬取会话
///
/// 一次场次爬取中累积的拍品URL，保持插入顺序并去重。
#[derive(Debug)]
pub struct CrawlSession {
    event: Event,
    lot_urls: Vec<LotUrl>,
    seen: HashSet<LotUrl>,
    pages_walked: u32,
}

impl CrawlSession {
    pub fn new(event: Event) -> Self {
        Self {
            event,
            lot_urls: Vec::new(),
            seen: HashSet::new(),
            pages_walked: 0,
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    /// 记录一个拍品URL，已存在时返回 `false`
    pub fn record(&mut self, url: LotUrl) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        info!("Found listing: {}", url);
        self.seen.insert(url.clone());
        self.lot_urls.push(url);
        true
    }

    /// 已发现的拍品URL（发现顺序）
    pub fn lot_urls(&self) -> &[LotUrl] {
        &self.lot_urls
    }

    /// 已扫描的列表页数量（包括最后的空页）
    pub fn pages_walked(&self) -> u32 {
        self.pages_walked
    }

    pub fn into_lot_urls(self) -> Vec<LotUrl> {
        self.lot_urls
    }
}

/// 单个列表页的扫描结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageScan {
    /// 画廊单元数量
    pub gallery_units: usize,
    /// 本页新增的拍品数量
    pub new_lots: usize,
    /// 分页链接中出现的最大页码
    pub last_page_hint: u32,
}

/// 分页遍历器
///
/// 从第 0 页开始逐页获取列表页，直到某页不含画廊单元为止。
pub struct PaginationWalker<'a, F: PageFetcher + ?Sized> {
    fetcher: &'a F,
    links: &'a LinkExtractor,
}

impl<'a, F: PageFetcher + ?Sized> PaginationWalker<'a, F> {
    pub fn new(fetcher: &'a F, links: &'a LinkExtractor) -> Self {
        Self { fetcher, links }
    }

    /// 遍历场次的全部列表页
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<LotUrl>)` - 按发现顺序排列的拍品URL，首页为空时为空列表
    /// * `Err(CrawlError)` - 任一列表页获取失败
    pub async fn walk(&self, event: &Event) -> Result<Vec<LotUrl>, CrawlError> {
        let mut session = CrawlSession::new(event.clone());
        self.walk_session(&mut session, None).await?;
        Ok(session.into_lot_urls())
    }

    /// 在已有会话上遍历
    ///
    /// `first_page` 为已经获取的第 0 页时不会重复请求。
    ///
    /// # 返回值
    ///
    /// 每个已获取列表页的扫描结果，最后一项总是空页
    pub async fn walk_session(
        &self,
        session: &mut CrawlSession,
        first_page: Option<FetchedPage>,
    ) -> Result<Vec<PageScan>, CrawlError> {
        let mut page_index: u32 = 0;
        let mut prefetched = first_page;
        let mut scans = Vec::new();

        loop {
            let fetched = match prefetched.take() {
                Some(page) => page,
                None => self.fetch_listing(session.event(), page_index).await?,
            };

            let scan = self.scan(session, &fetched);
            debug!(
                page = page_index,
                gallery_units = scan.gallery_units,
                new_lots = scan.new_lots,
                "listing page scanned"
            );
            scans.push(scan);
            if scan.gallery_units == 0 {
                break;
            }
            page_index += 1;
        }

        Ok(scans)
    }

    /// 获取指定页码的列表页
    pub async fn fetch_listing(
        &self,
        event: &Event,
        page: u32,
    ) -> Result<FetchedPage, CrawlError> {
        let url = event.listing_url(self.links.origin(), page);
        self.fetcher
            .fetch(&url)
            .await
            .map_err(|e| CrawlError::fetch(url.as_str(), e))
    }

    /// 扫描一个列表页
    ///
    /// 页面含画廊单元时把其中的拍品链接记入会话；空页（包括空响应体）不记录任何链接。
    pub fn scan(
        &self,
        session: &mut CrawlSession,
        fetched: &FetchedPage,
    ) -> PageScan {
        self.scan_page(session, fetched, true)
    }

    /// 扫描一个列表页并记录全部拍品链接，不检查画廊单元
    pub fn scan_all_links(
        &self,
        session: &mut CrawlSession,
        fetched: &FetchedPage,
    ) -> PageScan {
        self.scan_page(session, fetched, false)
    }

    fn scan_page(
        &self,
        session: &mut CrawlSession,
        fetched: &FetchedPage,
        require_gallery: bool,
    ) -> PageScan {
        let page = HtmlPage::parse(fetched);
        let gallery_units = self.links.gallery_units(&page);
        let last_page_hint = self.links.last_page_index(&page);
        session.pages_walked += 1;

        let mut new_lots = 0;
        if gallery_units > 0 || !require_gallery {
            for url in self.links.extract(&page) {
                if session.record(url) {
                    new_lots += 1;
                }
            }
        }

        PageScan {
            gallery_units,
            new_lots,
            last_page_hint,
        }
    }
}

#[cfg(test)]
#[path = "pagination_walker_test.rs"]
mod tests;
