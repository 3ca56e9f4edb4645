// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::lot::LotUrl;
use crate::domain::models::page::HtmlPage;
use crate::utils::url_utils::join_site_path;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;
use std::collections::HashSet;

/// 拍品详情链接：路径开头、数字 id，之后不作限制
static LOT_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/Event/LotDetails/\d+").expect("valid regex"));

/// 分页链接，捕获页码
static PAGE_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/Event/Details/\d+\?page=(\d+)").expect("valid regex"));

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));

static GALLERY_UNIT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.galleryUnit").expect("valid selector"));

/// 链接发现器
///
/// 负责从列表页中提取拍品链接、统计画廊单元以及读取分页信息
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    origin: String,
}

impl LinkExtractor {
    /// 创建链接发现器
    ///
    /// # 参数
    ///
    /// * `origin` - 站点来源，用于把站内 href 拼成绝对URL
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// 站点来源
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// 提取拍品链接
    ///
    /// 按文档顺序返回，同一页内去重。
    ///
    /// # 参数
    ///
    /// * `page` - 已解析的列表页
    ///
    /// # 返回值
    ///
    /// 去重后的拍品URL列表
    pub fn extract(&self, page: &HtmlPage) -> Vec<LotUrl> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for anchor in page.select(&ANCHOR) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !LOT_HREF.is_match(href) {
                continue;
            }
            let url = join_site_path(&self.origin, href);
            if seen.insert(url.clone()) {
                urls.push(LotUrl::new(url));
            }
        }

        urls
    }

    /// 统计页面中的画廊单元数量
    ///
    /// 数量为 0 的列表页即视为最后一页之后的页。
    pub fn gallery_units(&self, page: &HtmlPage) -> usize {
        page.select(&GALLERY_UNIT).count()
    }

    /// 从分页链接中读取最大页码
    ///
    /// 没有分页链接时返回 0。
    pub fn last_page_index(&self, page: &HtmlPage) -> u32 {
        page.select(&ANCHOR)
            .filter_map(|a| a.value().attr("href"))
            .filter_map(|href| PAGE_HREF.captures(href))
            .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
            .max()
            .unwrap_or(0)
    }
}
