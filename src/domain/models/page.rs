// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::FetchedPage;
use crate::utils::errors::CrawlError;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};

/// 已解析的HTML页面
///
/// 持有可通过CSS选择器查询的文档树。`scraper::Html` 不是 `Send`，
/// 页面应在两次 `.await` 之间创建并用完。
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    /// 解析获取到的页面
    ///
    /// 优先使用 Content-Type 中声明的字符集，其次尝试 UTF-8，
    /// 最后交给 chardetng 猜测编码。空响应体得到一个没有任何元素的文档。
    pub fn parse(page: &FetchedPage) -> Self {
        let text = decode_body(&page.body, page.content_type.as_deref());
        Self::from_html(&text)
    }

    /// 直接从HTML字符串构建页面
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// 按文档顺序选择元素
    pub fn select<'a>(&'a self, selector: &'a Selector) -> Select<'a, 'a> {
        self.document.select(selector)
    }

    /// 第一个匹配元素
    pub fn select_one<'a>(&'a self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.document.select(selector).next()
    }
}

/// 元素的完整文本（所有后代文本节点按顺序拼接）
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

/// 编译CSS选择器，失败时返回解析错误
pub fn compile_selector(selector: &str) -> Result<Selector, CrawlError> {
    Selector::parse(selector)
        .map_err(|e| CrawlError::parse(selector, format!("invalid selector: {:?}", e)))
}

fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(encoding) = content_type.and_then(charset_from_content_type) {
        let (text, _, _) = encoding.decode(body);
        return text.into_owned();
    }

    if let Ok(text) = std::str::from_utf8(body) {
        return text.to_string();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}

fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| Encoding::for_label(value.trim().trim_matches('"').as_bytes()))
}
