// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::lot::{LotField, LotRecord};
use crate::domain::models::page::{compile_selector, element_text, HtmlPage};
use crate::utils::errors::CrawlError;
use crate::utils::text::{first_token, last_token, normalize_ws};
use regex::Regex;
use scraper::Selector;

pub const TITLE_SELECTOR: &str = "html body main div.container div div.row div.col-xs-12.col-md-7.detail__title__wrapper h3.detail__title";
pub const BID_CONTAINER_SELECTOR: &str = "html body main div.container div div.row div.col-xs-12.col-md-7 div.panel.panel-default.closed-details ul.list-group li.list-group-item";
pub const SELLER_SELECTOR: &str = "html body main div.container div div.row div.col-xs-12.col-md-7 div.detail__seller-data div.seller-data__container div.seller-data__summary div.detail__user-summary span.bb strong";
pub const DESCRIPTION_SELECTOR: &str = "html body main div.container div div.row div.col-xs-12.col-md-7 div.panel.panel-default.detail__description-panel div.panel-body.description";

/// 从匹配元素中取值的方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    /// 第一个匹配元素的文本，裁剪首尾空白
    Text,
    /// 第一个匹配元素的文本，折叠空白并裁剪
    NormalizedText,
    /// 第一个匹配元素文本的最后一个词
    LastToken,
    /// 第一个匹配元素的属性值，裁剪首尾空白
    Attr(String),
    /// 第一个规范化文本以指定前缀开头的元素，取其最后一个词
    PrefixedLastToken(String),
    /// 第一个规范化文本匹配正则的元素，取其第一个词
    MatchingFirstToken(String),
}

/// 字段提取规则
///
/// 一条规则对应一个输出字段：选择器 + 取值方式。
/// 站点结构变化时只需调整规则表。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub field: LotField,
    pub selector: String,
    pub pick: Pick,
    /// 必填字段缺失时整条记录提取失败
    pub required: bool,
}

impl FieldRule {
    pub fn new(field: LotField, selector: impl Into<String>, pick: Pick) -> Self {
        Self {
            field,
            selector: selector.into(),
            pick,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// `desc` 字段的取值方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptionMode {
    /// 描述文本的最后一个词（旧版行为）
    #[default]
    LastToken,
    /// 规范化后的完整描述文本
    FullText,
}

/// urbanauctions.ca 拍品页的规则表
pub fn default_rules(description: DescriptionMode) -> Vec<FieldRule> {
    let desc_pick = match description {
        DescriptionMode::LastToken => Pick::LastToken,
        DescriptionMode::FullText => Pick::NormalizedText,
    };

    vec![
        FieldRule::new(LotField::Title, TITLE_SELECTOR, Pick::Text).required(),
        FieldRule::new(
            LotField::Bid,
            format!("{} span.NumberPart", BID_CONTAINER_SELECTOR),
            Pick::Text,
        ),
        FieldRule::new(
            LotField::NumBids,
            "li.list-group-item",
            Pick::MatchingFirstToken(r"^\d+ Bid\(s\).+".to_string()),
        ),
        FieldRule::new(LotField::HighBidder, BID_CONTAINER_SELECTOR, Pick::LastToken),
        FieldRule::new(LotField::Seller, SELLER_SELECTOR, Pick::Text),
        FieldRule::new(
            LotField::LotNum,
            "li",
            Pick::PrefixedLastToken("Lot # ".to_string()),
        ),
        FieldRule::new(
            LotField::SystemId,
            "li",
            Pick::PrefixedLastToken("System ID # ".to_string()),
        ),
        FieldRule::new(
            LotField::StartDate,
            "span.awe-rt-startingDTTM",
            Pick::Attr("data-initial-dttm".to_string()),
        ),
        FieldRule::new(
            LotField::EndDate,
            "span.awe-rt-endingDTTM",
            Pick::Attr("data-initial-dttm".to_string()),
        ),
        FieldRule::new(LotField::Desc, DESCRIPTION_SELECTOR, desc_pick),
    ]
}

enum CompiledPick {
    Text,
    NormalizedText,
    LastToken,
    Attr(String),
    PrefixedLastToken(String),
    MatchingFirstToken(Regex),
}

struct CompiledRule {
    field: LotField,
    selector: Selector,
    pick: CompiledPick,
    required: bool,
}

impl CompiledRule {
    fn apply(&self, page: &HtmlPage) -> Option<String> {
        match &self.pick {
            CompiledPick::Text => {
                let element = page.select_one(&self.selector)?;
                Some(element_text(&element).trim().to_string())
            }
            CompiledPick::NormalizedText => {
                let element = page.select_one(&self.selector)?;
                Some(normalize_ws(&element_text(&element)).trim().to_string())
            }
            CompiledPick::LastToken => {
                let element = page.select_one(&self.selector)?;
                last_token(&element_text(&element)).map(str::to_string)
            }
            CompiledPick::Attr(attr) => {
                let element = page.select_one(&self.selector)?;
                element.value().attr(attr).map(|v| v.trim().to_string())
            }
            CompiledPick::PrefixedLastToken(prefix) => page
                .select(&self.selector)
                .map(|e| normalize_ws(&element_text(&e)))
                .find(|text| text.starts_with(prefix.as_str()))
                .and_then(|text| last_token(&text).map(str::to_string)),
            CompiledPick::MatchingFirstToken(pattern) => page
                .select(&self.selector)
                .map(|e| normalize_ws(element_text(&e).trim()))
                .find(|text| pattern.is_match(text))
                .and_then(|text| first_token(&text).map(str::to_string)),
        }
    }
}

/// 字段提取器
///
/// 对同一文档独立执行每条规则：可选字段未匹配时为空，
/// 只有必填字段缺失才让整条记录失败。
pub struct FieldExtractor {
    rules: Vec<CompiledRule>,
}

impl FieldExtractor {
    /// 编译规则表
    ///
    /// # 返回值
    ///
    /// * `Ok(FieldExtractor)` - 编译成功
    /// * `Err(CrawlError::Parse)` - 规则中的选择器或正则无效
    pub fn new(rules: Vec<FieldRule>) -> Result<Self, CrawlError> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let selector = compile_selector(&rule.selector)?;
                let pick = match rule.pick {
                    Pick::Text => CompiledPick::Text,
                    Pick::NormalizedText => CompiledPick::NormalizedText,
                    Pick::LastToken => CompiledPick::LastToken,
                    Pick::Attr(attr) => CompiledPick::Attr(attr),
                    Pick::PrefixedLastToken(prefix) => CompiledPick::PrefixedLastToken(prefix),
                    Pick::MatchingFirstToken(pattern) => CompiledPick::MatchingFirstToken(
                        Regex::new(&pattern).map_err(|e| {
                            CrawlError::parse(&pattern, format!("invalid pattern: {}", e))
                        })?,
                    ),
                };
                Ok(CompiledRule {
                    field: rule.field,
                    selector,
                    pick,
                    required: rule.required,
                })
            })
            .collect::<Result<Vec<_>, CrawlError>>()?;

        Ok(Self { rules })
    }

    /// 使用站点默认规则表
    pub fn with_default_rules(description: DescriptionMode) -> Result<Self, CrawlError> {
        Self::new(default_rules(description))
    }

    /// 提取一条拍品记录
    ///
    /// # 参数
    ///
    /// * `page` - 已解析的拍品详情页
    /// * `url` - 拍品URL，原样写入记录
    pub fn extract(&self, page: &HtmlPage, url: &str) -> Result<LotRecord, CrawlError> {
        let mut record = LotRecord::new(url);

        for rule in &self.rules {
            let value = rule.apply(page);
            if value.is_none() && rule.required {
                return Err(CrawlError::Extraction {
                    url: url.to_string(),
                    field: rule.field.name(),
                });
            }
            record.set(rule.field, value);
        }

        Ok(record)
    }
}

#[cfg(test)]
#[path = "field_extractor_test.rs"]
mod tests;
