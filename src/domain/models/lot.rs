// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 拍品详情页URL
///
/// 形如 `https://urbanauctions.ca/Event/LotDetails/<digits>` 的绝对地址。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LotUrl(String);

impl LotUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LotUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LotUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 从拍品页提取的字段
///
/// 顺序即输出列顺序（`url` 之后）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LotField {
    Title,
    Bid,
    NumBids,
    HighBidder,
    Seller,
    LotNum,
    SystemId,
    StartDate,
    EndDate,
    Desc,
}

impl LotField {
    /// 全部字段（按输出顺序）
    pub const ALL: [LotField; 10] = [
        LotField::Title,
        LotField::Bid,
        LotField::NumBids,
        LotField::HighBidder,
        LotField::Seller,
        LotField::LotNum,
        LotField::SystemId,
        LotField::StartDate,
        LotField::EndDate,
        LotField::Desc,
    ];

    /// 输出中的键名
    pub fn name(self) -> &'static str {
        match self {
            LotField::Title => "title",
            LotField::Bid => "bid",
            LotField::NumBids => "num_bids",
            LotField::HighBidder => "high_bidder",
            LotField::Seller => "seller",
            LotField::LotNum => "lot_num",
            LotField::SystemId => "system_id",
            LotField::StartDate => "start_date",
            LotField::EndDate => "end_date",
            LotField::Desc => "desc",
        }
    }
}

impl fmt::Display for LotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 拍品记录
///
/// 除 `url` 外所有字段都可能缺失；数值类字段保持原始文本。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotRecord {
    pub url: String,
    pub title: Option<String>,
    pub bid: Option<String>,
    pub num_bids: Option<String>,
    pub high_bidder: Option<String>,
    pub seller: Option<String>,
    pub lot_num: Option<String>,
    pub system_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub desc: Option<String>,
}

impl LotRecord {
    /// 仅包含URL的空记录
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    fn slot_mut(&mut self, field: LotField) -> &mut Option<String> {
        match field {
            LotField::Title => &mut self.title,
            LotField::Bid => &mut self.bid,
            LotField::NumBids => &mut self.num_bids,
            LotField::HighBidder => &mut self.high_bidder,
            LotField::Seller => &mut self.seller,
            LotField::LotNum => &mut self.lot_num,
            LotField::SystemId => &mut self.system_id,
            LotField::StartDate => &mut self.start_date,
            LotField::EndDate => &mut self.end_date,
            LotField::Desc => &mut self.desc,
        }
    }

    /// 设置字段值
    pub fn set(&mut self, field: LotField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// 读取字段值
    pub fn get(&self, field: LotField) -> Option<&str> {
        let value = match field {
            LotField::Title => &self.title,
            LotField::Bid => &self.bid,
            LotField::NumBids => &self.num_bids,
            LotField::HighBidder => &self.high_bidder,
            LotField::Seller => &self.seller,
            LotField::LotNum => &self.lot_num,
            LotField::SystemId => &self.system_id,
            LotField::StartDate => &self.start_date,
            LotField::EndDate => &self.end_date,
            LotField::Desc => &self.desc,
        };
        value.as_deref()
    }

    /// 键名（按记录自身顺序）
    pub fn keys(&self) -> Vec<&'static str> {
        std::iter::once("url")
            .chain(LotField::ALL.iter().map(|f| f.name()))
            .collect()
    }

    /// 值（与 `keys` 一一对应）
    pub fn values(&self) -> Vec<Option<&str>> {
        std::iter::once(Some(self.url.as_str()))
            .chain(LotField::ALL.iter().map(|f| self.get(*f)))
            .collect()
    }

    /// 按键名排序的映射，用于JSON输出
    pub fn to_sorted_map(&self) -> BTreeMap<&'static str, Option<&str>> {
        self.keys().into_iter().zip(self.values()).collect()
    }
}

/// 结果集
///
/// 按发现顺序排列的拍品记录。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<LotRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: LotRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&LotRecord> {
        self.records.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LotRecord> {
        self.records.iter()
    }
}

impl From<Vec<LotRecord>> for ResultSet {
    fn from(records: Vec<LotRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a LotRecord;
    type IntoIter = std::slice::Iter<'a, LotRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
