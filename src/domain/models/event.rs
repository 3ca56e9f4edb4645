// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::url_utils::join_site_path;
use std::fmt;

/// 列表页路径前缀
pub const EVENT_PATH: &str = "/Event/Details";

/// 拍卖场次
///
/// 以不透明的 `event_id` 标识，拥有按页码排列的列表页。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: String,
}

impl Event {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// 指定页码的列表页URL
    ///
    /// # 参数
    ///
    /// * `origin` - 站点来源，例如 `https://urbanauctions.ca`
    /// * `page` - 页码，从 0 开始
    pub fn listing_url(&self, origin: &str, page: u32) -> String {
        join_site_path(origin, &format!("{}/{}?page={}", EVENT_PATH, self.id, page))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
