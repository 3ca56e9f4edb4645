// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 抽取规则共用的文本处理函数

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// 将连续空白折叠为单个空格
///
/// 不做首尾裁剪，`"  Lot #   12 "` 得到 `" Lot # 12 "`。
pub fn normalize_ws(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// 取以空白分隔的最后一个词
pub fn last_token(text: &str) -> Option<&str> {
    text.split_whitespace().last()
}

/// 取以空白分隔的第一个词
pub fn first_token(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}
