// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 站点默认来源
pub const DEFAULT_BASE_URL: &str = "https://urbanauctions.ca";

/// 解析站点基础地址，返回不带末尾斜杠的来源字符串
///
/// `https://urbanauctions.ca/` 与 `https://urbanauctions.ca` 都得到
/// `https://urbanauctions.ca`。
pub fn site_origin(base_url: &str) -> Result<String, ParseError> {
    let url = Url::parse(base_url)?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// 将以 `/` 开头的站内路径拼接到来源之后
///
/// 直接做字符串前缀拼接，不对路径做规范化，
/// 与站点链接中出现的原始 href 保持一致。
pub fn join_site_path(origin: &str, path: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), path)
}
