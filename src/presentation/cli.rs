// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{ErrorPolicy, Settings};
use clap::Parser;
use std::path::PathBuf;

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "lotcrawl", version)]
#[command(about = "Crawl an auction event and print every lot as CSV on stdout")]
pub struct Cli {
    /// Event id, e.g. 4821 for /Event/Details/4821
    pub event_id: String,

    /// Also write the results as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Number of lot pages fetched at once
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub concurrency: Option<u64>,

    /// Skip lots that fail to download or extract instead of aborting
    #[arg(long)]
    pub skip_errors: bool,

    /// Keep the full description text instead of its last word
    #[arg(long)]
    pub full_desc: bool,

    /// Discover lots from the first listing page only
    #[arg(long)]
    pub legacy_first_page_only: bool,

    /// Site root, e.g. https://urbanauctions.ca
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

impl Cli {
    /// 用命令行参数覆盖配置
    ///
    /// 只覆盖显式给出的参数，其余保持配置文件和环境变量的取值。
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(base_url) = &self.base_url {
            settings.site.base_url = base_url.clone();
        }
        if let Some(n) = self.concurrency {
            settings.crawl.concurrency = n as usize;
        }
        if self.skip_errors {
            settings.crawl.on_error = ErrorPolicy::Skip;
        }
        if self.legacy_first_page_only {
            settings.crawl.legacy_first_page_only = true;
        }
        if self.full_desc {
            settings.extract.full_description = true;
        }
    }
}
