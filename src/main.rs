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

use anyhow::Context;
use clap::Parser;
use lotcrawl::application::use_cases::crawl_event_use_case::CrawlEventUseCase;
use lotcrawl::config::settings::Settings;
use lotcrawl::domain::models::event::Event;
use lotcrawl::engines::reqwest_engine::ReqwestEngine;
use lotcrawl::infrastructure::report::{CsvReporter, JsonReporter};
use lotcrawl::presentation::cli::Cli;
use lotcrawl::utils::telemetry;
use tracing::info;

/// 主函数
///
/// 解析参数、加载配置，爬取场次并输出 CSV（以及可选的 JSON）
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging goes to stderr so stdout stays pure CSV
    telemetry::init_telemetry();
    let cli = Cli::parse();

    // 2. Load configuration, command line wins
    let mut settings = Settings::new().context("Failed to load configuration")?;
    cli.apply(&mut settings);
    settings.validate().context("Invalid configuration")?;

    // 3. Build the pipeline
    let engine = ReqwestEngine::new(&settings.http).context("Failed to build HTTP client")?;
    let use_case = CrawlEventUseCase::from_settings(engine, &settings)?;
    let event = Event::new(cli.event_id.as_str());
    info!(event = %event, base_url = %settings.site.base_url, "Starting lotcrawl");

    // 4. Crawl
    let report = use_case
        .run(&event)
        .await
        .with_context(|| format!("Crawl of event {} failed", event))?;

    // 5. Write reports
    if let Some(path) = &cli.json {
        JsonReporter::write_file(&report.results, path)
            .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    }
    let stdout = std::io::stdout();
    CsvReporter::write(&report.results, stdout.lock())
        .with_context(|| format!("Failed to write CSV for event {}", event))?;

    Ok(())
}
