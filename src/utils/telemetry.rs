// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 默认日志过滤规则，可通过 `RUST_LOG` 覆盖
pub const DEFAULT_FILTER: &str = "info,lotcrawl=info";

/// 初始化日志系统
///
/// 所有诊断输出（进度、警告、错误）都写入标准错误，
/// 标准输出只保留 CSV 数据。
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// 初始化日志系统（允许重复调用）
///
/// 测试中多个用例可能各自初始化，已存在全局订阅者时直接忽略。
pub fn try_init_telemetry() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(DEFAULT_FILTER))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
