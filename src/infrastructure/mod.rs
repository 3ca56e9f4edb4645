// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 负责把结果集写出到外部介质：
/// - 报告（report）：CSV 与 JSON 输出
pub mod report;
