// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 编排拍品发现、字段提取与汇总的用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含场次、拍品等核心实体，以及链接发现、分页遍历和字段提取服务
pub mod domain;

/// 引擎模块
///
/// 页面获取抽象及其 HTTP 实现
pub mod engines;

/// 基础设施模块
///
/// CSV 与 JSON 报告输出
pub mod infrastructure;

/// 表示层模块
///
/// 命令行参数解析
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
