// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含链接模型、公司键、聚合服务和仓库接口
pub mod domain;

/// 引擎模块
///
/// 所有数据源共用的 HTTP 抓取能力
pub mod engines;

/// 基础设施模块
///
/// 数据源实现、缓存、内存仓库与指标
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
