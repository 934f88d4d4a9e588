// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 可观测性模块
///
/// 指标注册、Prometheus 导出与聚合过程中的计数
pub mod metrics;
