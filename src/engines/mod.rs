// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 引擎模块
///
/// 提供所有数据源共用的 HTTP 抓取能力
pub mod reqwest_engine;
pub mod traits;
