// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据源抽象
///
/// 定义数据源失败分类与诊断状态
pub mod source;

pub use source::{SourceError, SourceOutcome, SourceStatus};
