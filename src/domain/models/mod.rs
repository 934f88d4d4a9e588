// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 链接（link）：聚合输出的基本单元
/// - 提交链接（submitted_link）：人工提交并审核的链接记录
pub mod link;
pub mod submitted_link;
