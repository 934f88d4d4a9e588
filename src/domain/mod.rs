// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：链接与人工提交记录
/// - 仓库接口（repositories）：外部协作方的抽象
/// - 数据源结果（search）：数据源边界上的错误与诊断信息
/// - 服务（services）：公司键与聚合服务
pub mod models;
pub mod repositories;
pub mod search;
pub mod services;
