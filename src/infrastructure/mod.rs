// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 缓存（cache）：按公司键的进程内链接缓存
/// - 可观测性（observability）：指标注册与导出
/// - 仓库实现（repositories）：领域仓库接口的内存实现
/// - 数据源（search）：各类链接数据源与装配
///
/// 基础设施层依赖于领域层的抽象接口，领域层不感知具体实现。
pub mod cache;
pub mod observability;
pub mod repositories;
pub mod search;
