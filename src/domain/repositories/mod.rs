// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 聚合服务依赖的外部协作方抽象，具体实现由基础设施层提供：
/// - 提交链接仓库（submission_repository）：人工提交并审核的链接
/// - 域名映射（domain_mapping）：公司名到官网域名的静态表
pub mod domain_mapping;
pub mod submission_repository;
