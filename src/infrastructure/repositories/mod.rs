// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口的具体实现
pub mod memory_submission_repo;
pub mod static_domain_map;

pub use memory_submission_repo::InMemorySubmissionRepository;
pub use static_domain_map::StaticDomainMap;
