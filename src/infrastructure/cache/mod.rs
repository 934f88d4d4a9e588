// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 缓存模块
///
/// 进程内的按公司链接缓存
pub mod link_cache;

pub use link_cache::LinkCache;
