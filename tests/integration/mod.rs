// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod helpers;
pub mod link_service_test;
pub mod site_candidates_test;
pub mod sitemap_test;
pub mod template_source_test;
