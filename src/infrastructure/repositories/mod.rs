// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod cats_mongo_repo_impl;
pub mod cats_repo_impl;
pub mod mongo_repository;
