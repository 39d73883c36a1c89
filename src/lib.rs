// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod calendar;
pub mod chart;
pub mod cli;
pub mod commands;
pub mod models;
pub mod sample;
pub mod schema;
pub mod summary;
pub mod utils;
