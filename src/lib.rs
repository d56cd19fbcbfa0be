// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Editing and merging of Gettext PO translation catalogs.
//!
//! The crate reads PO files into an in-memory [`Catalog`], drops entries
//! by translation/fuzzy/obsolete status, optionally copies each `msgid`
//! into its translation slot, merges updated translations from one
//! catalog into another by `msgid`, and renders the result back to PO
//! text with the format's canonical line wrapping.
//!
//! The pipeline is sequential: parse, filter, optionally merge, write.
//! See the `po-edit` binary for the command-line surface.

pub mod catalog;
pub mod filter;
pub mod merge;
pub mod parse;
pub mod write;

pub use catalog::{Catalog, Entry};
