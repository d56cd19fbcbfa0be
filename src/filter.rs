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

//! Dropping catalog entries by translation, fuzzy or obsolete status.

use crate::catalog::{Catalog, Entry};

/// The filters that can be applied to a catalog.
///
/// The variants are declared in application order: when several filters
/// are enabled they run as successive passes in this order, each pass
/// working on the survivors of the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Keep entries carrying the `fuzzy` flag.
    Fuzzy,
    /// Keep entries without the `fuzzy` flag.
    NotFuzzy,
    /// Keep entries whose translation strings are all non-empty.
    Translated,
    /// Keep entries with at least one empty translation string.
    NotTranslated,
    /// Like [`Filter::NotTranslated`], but the header entry always
    /// matches, so it is kept or dropped together with the real
    /// untranslated entries.
    NotTranslatedOrHeader,
    /// Drop the obsolete entries; active entries are untouched.
    Obsolete,
    /// Drop the active entries; obsolete entries are untouched.
    NotObsolete,
}

/// The set of enabled filters.
///
/// Enabling order does not matter: [`apply_filters`] always runs the
/// passes in the fixed order of the [`Filter`] variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterSet {
    fuzzy: bool,
    not_fuzzy: bool,
    translated: bool,
    not_translated: bool,
    not_translated_or_header: bool,
    obsolete: bool,
    not_obsolete: bool,
}

impl FilterSet {
    /// Enable `filter`. Enabling a filter twice is the same as enabling
    /// it once.
    pub fn enable(&mut self, filter: Filter) {
        match filter {
            Filter::Fuzzy => self.fuzzy = true,
            Filter::NotFuzzy => self.not_fuzzy = true,
            Filter::Translated => self.translated = true,
            Filter::NotTranslated => self.not_translated = true,
            Filter::NotTranslatedOrHeader => self.not_translated_or_header = true,
            Filter::Obsolete => self.obsolete = true,
            Filter::NotObsolete => self.not_obsolete = true,
        }
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        let mut set = FilterSet::default();
        for filter in iter {
            set.enable(filter);
        }
        set
    }
}

/// Apply the enabled filters to `catalog`.
///
/// Predicate passes run over both the active and the obsolete sequence
/// (obsolete entries have the same shape, so the predicates apply
/// uniformly) and keep the relative order of the survivors. An empty
/// result is fine; there is no error condition.
pub fn apply_filters(catalog: &mut Catalog, filters: &FilterSet) {
    if filters.fuzzy {
        retain_entries(catalog, |entry| entry.fuzzy);
    }
    if filters.not_fuzzy {
        retain_entries(catalog, |entry| !entry.fuzzy);
    }
    if filters.translated {
        retain_entries(catalog, Entry::is_translated);
    }
    if filters.not_translated {
        retain_entries(catalog, |entry| !entry.is_translated());
    }
    if filters.not_translated_or_header {
        retain_entries(catalog, |entry| {
            entry.is_header() || !entry.is_translated()
        });
    }
    if filters.obsolete {
        catalog.obsolete.clear();
    }
    if filters.not_obsolete {
        catalog.active.clear();
    }
}

fn retain_entries(catalog: &mut Catalog, keep: impl Fn(&Entry) -> bool) {
    catalog.active.retain(&keep);
    catalog.obsolete.retain(&keep);
}
