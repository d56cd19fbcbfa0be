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

//! Merging updated translations from a patch catalog into a base catalog.
//!
//! The merge is directional: field values flow from the patch into the
//! base, the base keeps its structure. Filtering and the copy-msgid
//! transform are applied to the patch by the caller before merging.

use std::collections::HashMap;

use crate::catalog::{Catalog, Entry};

/// Map each entry's id to its position in the sequence.
///
/// Built once, before any mutation, so that copying an id during the
/// update pass can never re-key the lookup. When two entries share an id
/// the later one wins the slot; the parser is expected to keep ids
/// unique, and this is not validated here.
fn build_index(entries: &[Entry]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        index.insert(entry.id.clone(), position);
    }
    index
}

/// Copy fields from every matching patch entry into `base`.
///
/// Each active patch entry is looked up in `base.active` by id. On a
/// match, all fields of the base entry are replaced with deep copies of
/// the patch entry's fields; the base entry keeps its position, so the
/// merged catalog serializes in the base's original order. Unmatched
/// patch ids are returned for the caller to report; they never abort the
/// merge. `base.obsolete` and the patch's own obsolete entries are
/// ignored.
pub fn update(base: &mut Catalog, patch: &Catalog) -> Vec<String> {
    let index = build_index(&base.active);

    let mut unmatched = Vec::new();
    for entry in &patch.active {
        match index.get(entry.id.as_str()) {
            Some(&position) => base.active[position].copy_fields_from(entry),
            None => unmatched.push(entry.id.clone()),
        }
    }
    unmatched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CommentSet, Translation};
    use pretty_assertions::assert_eq;

    fn entry(id: &str, text: &str) -> Entry {
        Entry {
            id: String::from(id),
            translation: Translation::Singular(String::from(text)),
            ..Entry::default()
        }
    }

    #[test]
    fn test_matching_entry_is_updated_in_place() {
        let mut base = Catalog {
            active: vec![entry("a", "1"), entry("x", "old"), entry("b", "2")],
            ..Catalog::default()
        };
        let patch = Catalog {
            active: vec![Entry {
                fuzzy: true,
                comments: CommentSet {
                    standard: vec![String::from(" updated")],
                    ..CommentSet::default()
                },
                ..entry("x", "new")
            }],
            ..Catalog::default()
        };

        let unmatched = update(&mut base, &patch);
        assert!(unmatched.is_empty());
        // Position and identity are kept, fields are replaced.
        assert_eq!(base.active[1], patch.active[0]);
        assert_eq!(base.active[0], entry("a", "1"));
        assert_eq!(base.active[2], entry("b", "2"));
    }

    #[test]
    fn test_unmatched_patch_entry_is_reported_not_applied() {
        let mut base = Catalog {
            active: vec![entry("x", "old")],
            ..Catalog::default()
        };
        let before = base.clone();
        let patch = Catalog {
            active: vec![entry("y", "new")],
            ..Catalog::default()
        };

        let unmatched = update(&mut base, &patch);
        assert_eq!(unmatched, vec![String::from("y")]);
        assert_eq!(base, before);
    }

    #[test]
    fn test_base_obsolete_entries_are_untouched() {
        let mut base = Catalog {
            active: vec![entry("x", "old")],
            obsolete: vec![entry("x", "older")],
        };
        let patch = Catalog {
            active: vec![entry("x", "new")],
            obsolete: vec![entry("x", "patch obsolete")],
        };

        update(&mut base, &patch);
        assert_eq!(base.active[0], entry("x", "new"));
        assert_eq!(base.obsolete, vec![entry("x", "older")]);
    }

    #[test]
    fn test_patch_obsolete_entries_are_ignored() {
        let mut base = Catalog {
            active: vec![entry("x", "old")],
            ..Catalog::default()
        };
        let patch = Catalog {
            active: Vec::new(),
            obsolete: vec![entry("x", "new")],
        };

        let unmatched = update(&mut base, &patch);
        assert!(unmatched.is_empty());
        assert_eq!(base.active[0], entry("x", "old"));
    }

    #[test]
    fn test_duplicate_base_id_last_one_wins() {
        let mut base = Catalog {
            active: vec![entry("x", "first"), entry("x", "second")],
            ..Catalog::default()
        };
        let patch = Catalog {
            active: vec![entry("x", "new")],
            ..Catalog::default()
        };

        update(&mut base, &patch);
        assert_eq!(base.active[0], entry("x", "first"));
        assert_eq!(base.active[1], entry("x", "new"));
    }

    #[test]
    fn test_plural_patch_replaces_singular_base_fields() {
        use crate::catalog::PluralForm;

        let mut base = Catalog {
            active: vec![entry("%d file", "old")],
            ..Catalog::default()
        };
        let patch = Catalog {
            active: vec![Entry {
                id: String::from("%d file"),
                id_plural: Some(String::from("%d files")),
                translation: Translation::Plural(vec![
                    PluralForm {
                        index: 0,
                        text: String::from("%d Datei"),
                    },
                    PluralForm {
                        index: 1,
                        text: String::from("%d Dateien"),
                    },
                ]),
                ..Entry::default()
            }],
            ..Catalog::default()
        };

        update(&mut base, &patch);
        assert_eq!(base.active[0], patch.active[0]);
    }
}
