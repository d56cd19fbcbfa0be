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

//! In-memory representation of a PO catalog.
//!
//! All strings are kept in their escaped source form: an embedded newline
//! is the two characters `\n`, a quote is `\"`, and so on. The parser and
//! the writer both work on this representation, which makes round-trips
//! exact and keeps the line-wrapping rules simple.

/// The comment lines attached to one entry, grouped by kind.
///
/// Each vector stores the line text *after* the prefix that classifies it
/// (`#`, `#:` or `#,`), in the order the lines appeared in the source
/// file. A translator comment `# note` is therefore stored as `" note"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentSet {
    /// Translator comments: `#` followed by a space (or nothing).
    pub standard: Vec<String>,
    /// Source references: `#:`.
    pub positions: Vec<String>,
    /// Flag lines: `#,`.
    pub flags: Vec<String>,
    /// Any remaining `#x` comment, such as extracted `#.` comments.
    pub other: Vec<String>,
}

/// The `#|` block recording what an entry looked like before its last
/// update. Each field is independently optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviousMsgid {
    /// Previous `msgctxt`.
    pub context: Option<String>,
    /// Previous `msgid`.
    pub id: Option<String>,
    /// Previous `msgid_plural`.
    pub id_plural: Option<String>,
}

impl PreviousMsgid {
    /// True if no previous field is recorded.
    pub fn is_empty(&self) -> bool {
        self.context.is_none() && self.id.is_none() && self.id_plural.is_none()
    }
}

/// One plural translation: the `N` and the text of a `msgstr[N]` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluralForm {
    /// Plural index, carried verbatim from the source file.
    pub index: u32,
    /// Translated text for this plural form.
    pub text: String,
}

/// The translation of an entry.
///
/// An entry is either singular (one `msgstr`) or plural (one or more
/// `msgstr[N]` lines); the parser guarantees a plural list is non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Translation {
    /// A plain `msgstr`.
    Singular(String),
    /// An ordered list of `msgstr[N]` forms.
    Plural(Vec<PluralForm>),
}

impl Translation {
    /// Whether every translation string is non-empty.
    ///
    /// A plural entry only counts as translated when *all* of its forms
    /// are filled in.
    pub fn is_translated(&self) -> bool {
        match self {
            Translation::Singular(text) => !text.is_empty(),
            Translation::Plural(forms) => forms.iter().all(|form| !form.text.is_empty()),
        }
    }
}

impl Default for Translation {
    fn default() -> Self {
        Translation::Singular(String::new())
    }
}

/// One catalog record.
///
/// The invariant `id_plural.is_some()` iff `translation` is plural is
/// upheld by the parser; entries are never built with a mixed state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    /// Comments attached to this entry.
    pub comments: CommentSet,
    /// The `#|` previous-msgid block, if any.
    pub previous: PreviousMsgid,
    /// Set when a `#,` line carries the `fuzzy` flag.
    pub fuzzy: bool,
    /// Set when a `#,` line carries the `c-format` flag.
    pub c_format: bool,
    /// Optional `msgctxt`.
    pub context: Option<String>,
    /// The `msgid`. The catalog header has an empty id.
    pub id: String,
    /// Optional `msgid_plural`.
    pub id_plural: Option<String>,
    /// The translation, singular or plural.
    pub translation: Translation,
}

impl Entry {
    /// Replace every field of `self` with a deep copy of `source`.
    ///
    /// This is the field-copy half of a merge: the caller has already
    /// matched the two entries by id, so the id is copied like any other
    /// field. Nothing is shared with `source` afterwards, which lets the
    /// caller discard the catalog that owns it.
    pub fn copy_fields_from(&mut self, source: &Entry) {
        *self = source.clone();
    }

    /// Whether every translation string is non-empty.
    pub fn is_translated(&self) -> bool {
        self.translation.is_translated()
    }

    /// True for the catalog header entry, which has an empty `msgid`.
    pub fn is_header(&self) -> bool {
        self.id.is_empty()
    }
}

/// A parsed PO file: active entries followed by obsolete (`#~`) entries.
///
/// Both sequences keep their file order. Filtering is stable and merging
/// mutates entries in place, so the order survives the whole pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Entries still present in the source scan.
    pub active: Vec<Entry>,
    /// Entries kept for reference under the `#~` marker.
    pub obsolete: Vec<Entry>,
}

impl Catalog {
    /// Replace every active translation with a copy of its `msgid`.
    ///
    /// Plural entries collapse to a single form with index 0.
    pub fn copy_msgid_to_translation(&mut self) {
        for entry in &mut self.active {
            entry.translation = match entry.translation {
                Translation::Singular(_) => Translation::Singular(entry.id.clone()),
                Translation::Plural(_) => Translation::Plural(vec![PluralForm {
                    index: 0,
                    text: entry.id.clone(),
                }]),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn singular(id: &str, text: &str) -> Entry {
        Entry {
            id: String::from(id),
            translation: Translation::Singular(String::from(text)),
            ..Entry::default()
        }
    }

    #[test]
    fn test_copy_fields_from_replaces_everything() {
        let mut target = Entry {
            comments: CommentSet {
                standard: vec![String::from(" old note")],
                ..CommentSet::default()
            },
            fuzzy: true,
            ..singular("greeting", "old")
        };
        let source = Entry {
            comments: CommentSet {
                positions: vec![String::from(" hello.c:1")],
                ..CommentSet::default()
            },
            previous: PreviousMsgid {
                id: Some(String::from("greetings")),
                ..PreviousMsgid::default()
            },
            context: Some(String::from("menu")),
            ..singular("greeting", "new")
        };

        target.copy_fields_from(&source);
        assert_eq!(target, source);
        assert!(!target.fuzzy);
        assert!(target.comments.standard.is_empty());
    }

    #[test]
    fn test_copy_fields_from_is_a_deep_copy() {
        let source = singular("greeting", "new");
        let mut target = singular("greeting", "old");
        target.copy_fields_from(&source);
        drop(source);
        assert_eq!(target.translation, Translation::Singular(String::from("new")));
    }

    #[test]
    fn test_is_translated() {
        assert!(singular("id", "text").is_translated());
        assert!(!singular("id", "").is_translated());

        let plural = |texts: &[&str]| Translation::Plural(
            texts
                .iter()
                .enumerate()
                .map(|(index, text)| PluralForm {
                    index: u32::try_from(index).unwrap(),
                    text: String::from(*text),
                })
                .collect(),
        );
        assert!(plural(&["one", "many"]).is_translated());
        assert!(!plural(&["one", ""]).is_translated());
        assert!(!plural(&["", ""]).is_translated());
    }

    #[test]
    fn test_copy_msgid_singular() {
        let mut catalog = Catalog {
            active: vec![singular("hello", "")],
            ..Catalog::default()
        };
        catalog.copy_msgid_to_translation();
        assert_eq!(
            catalog.active[0].translation,
            Translation::Singular(String::from("hello"))
        );
    }

    #[test]
    fn test_copy_msgid_collapses_plural() {
        let mut catalog = Catalog {
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
        catalog.copy_msgid_to_translation();
        assert_eq!(
            catalog.active[0].translation,
            Translation::Plural(vec![PluralForm {
                index: 0,
                text: String::from("%d file"),
            }])
        );
    }

    #[test]
    fn test_copy_msgid_skips_obsolete_entries() {
        let mut catalog = Catalog {
            active: Vec::new(),
            obsolete: vec![singular("gone", "weg")],
        };
        catalog.copy_msgid_to_translation();
        assert_eq!(
            catalog.obsolete[0].translation,
            Translation::Singular(String::from("weg"))
        );
    }
}
