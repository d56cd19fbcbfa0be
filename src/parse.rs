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

//! Line-oriented parser for the PO text format.
//!
//! Strings stay in their escaped form: the two characters `\n` in the
//! file are the two characters `\n` in memory. Quoted lines contribute
//! the verbatim text between their outer quotes, and adjacent string
//! lines concatenate. Parse errors are fatal and carry the 1-based line
//! number.

use anyhow::{anyhow, bail, Result};

use crate::catalog::{Catalog, CommentSet, Entry, PluralForm, PreviousMsgid, Translation};

/// Which multi-line string the next bare `"..."` line continues.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Section {
    #[default]
    None,
    Context,
    Id,
    IdPlural,
    Translation,
    PluralTranslation,
    PreviousContext,
    PreviousId,
    PreviousIdPlural,
}

impl Section {
    fn in_translation(self) -> bool {
        matches!(self, Section::Translation | Section::PluralTranslation)
    }

    fn in_previous(self) -> bool {
        matches!(
            self,
            Section::PreviousContext | Section::PreviousId | Section::PreviousIdPlural
        )
    }
}

/// An entry being accumulated line by line.
#[derive(Default)]
struct Draft {
    comments: CommentSet,
    previous: PreviousMsgid,
    fuzzy: bool,
    c_format: bool,
    context: Option<String>,
    id: Option<String>,
    id_plural: Option<String>,
    singular: Option<String>,
    plural: Vec<PluralForm>,
    obsolete: bool,
    section: Section,
}

impl Draft {
    fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.context.is_none()
            && self.singular.is_none()
            && self.plural.is_empty()
            && self.previous.is_empty()
            && self.comments == CommentSet::default()
    }

    /// Finish the current entry and append it to `catalog`.
    fn flush(&mut self, catalog: &mut Catalog, lineno: usize) -> Result<()> {
        let draft = std::mem::take(self);
        if draft.is_empty() {
            return Ok(());
        }
        let Some(id) = draft.id else {
            bail!("line {lineno}: comments or fields without a msgid");
        };

        let translation = if !draft.plural.is_empty() {
            if draft.id_plural.is_none() {
                bail!("line {lineno}: msgstr[N] without msgid_plural");
            }
            Translation::Plural(draft.plural)
        } else if let Some(text) = draft.singular {
            if draft.id_plural.is_some() {
                bail!("line {lineno}: msgid_plural needs msgstr[N] translations");
            }
            Translation::Singular(text)
        } else {
            bail!("line {lineno}: entry without msgstr");
        };

        let entry = Entry {
            comments: draft.comments,
            previous: draft.previous,
            fuzzy: draft.fuzzy,
            c_format: draft.c_format,
            context: draft.context,
            id,
            id_plural: draft.id_plural,
            translation,
        };
        if draft.obsolete {
            catalog.obsolete.push(entry);
        } else {
            catalog.active.push(entry);
        }
        Ok(())
    }

    /// Handle a keyword or continuation-string line, with the obsolete
    /// marker already stripped.
    fn handle_statement(
        &mut self,
        catalog: &mut Catalog,
        line: &str,
        obsolete: bool,
        lineno: usize,
    ) -> Result<()> {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix("msgid_plural") {
            if !matches!(self.section, Section::Id) {
                bail!("line {lineno}: msgid_plural without a preceding msgid");
            }
            self.id_plural = Some(String::from(quoted(rest, lineno)?));
            self.section = Section::IdPlural;
        } else if let Some(rest) = line.strip_prefix("msgid") {
            // A msgid after a translation starts the next entry.
            if self.section.in_translation() {
                self.flush(catalog, lineno)?;
            }
            if self.id.is_some() {
                bail!("line {lineno}: duplicate msgid");
            }
            self.id = Some(String::from(quoted(rest, lineno)?));
            self.section = Section::Id;
        } else if let Some(rest) = line.strip_prefix("msgctxt") {
            if self.section.in_translation() {
                self.flush(catalog, lineno)?;
            }
            if self.context.is_some() || self.id.is_some() {
                bail!("line {lineno}: msgctxt must come first in an entry");
            }
            self.context = Some(String::from(quoted(rest, lineno)?));
            self.section = Section::Context;
        } else if let Some(rest) = line.strip_prefix("msgstr[") {
            let Some((index, rest)) = rest.split_once(']') else {
                bail!("line {lineno}: malformed msgstr[N] line");
            };
            let index: u32 = index
                .parse()
                .map_err(|_| anyhow!("line {lineno}: malformed plural index {index:?}"))?;
            if self.id.is_none() {
                bail!("line {lineno}: msgstr[N] without msgid");
            }
            if self.singular.is_some() {
                bail!("line {lineno}: entry mixes msgstr and msgstr[N]");
            }
            self.plural.push(PluralForm {
                index,
                text: String::from(quoted(rest, lineno)?),
            });
            self.section = Section::PluralTranslation;
        } else if let Some(rest) = line.strip_prefix("msgstr") {
            if self.id.is_none() {
                bail!("line {lineno}: msgstr without msgid");
            }
            if self.singular.is_some() || !self.plural.is_empty() {
                bail!("line {lineno}: duplicate msgstr");
            }
            self.singular = Some(String::from(quoted(rest, lineno)?));
            self.section = Section::Translation;
        } else if line.starts_with('"') {
            self.append_string(quoted(line, lineno)?, lineno)?;
        } else {
            bail!("line {lineno}: unrecognized line {line:?}");
        }
        if obsolete {
            self.obsolete = true;
        }
        Ok(())
    }

    /// Handle a `#|` (or `#~|`) previous-msgid line, with the prefix
    /// already stripped.
    fn handle_previous(
        &mut self,
        catalog: &mut Catalog,
        line: &str,
        obsolete: bool,
        lineno: usize,
    ) -> Result<()> {
        if self.section.in_translation() {
            self.flush(catalog, lineno)?;
        }
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix("msgid_plural") {
            if self.previous.id_plural.is_some() {
                bail!("line {lineno}: duplicate #| msgid_plural");
            }
            self.previous.id_plural = Some(String::from(quoted(rest, lineno)?));
            self.section = Section::PreviousIdPlural;
        } else if let Some(rest) = line.strip_prefix("msgid") {
            if self.previous.id.is_some() {
                bail!("line {lineno}: duplicate #| msgid");
            }
            self.previous.id = Some(String::from(quoted(rest, lineno)?));
            self.section = Section::PreviousId;
        } else if let Some(rest) = line.strip_prefix("msgctxt") {
            if self.previous.context.is_some() {
                bail!("line {lineno}: duplicate #| msgctxt");
            }
            self.previous.context = Some(String::from(quoted(rest, lineno)?));
            self.section = Section::PreviousContext;
        } else if line.starts_with('"') {
            if !self.section.in_previous() {
                bail!("line {lineno}: #| string continuation without a keyword");
            }
            self.append_string(quoted(line, lineno)?, lineno)?;
        } else {
            bail!("line {lineno}: unrecognized #| line {line:?}");
        }
        if obsolete {
            self.obsolete = true;
        }
        Ok(())
    }

    /// Handle a comment line, with the leading `#` already stripped.
    fn handle_comment(&mut self, catalog: &mut Catalog, rest: &str, lineno: usize) -> Result<()> {
        // A comment after a translation belongs to the next entry.
        if self.section.in_translation() {
            self.flush(catalog, lineno)?;
        }
        match rest.chars().next() {
            Some(':') => self.comments.positions.push(String::from(&rest[1..])),
            Some(',') => {
                let flags = &rest[1..];
                for flag in flags.split(',') {
                    match flag.trim() {
                        "fuzzy" => self.fuzzy = true,
                        "c-format" => self.c_format = true,
                        _ => {}
                    }
                }
                self.comments.flags.push(String::from(flags));
            }
            None | Some(' ') => self.comments.standard.push(String::from(rest)),
            Some(_) => self.comments.other.push(String::from(rest)),
        }
        Ok(())
    }

    /// Append a continuation string to the field the current section
    /// points at.
    fn append_string(&mut self, text: &str, lineno: usize) -> Result<()> {
        let target = match self.section {
            Section::Context => self.context.as_mut(),
            Section::Id => self.id.as_mut(),
            Section::IdPlural => self.id_plural.as_mut(),
            Section::Translation => self.singular.as_mut(),
            Section::PluralTranslation => self.plural.last_mut().map(|form| &mut form.text),
            Section::PreviousContext => self.previous.context.as_mut(),
            Section::PreviousId => self.previous.id.as_mut(),
            Section::PreviousIdPlural => self.previous.id_plural.as_mut(),
            Section::None => None,
        };
        match target {
            Some(buffer) => {
                buffer.push_str(text);
                Ok(())
            }
            None => bail!("line {lineno}: string continuation without a preceding keyword"),
        }
    }
}

/// Extract the text between the outer quotes of a string token.
fn quoted(text: &str, lineno: usize) -> Result<&str> {
    let text = text.trim();
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| anyhow!("line {lineno}: expected a quoted string, got {text:?}"))
}

/// Parse PO text into a [`Catalog`].
pub fn parse(input: &str) -> Result<Catalog> {
    let mut catalog = Catalog::default();
    let mut draft = Draft::default();
    let mut lineno = 0;
    for (index, line) in input.lines().enumerate() {
        lineno = index + 1;
        let line = line.trim_end();
        if line.is_empty() {
            draft.flush(&mut catalog, lineno)?;
        } else if let Some(rest) = line.strip_prefix("#~|") {
            draft.handle_previous(&mut catalog, rest, true, lineno)?;
        } else if let Some(rest) = line.strip_prefix("#~") {
            draft.handle_statement(&mut catalog, rest, true, lineno)?;
        } else if let Some(rest) = line.strip_prefix("#|") {
            draft.handle_previous(&mut catalog, rest, false, lineno)?;
        } else if let Some(rest) = line.strip_prefix('#') {
            draft.handle_comment(&mut catalog, rest, lineno)?;
        } else {
            draft.handle_statement(&mut catalog, line, false, lineno)?;
        }
    }
    draft.flush(&mut catalog, lineno + 1)?;
    Ok(catalog)
}
