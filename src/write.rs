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

//! Rendering a catalog back to PO text.
//!
//! Long strings are word-wrapped into the PO line-continuation dialect:
//! an empty `""` header line followed by quoted continuation lines, each
//! kept within the canonical 80-column right margin. The wrapping rules
//! reproduce the format's width and line-break behavior exactly, so
//! unchanged catalogs round-trip byte-for-byte.

use std::io::{self, Write};

use crate::catalog::{Catalog, Entry, Translation};

/// Right margin for the single-line fast path.
const RIGHT_MARGIN: usize = 80;

/// Column budget for a continuation line, excluding its quotes.
const MAX_LINE: usize = 77;

/// The two-character escape marking an embedded newline. Strings are
/// stored in escaped form, so this never matches a real newline.
const EOL: &str = "\\n";

/// Output parts that can be suppressed independently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Omit `msgctxt` lines.
    pub no_context: bool,
    /// Omit `msgid` and `msgid_plural` lines.
    pub no_id: bool,
    /// Omit the whole translation block.
    pub no_translation: bool,
    /// Omit translator (`#`) comments.
    pub no_standard_comments: bool,
    /// Omit source-reference (`#:`) comments.
    pub no_position_comments: bool,
    /// Omit flag (`#,`) comments.
    pub no_flag_comments: bool,
    /// Omit the remaining comment lines, such as extracted `#.` comments.
    pub no_other_comments: bool,
    /// Omit previous-msgid (`#|`) blocks.
    pub no_previous: bool,
    /// Emit `msgstr ""` in place of the stored translation.
    pub empty_translation: bool,
    /// Collapse line numbers in source references to `1`, so catalogs
    /// differing only by line numbers compare as textually identical.
    pub normalize_line_numbers: bool,
}

/// Write `catalog` as PO text.
///
/// Active entries come first, in order, separated by single blank lines.
/// A non-empty obsolete block follows after one blank line, with every
/// keyword line prefixed by `#~ `.
pub fn write_catalog<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    options: &WriteOptions,
) -> io::Result<()> {
    for (position, entry) in catalog.active.iter().enumerate() {
        if position > 0 {
            writeln!(out)?;
        }
        write_entry(out, entry, false, options)?;
    }

    if !catalog.obsolete.is_empty() {
        writeln!(out)?;
    }
    for (position, entry) in catalog.obsolete.iter().enumerate() {
        if position > 0 {
            writeln!(out)?;
        }
        write_entry(out, entry, true, options)?;
    }
    Ok(())
}

fn write_entry<W: Write>(
    out: &mut W,
    entry: &Entry,
    obsolete: bool,
    options: &WriteOptions,
) -> io::Result<()> {
    let prefix = if obsolete { "#~ " } else { "" };

    if !options.no_standard_comments {
        for line in &entry.comments.standard {
            writeln!(out, "#{line}")?;
        }
    }
    if !options.no_other_comments {
        for line in &entry.comments.other {
            writeln!(out, "#{line}")?;
        }
    }
    // Obsolete entries carry no meaningful source references.
    if !obsolete && !options.no_position_comments {
        for line in &entry.comments.positions {
            if options.normalize_line_numbers {
                writeln!(out, "#:{}", normalize_line_numbers(line))?;
            } else {
                writeln!(out, "#:{line}")?;
            }
        }
    }
    if !options.no_flag_comments {
        for line in &entry.comments.flags {
            writeln!(out, "#,{line}")?;
        }
    }
    if !options.no_previous {
        write_previous(out, entry, obsolete)?;
    }
    if !options.no_context {
        if let Some(context) = &entry.context {
            write!(out, "{prefix}msgctxt ")?;
            write_wrapped(out, context, prefix.len() + 8, prefix)?;
        }
    }
    if !options.no_id {
        write!(out, "{prefix}msgid ")?;
        write_wrapped(out, &entry.id, prefix.len() + 6, prefix)?;
        if let Some(plural) = &entry.id_plural {
            write!(out, "{prefix}msgid_plural ")?;
            write_wrapped(out, plural, prefix.len() + 13, prefix)?;
        }
    }
    if !options.no_translation {
        write_translation(out, entry, prefix, options)?;
    }
    Ok(())
}

fn write_previous<W: Write>(out: &mut W, entry: &Entry, obsolete: bool) -> io::Result<()> {
    let prefix = if obsolete { "#~| " } else { "#| " };

    if let Some(context) = &entry.previous.context {
        write!(out, "{prefix}msgctxt ")?;
        write_wrapped(out, context, prefix.len() + 8, prefix)?;
    }
    if let Some(id) = &entry.previous.id {
        write!(out, "{prefix}msgid ")?;
        write_wrapped(out, id, prefix.len() + 6, prefix)?;
    }
    if let Some(plural) = &entry.previous.id_plural {
        write!(out, "{prefix}msgid_plural ")?;
        write_wrapped(out, plural, prefix.len() + 13, prefix)?;
    }
    Ok(())
}

fn write_translation<W: Write>(
    out: &mut W,
    entry: &Entry,
    prefix: &str,
    options: &WriteOptions,
) -> io::Result<()> {
    if options.empty_translation {
        writeln!(out, "{prefix}msgstr \"\"")?;
        return Ok(());
    }
    match &entry.translation {
        Translation::Singular(text) => {
            write!(out, "{prefix}msgstr ")?;
            write_wrapped(out, text, prefix.len() + 7, prefix)?;
        }
        Translation::Plural(forms) => {
            for form in forms {
                write!(out, "{prefix}msgstr[{}] ", form.index)?;
                write_wrapped(out, &form.text, prefix.len() + 10, prefix)?;
            }
        }
    }
    Ok(())
}

/// Rewrite a source-reference comment with canonical line numbers.
///
/// After every `:` a single `1` is emitted and the digit run that
/// followed the colon (if any) is dropped. All other characters pass
/// through unchanged.
fn normalize_line_numbers(line: &str) -> String {
    let mut normalized = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' {
            normalized.push(':');
            normalized.push('1');
            while chars.peek().is_some_and(char::is_ascii_digit) {
                chars.next();
            }
        } else {
            normalized.push(c);
        }
    }
    normalized
}

fn is_separator(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Write one quoted PO string, wrapping it over continuation lines.
///
/// `start_offset` is the number of columns already used on the current
/// output line (the keyword plus any prefix) and `prefix` is prepended
/// to every continuation line.
///
/// A string with no embedded `\n` escape (except possibly a final one)
/// that fits within the right margin is written directly after the
/// keyword. Everything else gets a `""` header line and is split on the
/// `\n` escapes; each resulting segment is wrapped greedily in units of
/// one word plus its trailing separators, so a line never exceeds the
/// budget unless a single unit is itself oversized. A trailing `\n`
/// escape reserves its two columns while wrapping.
fn write_wrapped<W: Write>(
    out: &mut W,
    s: &str,
    start_offset: usize,
    prefix: &str,
) -> io::Result<()> {
    let single_segment = match s.find(EOL) {
        None => true,
        Some(position) => position + EOL.len() == s.len(),
    };
    if single_segment && s.len() + 2 + start_offset < RIGHT_MARGIN {
        writeln!(out, "\"{s}\"")?;
        return Ok(());
    }

    writeln!(out, "\"\"")?;
    let has_final_eol = s.ends_with(EOL);
    let segments: Vec<&str> = s.split(EOL).collect();
    for (position, segment) in segments.iter().enumerate() {
        let last = position + 1 == segments.len();
        if last && segment.is_empty() {
            // The string ended on a `\n` escape, which already closed
            // the previous line.
            continue;
        }
        let line_has_eol = !last || has_final_eol;

        write!(out, "{prefix}\"")?;
        let mut offset = prefix.len();
        let bytes = segment.as_bytes();
        let mut cur = 0;
        loop {
            let mut end = cur;
            while end < bytes.len() && !is_separator(bytes[end]) {
                end += 1;
            }
            while end < bytes.len() && is_separator(bytes[end]) {
                end += 1;
            }
            let word_len = end - cur;
            // The final unit of the segment must leave room for the
            // trailing `\n` escape, unless it already ends in a
            // separator.
            let eol_len = if line_has_eol
                && end == bytes.len()
                && (end == cur || !is_separator(bytes[end - 1]))
            {
                EOL.len()
            } else {
                0
            };
            if offset + word_len + eol_len > MAX_LINE {
                write!(out, "\"\n{prefix}\"")?;
                offset = prefix.len();
            }
            out.write_all(&bytes[cur..end])?;
            offset += word_len;
            cur = end;
            if cur == bytes.len() {
                break;
            }
        }
        if line_has_eol {
            if offset + EOL.len() > MAX_LINE {
                write!(out, "\"\n{prefix}\"{EOL}")?;
            } else {
                write!(out, "{EOL}")?;
            }
        }
        writeln!(out, "\"")?;
    }
    Ok(())
}
