//! Header area of an entry: the leading attribute group and labelled field lines.

use std::collections::BTreeSet;

use crate::lilex::lexing::{matching_close, tokenize, Token};
use crate::lilex::normalization::{collapse_whitespace, normalize_name};
use crate::lilex::rules::RuleSet;

const OPENERS: &str = "([{<";
const CLOSERS: &str = ")]}>";

#[derive(Debug, Default)]
pub(super) struct Header<'a> {
    pub categories: BTreeSet<String>,
    pub aliases: BTreeSet<String>,
    /// Heading remainder left for the description, if it was not a header field
    pub rest: Option<&'a str>,
    /// Index of the first block line after the header area
    pub body_start: usize,
}

/// Parse the heading remainder and the labelled lines following the heading.
///
/// `lines[0]` is the heading line itself.
pub(super) fn parse_header<'a>(rest: &'a str, lines: &[&'a str], rules: &RuleSet) -> Header<'a> {
    let mut header = Header::default();

    let following = lines.get(1..).unwrap_or_default();
    let (rest, consumed) = split_attributes(rest, following, rules, &mut header.categories);
    if !field_line(rest, rules, &mut header) {
        header.rest = Some(rest);
    }

    header.body_start = 1 + consumed;
    for line in lines.iter().skip(header.body_start) {
        if !field_line(line, rules, &mut header) {
            break;
        }
        header.body_start += 1;
    }

    header
}

/// Consume a leading attribute group, adding its items to `categories`.
///
/// The group may be wrapped onto the `following` block lines. Returns the text after the group
/// and how many following lines it used up. Unclosed or absent groups leave the text untouched.
fn split_attributes<'a>(
    rest: &'a str,
    following: &[&'a str],
    rules: &RuleSet,
    categories: &mut BTreeSet<String>,
) -> (&'a str, usize) {
    let Some(pair) = rules.attributes() else {
        return (rest, 0);
    };
    if !rest.trim_start().starts_with(pair.open) {
        return (rest, 0);
    }

    // heading remainder and the following lines, with the offset each line starts at
    let mut text = rest.to_string();
    let mut starts = Vec::with_capacity(following.len());
    for line in following {
        text.push('\n');
        starts.push(text.len());
        text.push_str(line);
    }

    let tokens = tokenize(&text);
    let Some(open) = tokens.iter().position(|(token, _)| !token.is_whitespace()) else {
        return (rest, 0);
    };
    let Some(close) = matching_close(&tokens, open, pair) else {
        return (rest, 0);
    };

    let inner = &text[tokens[open].1.end..tokens[close].1.start];
    categories.extend(
        split_list(inner, rules.attribute_separators())
            .into_iter()
            .map(normalize_name)
            .filter(|item| !item.is_empty()),
    );

    let end = tokens[close].1.end;
    match starts.iter().rposition(|&start| start <= end) {
        Some(idx) => (&following[idx][end - starts[idx]..], idx + 1),
        None => (&rest[end..], 0),
    }
}

/// Record a labelled header line. Returns false if the line carries no known label.
fn field_line(line: &str, rules: &RuleSet, header: &mut Header<'_>) -> bool {
    if let Some(value) = rules.alias_field(line) {
        let reference = rules.reference();
        header.aliases.extend(
            split_list(value, rules.alias_separators())
                .into_iter()
                .map(|alias| {
                    let bare: String = alias
                        .chars()
                        .filter(|c| *c != reference.open && *c != reference.close)
                        .collect();
                    normalize_name(bare.trim().trim_end_matches('.'))
                })
                .filter(|alias| !alias.is_empty()),
        );
        true
    } else if let Some(value) = rules.category_field(line) {
        header.categories.extend(
            split_list(value, rules.category_separators())
                .into_iter()
                .map(|item| normalize_name(item.trim_end_matches('.')))
                .filter(|item| !item.is_empty()),
        );
        true
    } else {
        false
    }
}

/// Split on any of `separators` outside of bracket groups.
fn split_list<'a>(text: &'a str, separators: &[char]) -> Vec<&'a str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if OPENERS.contains(c) {
            depth += 1;
        } else if CLOSERS.contains(c) {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && separators.contains(&c) {
            items.push(&text[start..idx]);
            start = idx + c.len_utf8();
        }
    }
    items.push(&text[start..]);
    items
        .into_iter()
        .filter(|item| !collapse_whitespace(item).is_empty())
        .collect()
}
