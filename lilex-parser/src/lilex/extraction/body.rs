//! Body of an entry: diagrams, references and the normalized description.

use std::collections::HashSet;

use crate::lilex::lexing::{matching_close, tokenize, Token};
use crate::lilex::model::Diagram;
use crate::lilex::normalization::{collapse_whitespace, normalize_name, TextBuilder};
use crate::lilex::rules::RuleSet;

#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct Body {
    pub description: String,
    pub references: Vec<String>,
    pub diagrams: Vec<Diagram>,
}

/// Parse body lines. `first` is the heading remainder, which is never a diagram row.
///
/// A run of diagram rows without a live cell (an indented `...`) stays in the text.
pub(super) fn parse_body<'a>(first: Option<&'a str>, lines: &[&'a str], rules: &RuleSet) -> Body {
    let mut text_lines: Vec<&str> = first.into_iter().collect();
    let mut diagrams = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for &line in lines {
        if rules.is_diagram_row(line) {
            run.push(line);
            continue;
        }
        flush_run(&mut run, &mut diagrams, &mut text_lines, rules);
        text_lines.push(line);
    }
    flush_run(&mut run, &mut diagrams, &mut text_lines, rules);

    let (description, references) = scan_text(&text_lines.join("\n"), rules);
    Body {
        description,
        references,
        diagrams,
    }
}

fn flush_run<'a>(
    run: &mut Vec<&'a str>,
    diagrams: &mut Vec<Diagram>,
    text_lines: &mut Vec<&'a str>,
    rules: &RuleSet,
) {
    if run.is_empty() {
        return;
    }
    if run.iter().any(|row| rules.has_live_cell(row)) {
        diagrams.push(Diagram {
            rows: run.drain(..).map(|row| row.trim().to_string()).collect(),
        });
    } else {
        text_lines.append(run);
    }
}

/// One pass over the description tokens, collapsing whitespace and collecting references.
fn scan_text(text: &str, rules: &RuleSet) -> (String, Vec<String>) {
    let pair = rules.reference();
    let tokens = tokenize(text);
    let mut builder = TextBuilder::new();
    let mut references = Vec::new();
    let mut seen = HashSet::new();

    let mut idx = 0;
    while idx < tokens.len() {
        let (token, span) = &tokens[idx];
        match token {
            Token::Whitespace | Token::Newline => builder.space(),
            Token::Bracket(c) if *c == pair.open => {
                let group = matching_close(&tokens, idx, pair).map(|close| {
                    let inner = &text[span.end..tokens[close].1.start];
                    (close, collapse_whitespace(inner))
                });
                match group {
                    Some((close, reference)) if !reference.is_empty() => {
                        if rules.strip_reference_delimiters() {
                            builder.word(&reference);
                        } else {
                            builder.word(&format!("{}{}{}", pair.open, reference, pair.close));
                        }
                        if seen.insert(normalize_name(&reference)) {
                            references.push(reference);
                        }
                        idx = close + 1;
                        continue;
                    }
                    _ => builder.word(&text[span.clone()]),
                }
            }
            _ => builder.word(&text[span.clone()]),
        }
        idx += 1;
    }

    (builder.finish(), references)
}
