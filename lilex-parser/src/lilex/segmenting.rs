//! Segmenting
//!
//!     The segmenter splits the lexicon text into [RawBlock]s, one per entry, without looking
//!     inside them. It works in two layers, much like the line grouping of a line-based lexer:
//!
//!     1. Line classification. Every line is tagged as blank, separator rule, heading,
//!        indented or plain text. See [LineKind].
//!
//!     2. Run grouping. Consecutive non-blank lines are grouped into runs. A run never crosses
//!        a heading or a separator rule, and (when the rules split on blank lines) never
//!        crosses a blank line either.
//!
//!     Runs are then folded into blocks with a small phase machine:
//!
//!         FrontMatter --heading--> Entries --separator--> Interstitial --heading--> Entries
//!
//!     Front matter (title, license, introduction) and interstitial material (section letters,
//!     the bibliography after the last rule) are skipped. Inside the entry area a run starting
//!     with a heading opens a new block, an indented headless run continues the current block,
//!     and any other headless run becomes a block of its own. The extractor rejects those.
//!
//!     Blocks borrow their text from the source; the segmenter never copies it.

use std::iter::Peekable;
use std::ops::Range;

use crate::lilex::rules::RuleSet;

const BOM: char = '\u{feff}';

/// A span of source lines belonging to one entry, before extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// 1-based line number of the first line
    pub start_line: usize,
    /// Byte range in the source, without the final line terminator
    pub span: Range<usize>,
    /// Verbatim text of the block
    pub text: &'a str,
}

/// Classification of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Separator,
    Heading,
    /// Starts with whitespace
    Indented,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    number: usize,
    span: Range<usize>,
    kind: LineKind,
}

/// Classify one line (without its terminator).
pub fn classify_line(line: &str, rules: &RuleSet) -> LineKind {
    if line.trim().is_empty() {
        LineKind::Blank
    } else if rules.is_separator(line) {
        LineKind::Separator
    } else if rules.is_heading(line) {
        LineKind::Heading
    } else if line.starts_with(char::is_whitespace) {
        LineKind::Indented
    } else {
        LineKind::Text
    }
}

/// Iterator over classified lines with byte spans.
struct Lines<'a> {
    source: &'a str,
    rules: &'a RuleSet,
    offset: usize,
    number: usize,
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.offset >= self.source.len() {
            return None;
        }
        let rest = &self.source[self.offset..];
        let (content_len, consumed) = match rest.find('\n') {
            Some(idx) => (idx, idx + 1),
            None => (rest.len(), rest.len()),
        };
        let content = rest[..content_len].trim_end_matches('\r');
        let start = self.offset;
        self.offset += consumed;
        self.number += 1;
        Some(Line {
            number: self.number,
            span: start..start + content.len(),
            kind: classify_line(content, self.rules),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    Headed,
    Headless { indented: bool },
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Run {
    kind: RunKind,
    start_line: usize,
    span: Range<usize>,
}

/// Groups lines into runs.
struct Runs<'a> {
    lines: Peekable<Lines<'a>>,
    split_on_blank_lines: bool,
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let first = loop {
            let line = self.lines.next()?;
            if line.kind != LineKind::Blank {
                break line;
            }
        };
        let kind = match first.kind {
            LineKind::Separator => {
                return Some(Run {
                    kind: RunKind::Separator,
                    start_line: first.number,
                    span: first.span,
                })
            }
            LineKind::Heading => RunKind::Headed,
            LineKind::Indented => RunKind::Headless { indented: true },
            _ => RunKind::Headless { indented: false },
        };
        let mut end = first.span.end;
        while let Some(next) = self.lines.peek() {
            match next.kind {
                LineKind::Heading | LineKind::Separator => break,
                LineKind::Blank if self.split_on_blank_lines => break,
                LineKind::Blank => {}
                LineKind::Indented | LineKind::Text => end = next.span.end,
            }
            self.lines.next();
        }
        Some(Run {
            kind,
            start_line: first.number,
            span: first.span.start..end,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    FrontMatter,
    Entries,
    Interstitial,
}

#[derive(Debug, Clone)]
struct PendingBlock {
    start_line: usize,
    span: Range<usize>,
}

/// Lazy iterator of [RawBlock]s over a lexicon source.
///
/// The sequence is finite and deterministic; to restart it, build a new segmenter.
pub struct Segmenter<'a> {
    source: &'a str,
    runs: Runs<'a>,
    merge_indented_continuations: bool,
    phase: Phase,
    pending: Option<PendingBlock>,
}

impl<'a> Segmenter<'a> {
    pub fn new(source: &'a str, rules: &'a RuleSet) -> Self {
        let offset = if source.starts_with(BOM) {
            BOM.len_utf8()
        } else {
            0
        };
        let lines = Lines {
            source,
            rules,
            offset,
            number: 0,
        };
        Self {
            source,
            runs: Runs {
                lines: lines.peekable(),
                split_on_blank_lines: rules.split_on_blank_lines(),
            },
            merge_indented_continuations: rules.merge_indented_continuations(),
            phase: Phase::FrontMatter,
            pending: None,
        }
    }

    fn block(&self, pending: PendingBlock) -> RawBlock<'a> {
        RawBlock {
            start_line: pending.start_line,
            text: &self.source[pending.span.clone()],
            span: pending.span,
        }
    }

    /// Replace the pending block, returning the previous one if any.
    fn open(&mut self, run: Run) -> Option<RawBlock<'a>> {
        let previous = self.pending.replace(PendingBlock {
            start_line: run.start_line,
            span: run.span,
        });
        previous.map(|pending| self.block(pending))
    }
}

impl<'a> Iterator for Segmenter<'a> {
    type Item = RawBlock<'a>;

    fn next(&mut self) -> Option<RawBlock<'a>> {
        while let Some(run) = self.runs.next() {
            match run.kind {
                RunKind::Separator => {
                    self.phase = match self.phase {
                        Phase::FrontMatter => Phase::FrontMatter,
                        _ => Phase::Interstitial,
                    };
                    if let Some(pending) = self.pending.take() {
                        return Some(self.block(pending));
                    }
                }
                RunKind::Headed => {
                    self.phase = Phase::Entries;
                    if let Some(previous) = self.open(run) {
                        return Some(previous);
                    }
                }
                RunKind::Headless { indented } => match self.phase {
                    Phase::FrontMatter => {
                        tracing::debug!(line = run.start_line, "skipping front matter");
                    }
                    Phase::Interstitial => {
                        tracing::debug!(line = run.start_line, "skipping interstitial text");
                    }
                    Phase::Entries => match self.pending.as_mut() {
                        Some(pending) if indented && self.merge_indented_continuations => {
                            pending.span.end = run.span.end;
                        }
                        _ => {
                            if let Some(previous) = self.open(run) {
                                return Some(previous);
                            }
                        }
                    },
                },
            }
        }
        self.pending.take().map(|pending| self.block(pending))
    }
}

/// Segment a source with the given rules.
pub fn segment<'a>(source: &'a str, rules: &'a RuleSet) -> Segmenter<'a> {
    Segmenter::new(source, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lilex::rules::FormatRules;

    fn rules() -> RuleSet {
        RuleSet::compile(&FormatRules::default()).expect("default rules compile")
    }

    fn texts(source: &str, rules: &RuleSet) -> Vec<(usize, String)> {
        segment(source, rules)
            .map(|b| (b.start_line, b.text.to_string()))
            .collect()
    }

    #[test]
    fn test_classify_lines() {
        let rules = rules();
        assert_eq!(classify_line("", &rules), LineKind::Blank);
        assert_eq!(classify_line(" \t", &rules), LineKind::Blank);
        assert_eq!(classify_line(&"-".repeat(40), &rules), LineKind::Separator);
        assert_eq!(classify_line(":glider: text", &rules), LineKind::Heading);
        assert_eq!(classify_line("\tcontinued", &rules), LineKind::Indented);
        assert_eq!(classify_line("INTRODUCTION", &rules), LineKind::Text);
    }

    #[test]
    fn test_splits_entries_on_headings() {
        let rules = rules();
        let source = ":a: first\n\tmore\n:b: second\n";
        assert_eq!(
            texts(source, &rules),
            vec![
                (1, ":a: first\n\tmore".to_string()),
                (3, ":b: second".to_string())
            ]
        );
    }

    #[test]
    fn test_skips_front_matter_and_trailing_blanks() {
        let rules = rules();
        let source = "TITLE\n\nIntro text.\n\n:a: first\n\n\n\n";
        assert_eq!(texts(source, &rules), vec![(5, ":a: first".to_string())]);
    }

    #[test]
    fn test_separator_ends_block_and_skips_interstitial() {
        let rules = rules();
        let dashes = "-".repeat(30);
        let source =
            format!("{dashes}\n\n:a: first\n\n{dashes}\n\nB\n\n:b: second\n\n{dashes}\n\nBIBLIOGRAPHY\n");
        assert_eq!(
            texts(&source, &rules),
            vec![(3, ":a: first".to_string()), (9, ":b: second".to_string())]
        );
    }

    #[test]
    fn test_indented_run_continues_block_across_blank_line() {
        let rules = rules();
        let source = ":a: first\n\n\tsecond paragraph\n";
        let blocks: Vec<_> = segment(source, &rules).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, ":a: first\n\n\tsecond paragraph");
        assert_eq!(blocks[0].span, 0..source.len() - 1);
    }

    #[test]
    fn test_unindented_headless_run_is_its_own_block() {
        let rules = rules();
        let source = ":a: first\n\nstray paragraph\n\n:b: second\n";
        assert_eq!(
            texts(source, &rules),
            vec![
                (1, ":a: first".to_string()),
                (3, "stray paragraph".to_string()),
                (5, ":b: second".to_string())
            ]
        );
    }

    #[test]
    fn test_continuation_merging_can_be_disabled() {
        let rules = RuleSet::compile(&FormatRules {
            merge_indented_continuations: false,
            ..FormatRules::default()
        })
        .expect("compiles");
        let source = ":a: first\n\n\tsecond\n";
        assert_eq!(
            texts(source, &rules),
            vec![(1, ":a: first".to_string()), (3, "\tsecond".to_string())]
        );
    }

    #[test]
    fn test_blank_lines_kept_inside_blocks_when_not_splitting() {
        let rules = RuleSet::compile(&FormatRules {
            split_on_blank_lines: false,
            merge_indented_continuations: false,
            ..FormatRules::default()
        })
        .expect("compiles");
        let source = ":a: first\n\nsecond\n\n\n:b: third\n\n";
        assert_eq!(
            texts(source, &rules),
            vec![
                (1, ":a: first\n\nsecond".to_string()),
                (6, ":b: third".to_string())
            ]
        );
    }

    #[test]
    fn test_crlf_and_bom() {
        let rules = rules();
        let source = "\u{feff}:a: first\r\n\tmore\r\n\r\n:b: second\r\n";
        assert_eq!(
            texts(source, &rules),
            vec![
                (1, ":a: first\r\n\tmore".to_string()),
                (4, ":b: second".to_string())
            ]
        );
    }

    #[test]
    fn test_no_headings_yields_nothing() {
        let rules = rules();
        assert_eq!(segment("just some prose\n\nand more\n", &rules).count(), 0);
        assert_eq!(segment("", &rules).count(), 0);
    }
}
