//! Planning document parser.
//!
//! Parsing happens in two passes. [`split_sections`] cuts the document at
//! every markdown heading line outside fenced code blocks; each section is
//! then matched against the milestone and issue shapes. A section that does
//! not fit a shape completely is skipped as a whole, never emitted as a
//! partial record.
//!
//! Issue sections carry labelled fields in a fixed order:
//!
//! ```text
//! ### Issue #12: Title
//! **Labels:** `boot, critical`
//! **Milestone:** v1.0-alpha
//! **Estimate:** 3d
//! **Assignees:** @octocat            (optional)
//! **Description:**
//! ...
//! **Tasks:**
//! - [ ] ...
//! **Acceptance Criteria:**           (optional)
//! **Dependencies:**                  (optional)
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::domain::models::{Issue, IssueFields, Milestone, ParsedPlan, Quarter};

static ISSUE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Issue\s+#(\d+):\s*(\S.*?)\s*$").expect("valid regex"));

static MILESTONE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(v\d+(?:\.\d+)*-[\w-]+)\s*\(Q([1-4])\s+(\d{4})\)").expect("valid regex")
});

static LABELS_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Labels:\*\*[ \t]*`([^`\n]+)`").expect("valid regex"));

static MILESTONE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Milestone:\*\*[ \t]*([\w.-]+)").expect("valid regex"));

static ESTIMATE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Estimate:\*\*[ \t]*([^\n]*)").expect("valid regex"));

static ASSIGNEES_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Assignees:\*\*[ \t]*([^\n]*)").expect("valid regex"));

const DESCRIPTION_MARKER: &str = "**Description:**";
const TASKS_MARKER: &str = "**Tasks:**";
const ACCEPTANCE_MARKER: &str = "**Acceptance Criteria:**";
const DEPENDENCIES_MARKER: &str = "**Dependencies:**";

/// One heading and the text up to the next heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Heading text with the leading `#` run removed.
    pub heading: &'a str,
    /// Everything between the heading line and the next heading line.
    pub body: &'a str,
    /// 1-based line number of the heading.
    pub line: usize,
}

/// Returns the heading text if `line` is an ATX heading (`#` to `######`).
fn heading_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let hashes = trimmed.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &trimmed[hashes..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Returns the fence character and run length if `line` opens or closes a
/// fenced code block (three or more backticks or tildes).
fn fence_marker(line: &str) -> Option<(u8, usize)> {
    let trimmed = line.trim_start();
    let first = *trimmed.as_bytes().first()?;
    if first != b'`' && first != b'~' {
        return None;
    }
    let run = trimmed.bytes().take_while(|b| *b == first).count();
    (run >= 3).then_some((first, run))
}

/// Splits a document into heading-delimited sections.
///
/// Text before the first heading belongs to no section and is dropped.
/// Lines inside fenced code blocks never start a section.
pub fn split_sections(text: &str) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut open: Option<(&str, usize, usize)> = None;
    let mut fence: Option<(u8, usize)> = None;
    let mut offset = 0;

    for (index, raw_line) in text.split_inclusive('\n').enumerate() {
        let line = raw_line.trim_end_matches(['\n', '\r']);
        if let Some((ch, run)) = fence_marker(line) {
            match fence {
                None => fence = Some((ch, run)),
                // closing fence: same character, at least as long, no info string
                Some((open_ch, open_run))
                    if ch == open_ch && run >= open_run && line.trim()[run..].is_empty() =>
                {
                    fence = None;
                }
                Some(_) => {}
            }
        } else if let Some(heading) = heading_text(line).filter(|_| fence.is_none()) {
            if let Some((prev_heading, body_start, prev_line)) = open.take() {
                sections.push(Section {
                    heading: prev_heading,
                    body: &text[body_start..offset],
                    line: prev_line,
                });
            }
            open = Some((heading, offset + raw_line.len(), index + 1));
        }
        offset += raw_line.len();
    }

    if let Some((heading, body_start, line)) = open {
        sections.push(Section {
            heading,
            body: &text[body_start..],
            line,
        });
    }

    sections
}

/// Matches `re` at or after `cursor` and advances the cursor past the match.
fn next_field<'a>(re: &Regex, body: &'a str, cursor: &mut usize) -> Option<Captures<'a>> {
    let rest = &body[*cursor..];
    let caps = re.captures(rest)?;
    let whole = caps.get(0)?;
    *cursor += whole.end();
    Some(caps)
}

/// Finds `marker` at or after `from`, returning its absolute start offset.
fn find_marker(body: &str, marker: &str, from: usize) -> Option<usize> {
    body[from..].find(marker).map(|pos| from + pos)
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parser for markdown planning documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentParser;

impl DocumentParser {
    pub const fn new() -> Self {
        Self
    }

    /// Parses the full document text.
    ///
    /// Milestones keep document order and are not deduplicated. Issues are
    /// returned in ascending declared ordinal.
    pub fn parse(&self, text: &str) -> ParsedPlan {
        let mut plan = ParsedPlan::default();

        for section in split_sections(text) {
            if let Some(caps) = ISSUE_HEADING.captures(section.heading) {
                match Self::parse_issue(&caps, section.body) {
                    Some(issue) => plan.issues.push(issue),
                    None => debug!(
                        line = section.line,
                        heading = section.heading,
                        "skipping incomplete issue section"
                    ),
                }
            } else if let Some(caps) = MILESTONE_HEADING.captures(section.heading) {
                match Self::parse_milestone(&caps, section.body) {
                    Some(milestone) => plan.milestones.push(milestone),
                    None => debug!(
                        line = section.line,
                        heading = section.heading,
                        "skipping unrepresentable milestone"
                    ),
                }
            }
        }

        plan.issues.sort_by_key(|issue| issue.number);
        plan
    }

    fn parse_milestone(caps: &Captures<'_>, body: &str) -> Option<Milestone> {
        let title = caps.get(1)?.as_str();
        let quarter = Quarter::new(caps.get(2)?.as_str().parse().ok()?)?;
        let year: i32 = caps.get(3)?.as_str().parse().ok()?;
        Milestone::from_declaration(title, quarter, year, body.trim())
    }

    fn parse_issue(heading: &Captures<'_>, body: &str) -> Option<Issue> {
        let number: u64 = heading.get(1)?.as_str().parse().ok()?;
        let title = heading.get(2)?.as_str().to_string();

        let mut cursor = 0;
        let labels = split_list(next_field(&LABELS_FIELD, body, &mut cursor)?.get(1)?.as_str());
        let milestone = next_field(&MILESTONE_FIELD, body, &mut cursor)?
            .get(1)?
            .as_str()
            .to_string();
        let estimate = non_empty(next_field(&ESTIMATE_FIELD, body, &mut cursor)?.get(1)?.as_str())?;

        let description_at = find_marker(body, DESCRIPTION_MARKER, cursor)?;
        let assignees = ASSIGNEES_FIELD
            .captures(&body[cursor..description_at])
            .and_then(|caps| caps.get(1))
            .map(|m| {
                split_list(m.as_str())
                    .into_iter()
                    .map(|login| login.trim_start_matches('@').to_string())
                    .filter(|login| !login.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let description_start = description_at + DESCRIPTION_MARKER.len();
        let tasks_at = find_marker(body, TASKS_MARKER, description_start)?;
        let tasks_start = tasks_at + TASKS_MARKER.len();

        let acceptance_at = find_marker(body, ACCEPTANCE_MARKER, tasks_start);
        let dependencies_at = find_marker(body, DEPENDENCIES_MARKER, tasks_start);

        let (tasks_end, acceptance, dependencies) = match (acceptance_at, dependencies_at) {
            (Some(a), Some(d)) if d < a => (d, None, Some(&body[d + DEPENDENCIES_MARKER.len()..])),
            (Some(a), _) => {
                let acceptance_start = a + ACCEPTANCE_MARKER.len();
                match find_marker(body, DEPENDENCIES_MARKER, acceptance_start) {
                    Some(d) => (
                        a,
                        Some(&body[acceptance_start..d]),
                        Some(&body[d + DEPENDENCIES_MARKER.len()..]),
                    ),
                    None => (a, Some(&body[acceptance_start..]), None),
                }
            }
            (None, Some(d)) => (d, None, Some(&body[d + DEPENDENCIES_MARKER.len()..])),
            (None, None) => (body.len(), None, None),
        };

        let fields = IssueFields {
            description: non_empty(&body[description_start..tasks_at])?,
            estimate,
            tasks: body[tasks_start..tasks_end].trim().to_string(),
            acceptance: acceptance.and_then(non_empty),
            dependencies: dependencies.and_then(non_empty),
        };

        Some(Issue {
            number,
            title,
            body: fields.compose_body(),
            labels,
            milestone,
            assignees,
        })
    }
}

/// Convenience wrapper around [`DocumentParser::parse`].
pub fn parse_document(text: &str) -> ParsedPlan {
    DocumentParser::new().parse(text)
}
