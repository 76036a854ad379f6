//! Single-pass discovery of structural elements.
//!
//! The scanner is deliberately tolerant: a construct that does not parse as
//! a tag, link or heading is plain text, never an error. All offsets are
//! byte offsets; every delimiter the scanner recognizes is ASCII, so spans
//! always fall on character boundaries.

use wikilint_elements::{
    names, Comment, EmphasisRun, ExternalLink, Heading, InternalLink, Span, Tag, TagKind,
};

const COMMENT_BEGIN: &str = "<!--";
const COMMENT_END: &str = "-->";

/// Tag names whose content isolates emphasis pairing: an apostrophe run
/// inside one of these never pairs with a run outside it.
const ISOLATING_TAGS: &[&str] = &[
    names::GALLERY,
    names::INCLUDEONLY,
    names::NOINCLUDE,
    names::REF,
];

/// Finds all comments. An unterminated comment runs to the end of the text.
pub fn scan_comments(text: &str) -> Vec<Comment> {
    let mut comments = Vec::new();
    let mut from = 0;
    while let Some(rel) = text[from..].find(COMMENT_BEGIN) {
        let start = from + rel;
        match text[start + COMMENT_BEGIN.len()..].find(COMMENT_END) {
            Some(rel_end) => {
                let end = start + COMMENT_BEGIN.len() + rel_end + COMMENT_END.len();
                comments.push(Comment::new(Span::new(start as u32, end as u32), true));
                from = end;
            }
            None => {
                comments.push(Comment::new(
                    Span::new(start as u32, text.len() as u32),
                    false,
                ));
                break;
            }
        }
    }
    comments
}

fn in_comment(comments: &[Comment], offset: u32) -> bool {
    comments.iter().any(|c| c.span.contains(offset))
}

/// Finds all tag-like constructs outside comments.
pub fn scan_tags(text: &str, comments: &[Comment]) -> Vec<Tag> {
    let bytes = text.as_bytes();
    let mut tags = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'<' && !in_comment(comments, i as u32) {
            if let Some((tag, end)) = parse_tag(text, i) {
                tags.push(tag);
                i = end;
                continue;
            }
        }
        i += 1;
    }
    tags
}

/// Tries to parse one tag starting at `start` (which points at `<`).
/// Returns the tag and the offset just past its closing `>`.
fn parse_tag(text: &str, start: usize) -> Option<(Tag, usize)> {
    let bytes = text.as_bytes();
    let mut i = start + 1;
    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }

    let name_start = i;
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i == name_start || !bytes[name_start].is_ascii_alphabetic() {
        return None;
    }
    let name = &text[name_start..i];

    if closing {
        while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\n' || bytes[i] == b'\t') {
            i += 1;
        }
        if bytes.get(i) != Some(&b'>') {
            return None;
        }
        let span = Span::new(start as u32, (i + 1) as u32);
        return Some((Tag::new(name, TagKind::Close, span), i + 1));
    }

    let mut tag = Tag::new(name, TagKind::Open, Span::new(0, 0));
    loop {
        while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\n' || bytes[i] == b'\t') {
            i += 1;
        }
        match bytes.get(i) {
            Some(b'>') => {
                tag.span = Span::new(start as u32, (i + 1) as u32);
                return Some((tag, i + 1));
            }
            Some(b'/') if bytes.get(i + 1) == Some(&b'>') => {
                let span = Span::new(start as u32, (i + 2) as u32);
                tag.kind = TagKind::Full;
                tag.span = span;
                tag.complete_span = Some(span);
                return Some((tag, i + 2));
            }
            Some(b'<') | None => return None,
            Some(_) => {
                let (param_end, name, value) = parse_parameter(text, i)?;
                if let Some(name) = name {
                    tag = tag.with_parameter(name, value);
                }
                i = param_end;
            }
        }
    }
}

/// Parses one `name` or `name=value` parameter. Unparseable bytes are
/// consumed one at a time so the surrounding tag still parses.
fn parse_parameter(text: &str, start: usize) -> Option<(usize, Option<String>, Option<String>)> {
    let bytes = text.as_bytes();
    let mut i = start;
    let name_start = i;
    while i < bytes.len() && !b" \n\t=<>/".contains(&bytes[i]) {
        i += 1;
    }
    if i == name_start {
        // Stray byte: skip a full character to stay on a boundary.
        let skip = text[start..].chars().next().map_or(1, char::len_utf8);
        return Some((start + skip, None, None));
    }
    let name = text[name_start..i].to_string();
    if bytes.get(i) != Some(&b'=') {
        return Some((i, Some(name), None));
    }
    i += 1;
    match bytes.get(i) {
        Some(&quote @ (b'"' | b'\'')) => {
            i += 1;
            let value_start = i;
            while i < bytes.len() && bytes[i] != quote && bytes[i] != b'<' && bytes[i] != b'>' {
                i += 1;
            }
            if bytes.get(i) != Some(&quote) {
                return None;
            }
            let value = text[value_start..i].to_string();
            Some((i + 1, Some(name), Some(value)))
        }
        _ => {
            let value_start = i;
            while i < bytes.len() && !b" \n\t<>/".contains(&bytes[i]) {
                i += 1;
            }
            Some((i, Some(name), Some(text[value_start..i].to_string())))
        }
    }
}

/// Finds all headings (`== Title ==` lines).
pub fn scan_headings(text: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut line_start = 0usize;
    for line in text.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        let content = content.strip_suffix('\r').unwrap_or(content);
        if let Some(heading) = parse_heading(content, line_start) {
            headings.push(heading);
        }
        line_start += line.len();
    }
    headings
}

fn parse_heading(line: &str, line_start: usize) -> Option<Heading> {
    let trimmed = line.trim_end_matches(' ');
    let bytes = trimmed.as_bytes();
    let leading = bytes.iter().take_while(|&&b| b == b'=').count();
    if leading == 0 || leading == trimmed.len() {
        return None;
    }
    let trailing = bytes.iter().rev().take_while(|&&b| b == b'=').count();
    if trailing == 0 {
        return None;
    }

    let span = Span::new(line_start as u32, (line_start + trimmed.len()) as u32);
    let inner = &trimmed[leading..trimmed.len() - trailing];
    let blanks_before = inner.len() - inner.trim_start_matches(' ').len();
    let inner_trimmed = inner.trim_matches(' ');
    let content_start = line_start + leading + blanks_before;
    let content = Span::new(
        content_start as u32,
        (content_start + inner_trimmed.len()) as u32,
    );
    Some(Heading::new(
        span,
        leading.min(6) as u8,
        trailing.min(6) as u8,
        content,
    ))
}

/// Finds all internal links, tolerating one level of nesting in the display
/// text (image captions).
pub fn scan_internal_links(text: &str) -> Vec<InternalLink> {
    let mut links = Vec::new();
    let mut from = 0;
    while let Some(rel) = text[from..].find("[[") {
        let start = from + rel;
        match parse_internal_link(text, start) {
            Some(link) => {
                from = link.span.end as usize;
                links.push(link);
            }
            None => from = start + 2,
        }
    }
    links
}

fn parse_internal_link(text: &str, start: usize) -> Option<InternalLink> {
    let bytes = text.as_bytes();
    let mut i = start + 2;
    let mut depth = 0u32;
    let mut pipe: Option<usize> = None;
    while i < bytes.len() {
        match bytes[i] {
            b'[' if bytes.get(i + 1) == Some(&b'[') => {
                depth += 1;
                i += 2;
            }
            b']' if bytes.get(i + 1) == Some(&b']') => {
                if depth == 0 {
                    let target_end = pipe.unwrap_or(i);
                    let target = Span::new((start + 2) as u32, target_end as u32);
                    let text_span = pipe.map(|p| Span::new((p + 1) as u32, i as u32));
                    let span = Span::new(start as u32, (i + 2) as u32);
                    return Some(InternalLink::new(span, target, text_span));
                }
                depth -= 1;
                i += 2;
            }
            b'|' if depth == 0 && pipe.is_none() => {
                pipe = Some(i);
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}

/// Finds bracketed external links (`[http://... display]`).
pub fn scan_external_links(text: &str) -> Vec<ExternalLink> {
    const SCHEMES: &[&str] = &["http://", "https://", "ftp://"];
    let mut links = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'[' && SCHEMES.iter().any(|s| text[i + 1..].starts_with(s)) {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j] != b']' && bytes[j] != b'\n' {
                j += 1;
            }
            if bytes.get(j) == Some(&b']') {
                let url_end = text[i + 1..j].find(' ').map_or(j, |p| i + 1 + p);
                let target = Span::new((i + 1) as u32, url_end as u32);
                let text_span = if url_end < j && url_end + 1 < j {
                    Some(Span::new((url_end + 1) as u32, j as u32))
                } else {
                    None
                };
                links.push(ExternalLink::new(
                    Span::new(i as u32, (j + 1) as u32),
                    target,
                    text_span,
                ));
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }
    links
}

/// Finds apostrophe runs outside comments, literal regions and tag markup,
/// and computes each run's main area.
pub fn scan_emphasis(
    text: &str,
    comments: &[Comment],
    tags: &[Tag],
    literal_regions: &[Span],
    links: &[InternalLink],
    headings: &[Heading],
) -> Vec<EmphasisRun> {
    let bytes = text.as_bytes();
    let mut runs = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\'' {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i] == b'\'' {
            i += 1;
        }
        let length = (i - start) as u32;
        let offset = start as u32;
        if length < 2
            || in_comment(comments, offset)
            || literal_regions.iter().any(|r| r.contains(offset))
            || in_tag_markup(tags, offset)
        {
            continue;
        }
        let span = Span::new(offset, offset + length);
        let main_area = compute_main_area(text, span, tags, links, headings);
        runs.push(EmphasisRun::new(offset, length, main_area));
    }
    runs
}

fn in_tag_markup(tags: &[Tag], offset: u32) -> bool {
    // Markup spans are disjoint and sorted by start.
    let idx = tags.partition_point(|t| t.span.start <= offset);
    idx > 0 && tags[idx - 1].span.contains(offset)
}

/// The minimal region over which a run can pair with a partner: its line,
/// narrowed by every enclosing heading content span, link display text and
/// isolating tag value. Formatting tags (`center`, `small`, ...) do not
/// narrow the area: a partner outside them is exactly what the misnesting
/// detectors look for.
fn compute_main_area(
    text: &str,
    run: Span,
    tags: &[Tag],
    links: &[InternalLink],
    headings: &[Heading],
) -> Span {
    let bytes = text.as_bytes();
    let line_start = bytes[..run.start as usize]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |p| p + 1) as u32;
    let line_end = bytes[run.start as usize..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(text.len(), |p| run.start as usize + p) as u32;
    let mut area = Span::new(line_start, line_end);

    let mut narrow = |candidate: Span| {
        if candidate.contains_span(&run) {
            area = Span::new(area.start.max(candidate.start), area.end.min(candidate.end));
        }
    };
    for heading in headings {
        narrow(heading.content);
    }
    for link in links {
        if let Some(text_span) = link.text {
            narrow(text_span);
        }
    }
    for tag in tags {
        if ISOLATING_TAGS.contains(&tag.name.as_str()) {
            if let Some(value) = tag.value_span {
                narrow(value);
            }
        }
    }
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wikilint_elements::TagKind;

    #[test]
    fn comments_terminated_and_not() {
        let comments = scan_comments("a <!-- hidden --> b <!-- open");
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].span, Span::new(2, 17));
        assert!(comments[0].terminated);
        assert_eq!(comments[1].span, Span::new(20, 29));
        assert!(!comments[1].terminated);
    }

    #[test]
    fn tags_basic_kinds() {
        let tags = scan_tags("<center>x</center><ref name=\"a\"/>", &[]);
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0].kind, TagKind::Open);
        assert_eq!(tags[0].span, Span::new(0, 8));
        assert_eq!(tags[1].kind, TagKind::Close);
        assert_eq!(tags[1].span, Span::new(9, 18));
        assert_eq!(tags[2].kind, TagKind::Full);
        assert_eq!(tags[2].parameter("name").unwrap().value.as_deref(), Some("a"));
    }

    #[test]
    fn tag_names_are_case_insensitive() {
        let tags = scan_tags("<NoWiki>", &[]);
        assert_eq!(tags[0].name, "nowiki");
    }

    #[test]
    fn malformed_tag_is_plain_text() {
        assert!(scan_tags("a < b and 2<3", &[]).is_empty());
        assert!(scan_tags("<center", &[]).is_empty());
        assert!(scan_tags("<center <small>", &[]).len() == 1);
    }

    #[test]
    fn tag_inside_comment_is_ignored() {
        let text = "<!-- <center> -->";
        let comments = scan_comments(text);
        assert!(scan_tags(text, &comments).is_empty());
    }

    #[test]
    fn tag_parameters_quoted_and_bare() {
        let tags = scan_tags("<div id=toc style=\"clear: both\" hidden>", &[]);
        let tag = &tags[0];
        assert_eq!(tag.parameter("id").unwrap().value.as_deref(), Some("toc"));
        assert_eq!(
            tag.parameter("style").unwrap().value.as_deref(),
            Some("clear: both")
        );
        assert!(tag.parameter("hidden").unwrap().value.is_none());
    }

    #[test]
    fn headings_levels_and_content() {
        let headings = scan_headings("== Title ==\ntext\n=== Sub ===  \n");
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].level, 2);
        assert_eq!(headings[0].content, Span::new(3, 8));
        assert_eq!(headings[1].level, 3);
        // Trailing blanks after the markers are not part of the heading.
        assert_eq!(headings[1].span, Span::new(17, 28));
    }

    #[test]
    fn equals_only_line_is_not_a_heading() {
        assert!(scan_headings("====\n").is_empty());
    }

    #[test]
    fn internal_links() {
        let links = scan_internal_links("see [[Target|the text]] and [[Plain]]");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].span, Span::new(4, 23));
        assert_eq!(links[0].target, Span::new(6, 12));
        assert_eq!(links[0].text, Some(Span::new(13, 21)));
        assert_eq!(links[1].text, None);
    }

    #[test]
    fn nested_internal_link() {
        let links = scan_internal_links("[[File:x.png|a [[b]] c]]");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].span, Span::new(0, 24));
    }

    #[test]
    fn unclosed_internal_link_is_skipped() {
        assert!(scan_internal_links("[[never closed").is_empty());
    }

    #[test]
    fn external_links() {
        let links = scan_external_links("[http://example.org Example] [https://x.y]");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].target, Span::new(1, 19));
        assert_eq!(links[0].text, Some(Span::new(20, 27)));
        assert_eq!(links[1].text, None);
    }

    #[test]
    fn emphasis_runs_and_lengths() {
        let runs = scan_emphasis("''a'''' b'''''x", &[], &[], &[], &[], &[]);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].length, 2);
        assert_eq!(runs[1].length, 4);
        assert_eq!(runs[1].effective_length, 3);
        assert_eq!(runs[2].length, 5);
        assert_eq!(runs[2].weight, 2);
    }

    #[test]
    fn single_apostrophe_is_not_a_run() {
        assert!(scan_emphasis("it's fine", &[], &[], &[], &[], &[]).is_empty());
    }

    #[test]
    fn emphasis_inside_tag_markup_is_skipped() {
        let text = "<div style='x''y'>";
        let tags = scan_tags(text, &[]);
        assert!(scan_emphasis(text, &[], &tags, &[], &[], &[]).is_empty());
    }

    #[test]
    fn main_area_is_the_line() {
        let text = "first\n''second'' line\nthird";
        let runs = scan_emphasis(text, &[], &[], &[], &[], &[]);
        assert_eq!(runs[0].main_area, Span::new(6, 21));
        assert_eq!(runs[1].main_area, Span::new(6, 21));
    }

    #[test]
    fn main_area_narrowed_by_heading_content() {
        let text = "== ''Title ==";
        let headings = scan_headings(text);
        let runs = scan_emphasis(text, &[], &[], &[], &[], &headings);
        assert_eq!(runs[0].main_area, headings[0].content);
    }
}
