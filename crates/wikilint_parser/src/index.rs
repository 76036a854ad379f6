//! The structural index.
//!
//! Built once per text snapshot, immutable afterwards. Detectors only ever
//! read from it, so a single index can be shared across threads freely.

use wikilint_elements::{Comment, EmphasisRun, ExternalLink, Heading, InternalLink, Span, Tag};

use crate::{matcher, scanner};

/// Ordered collections of every structural element found in one snapshot,
/// with tag matching resolved.
#[derive(Debug)]
pub struct StructuralIndex<'a> {
    text: &'a str,
    tags: Vec<Tag>,
    headings: Vec<Heading>,
    internal_links: Vec<InternalLink>,
    external_links: Vec<ExternalLink>,
    comments: Vec<Comment>,
    emphasis_runs: Vec<EmphasisRun>,
    literal_regions: Vec<Span>,
}

impl<'a> StructuralIndex<'a> {
    /// Indexes a snapshot. Total: malformed constructs are plain text, not
    /// errors, so this never fails.
    pub fn build(text: &'a str) -> Self {
        let comments = scanner::scan_comments(text);
        let mut tags = scanner::scan_tags(text, &comments);
        let literal_regions = matcher::match_tags(&mut tags);
        let tags = drop_literal_tags(tags, &literal_regions);
        let headings = scanner::scan_headings(text);
        let internal_links = scanner::scan_internal_links(text);
        let external_links = scanner::scan_external_links(text);
        let emphasis_runs = scanner::scan_emphasis(
            text,
            &comments,
            &tags,
            &literal_regions,
            &internal_links,
            &headings,
        );
        Self {
            text,
            tags,
            headings,
            internal_links,
            external_links,
            comments,
            emphasis_runs,
            literal_regions,
        }
    }

    /// The raw snapshot.
    #[inline]
    pub fn contents(&self) -> &'a str {
        self.text
    }

    /// All tags, in document order.
    #[inline]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Tags with the given normalized name.
    pub fn tags_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Tag> {
        self.tags.iter().filter(move |t| t.name == name)
    }

    /// Complete opening (or full) tags with the given name, the tags whose
    /// complete span is meaningful.
    pub fn complete_tags_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Tag> {
        self.tags
            .iter()
            .filter(move |t| t.name == name && !t.is_close() && t.is_complete())
    }

    /// The tag whose markup span contains the given offset, if any.
    pub fn tag_at(&self, offset: u32) -> Option<&Tag> {
        let idx = self.tags.partition_point(|t| t.span.start <= offset);
        (idx > 0 && self.tags[idx - 1].span.contains(offset)).then(|| &self.tags[idx - 1])
    }

    /// The matching partner of a tag, if matching succeeded.
    pub fn matching_tag(&self, tag: &Tag) -> Option<&Tag> {
        tag.matching.map(|i| &self.tags[i])
    }

    /// The comment containing the given offset, if any.
    pub fn comment_at(&self, offset: u32) -> Option<&Comment> {
        self.comments.iter().find(|c| c.span.contains(offset))
    }

    /// All headings, in document order.
    #[inline]
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// All internal links, in document order.
    #[inline]
    pub fn internal_links(&self) -> &[InternalLink] {
        &self.internal_links
    }

    /// All external links, in document order.
    #[inline]
    pub fn external_links(&self) -> &[ExternalLink] {
        &self.external_links
    }

    /// All comments, in document order.
    #[inline]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// All emphasis runs, in document order.
    #[inline]
    pub fn emphasis_runs(&self) -> &[EmphasisRun] {
        &self.emphasis_runs
    }

    /// Emphasis runs whose offset lies within `[begin, end)`.
    pub fn emphasis_runs_in(&self, begin: u32, end: u32) -> Vec<&EmphasisRun> {
        self.emphasis_runs
            .iter()
            .filter(|r| begin <= r.offset && r.offset < end)
            .collect()
    }

    /// True if the offset lies inside the literal value of a matched
    /// `nowiki`/`pre` pair.
    pub fn in_literal_region(&self, offset: u32) -> bool {
        self.literal_regions.iter().any(|r| r.contains(offset))
    }

    /// Substring of the snapshot covered by a span.
    #[inline]
    pub fn slice(&self, span: Span) -> &'a str {
        &self.text[span.start as usize..span.end as usize]
    }
}

/// Removes tags that sit inside literal regions (they are literal text)
/// and remaps the matching indices of the survivors.
fn drop_literal_tags(tags: Vec<Tag>, literal_regions: &[Span]) -> Vec<Tag> {
    if literal_regions.is_empty() {
        return tags;
    }
    let mut remap: Vec<Option<usize>> = Vec::with_capacity(tags.len());
    let mut kept: Vec<Tag> = Vec::with_capacity(tags.len());
    for tag in tags {
        if literal_regions.iter().any(|r| r.contains(tag.span.start)) {
            remap.push(None);
        } else {
            remap.push(Some(kept.len()));
            kept.push(tag);
        }
    }
    for tag in &mut kept {
        tag.matching = tag.matching.and_then(|old| remap[old]);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn query_surface() {
        let text = "== Head ==\n<center>''x''</center> [[A|b]] <!-- c -->";
        let index = StructuralIndex::build(text);
        assert_eq!(index.contents(), text);
        assert_eq!(index.tags().len(), 2);
        assert_eq!(index.tags_named("center").count(), 2);
        assert_eq!(index.complete_tags_named("center").count(), 1);
        assert_eq!(index.headings().len(), 1);
        assert_eq!(index.internal_links().len(), 1);
        assert_eq!(index.comments().len(), 1);
        assert_eq!(index.emphasis_runs().len(), 2);
    }

    #[test]
    fn tag_at_finds_innermost_markup() {
        let index = StructuralIndex::build("a<center>b</center>");
        assert_eq!(index.tag_at(1).unwrap().name, "center");
        assert!(index.tag_at(0).is_none());
        assert!(index.tag_at(9).is_none());
    }

    #[test]
    fn matching_tag_is_symmetric() {
        let index = StructuralIndex::build("<u>x</u>");
        let open = &index.tags()[0];
        let close = index.matching_tag(open).unwrap();
        assert!(close.is_close());
        assert_eq!(index.matching_tag(close).unwrap().span, open.span);
    }

    #[test]
    fn literal_tags_are_dropped_and_indices_remapped() {
        let index = StructuralIndex::build("<nowiki><center></nowiki><u>x</u>");
        let names: Vec<_> = index.tags().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["nowiki", "nowiki", "u", "u"]);
        let u_open = &index.tags()[2];
        assert_eq!(u_open.matching, Some(3));
        assert!(index.in_literal_region(9));
    }

    #[test]
    fn emphasis_runs_in_area() {
        let index = StructuralIndex::build("''a'' and ''b''");
        assert_eq!(index.emphasis_runs_in(0, 6).len(), 2);
        assert_eq!(index.emphasis_runs_in(0, 15).len(), 4);
    }

    #[test]
    fn build_is_deterministic() {
        let text = "== T ==\n<big><center>x</big></center> ''y'' [[L]]";
        let a = StructuralIndex::build(text);
        let b = StructuralIndex::build(text);
        assert_eq!(a.tags(), b.tags());
        assert_eq!(a.headings(), b.headings());
        assert_eq!(a.emphasis_runs(), b.emphasis_runs());
    }
}
