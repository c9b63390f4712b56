//! Guide body rendering
//!
//! Converts portable-text nodes into view nodes: images get CDN URLs (or are
//! dropped when the reference is unusable), headings get unique anchors and
//! links are flagged when they leave the site.

use std::collections::HashMap;

use crate::application::dto::{BodyView, LinkView, SpanView, TocItem};
use crate::domain::entities::{BodyNode, Span};
use crate::infrastructure::image_url::{Fit, ImageUrlResolver};

const BODY_IMAGE_WIDTH: u32 = 1200;

pub struct RenderedBody {
    pub nodes: Vec<BodyView>,
    pub outline: Vec<TocItem>,
}

pub fn render_body(body: &[BodyNode], images: &ImageUrlResolver, site_url: &str) -> RenderedBody {
    let mut anchors = AnchorSet::default();
    let mut nodes = Vec::with_capacity(body.len());
    let mut outline = Vec::new();

    for node in body {
        match node {
            BodyNode::Block(block) => {
                let anchor = if block.style.is_heading() && block.list.is_none() {
                    let text = block.plain_text();
                    let text = text.trim();
                    (!text.is_empty()).then(|| {
                        let anchor = anchors.claim(text);
                        outline.push(TocItem::new(&anchor, text));
                        anchor
                    })
                } else {
                    None
                };

                nodes.push(BodyView::Block {
                    style: block.style,
                    list: block.list,
                    anchor,
                    spans: block.spans.iter().map(|s| span_view(s, site_url)).collect(),
                });
            }
            BodyNode::Image(image) => {
                let Some(builder) = images.resolve(Some(image)) else {
                    continue;
                };
                nodes.push(BodyView::Image {
                    url: builder.width(BODY_IMAGE_WIDTH).fit(Fit::Max).to_url(),
                    alt: image.alt.clone().unwrap_or_default(),
                    caption: image.caption.clone(),
                });
            }
        }
    }

    RenderedBody { nodes, outline }
}

fn span_view(span: &Span, site_url: &str) -> SpanView {
    SpanView {
        text: span.text.clone(),
        decorators: span.decorators.clone(),
        link: span.link.as_ref().map(|href| LinkView {
            external: is_external(href, site_url),
            href: href.clone(),
        }),
    }
}

/// Absolute http(s) URLs outside the site
pub fn is_external(href: &str, site_url: &str) -> bool {
    let absolute = href.starts_with("http://") || href.starts_with("https://");
    absolute && (site_url.is_empty() || !href.starts_with(site_url))
}

/// Anchor ids already handed out on one page
#[derive(Default)]
struct AnchorSet {
    seen: HashMap<String, usize>,
}

impl AnchorSet {
    fn claim(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }
        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{}-{}", base, count)
        }
    }
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
