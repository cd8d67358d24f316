//! HTML rendering for the title preview page.
//!
//! The head carries everything link-unfurling crawlers read (`<title>`,
//! description, Open Graph and Twitter card tags); the body is a plain
//! poster-plus-text layout with no scripts.

use std::fmt::Write;

use peekr_metadata::DisplayMetadata;

/// Inputs for one preview page.
#[derive(Debug, Clone)]
pub struct PreviewPage<'a> {
    /// Metadata derived with the social-card image size.
    pub card: &'a DisplayMetadata,
    /// Metadata derived with the on-page image size.
    pub page: &'a DisplayMetadata,
    /// Absolute URL of this page, emitted as `og:url` when known.
    pub canonical_url: Option<&'a str>,
}

pub fn render_page(page: &PreviewPage<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{head}</head>
<body>
{body}</body>
</html>
"#,
        head = head_tags(page.card, page.canonical_url),
        body = body(page.page),
    )
}

fn head_tags(meta: &DisplayMetadata, canonical_url: Option<&str>) -> String {
    let title = escape_html(&meta.title);
    let description = escape_html(&meta.description);

    let mut out = String::new();
    let _ = writeln!(out, "<title>{title}</title>");
    let _ = writeln!(out, r#"<meta name="description" content="{description}">"#);

    // Open Graph
    let _ = writeln!(out, r#"<meta property="og:title" content="{title}">"#);
    let _ = writeln!(
        out,
        r#"<meta property="og:description" content="{description}">"#
    );
    let _ = writeln!(out, r#"<meta property="og:type" content="website">"#);
    let _ = writeln!(
        out,
        r#"<meta property="og:site_name" content="{}">"#,
        peekr_metadata::FALLBACK_TITLE
    );
    if let Some(url) = canonical_url {
        let _ = writeln!(
            out,
            r#"<meta property="og:url" content="{}">"#,
            escape_html(url)
        );
    }
    if let Some(image) = &meta.image_url {
        let _ = writeln!(
            out,
            r#"<meta property="og:image" content="{}">"#,
            escape_html(image)
        );
    }

    // Twitter
    let card = if meta.image_url.is_some() {
        "summary_large_image"
    } else {
        "summary"
    };
    let _ = writeln!(out, r#"<meta name="twitter:card" content="{card}">"#);
    let _ = writeln!(out, r#"<meta name="twitter:title" content="{title}">"#);
    let _ = writeln!(
        out,
        r#"<meta name="twitter:description" content="{description}">"#
    );
    if let Some(image) = &meta.image_url {
        let _ = writeln!(
            out,
            r#"<meta name="twitter:image" content="{}">"#,
            escape_html(image)
        );
    }

    out
}

fn body(meta: &DisplayMetadata) -> String {
    if !meta.found {
        return format!(
            "<main>\n<h1>Not found</h1>\n<p>{}</p>\n</main>\n",
            escape_html(&meta.description)
        );
    }

    let title = escape_html(&meta.title);
    let poster = meta
        .image_url
        .as_deref()
        .map(|src| {
            format!(
                "<img src=\"{}\" alt=\"{title}\" width=\"256\">\n",
                escape_html(src)
            )
        })
        .unwrap_or_default();

    format!(
        "<main>\n<div class=\"title\">\n{poster}<div>\n<h1>{title}</h1>\n<p>{}</p>\n</div>\n</div>\n</main>\n",
        escape_html(&meta.description)
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
