//! Markdown to HTML for the web UI.

use pulldown_cmark::{CowStr, Event, Parser, Tag, html};

/// URL schemes allowed in rendered links and images.
const SAFE_SCHEMES: [&str; 3] = ["http:", "https:", "mailto:"];

/// Render Markdown to HTML.
///
/// Raw HTML in the input (paper titles and abstracts can contain `<`, `&`)
/// is emitted as escaped text, never as markup. Link and image targets with
/// any scheme other than http, https or mailto are replaced with `#`.
#[must_use]
pub fn render_markdown_html(markdown: &str) -> String {
    let parser = Parser::new(markdown).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    // Browsers ignore ASCII whitespace and control characters inside a scheme.
    let scheme: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .take_while(|&c| c != ':')
        .chain(std::iter::once(':'))
        .collect::<String>()
        .to_ascii_lowercase();

    if SAFE_SCHEMES.contains(&scheme.as_str()) { url } else { CowStr::Borrowed("#") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_rules() {
        let html = render_markdown_html("\n### Paper 1\n\nTitle: X\n\n---");
        assert!(html.contains("<h3>Paper 1</h3>"));
        assert!(html.contains("<p>Title: X</p>"));
        assert!(html.contains("<hr />"));
    }

    #[test]
    fn test_trailing_spaces_make_line_break() {
        let html = render_markdown_html("Retrieval Accuracy: High   \nSummary Quality: Good");
        assert!(html.contains("High<br />"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown_html("Abstract: <script>alert(1)</script> and <b>bold</b>");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_are_neutralised() {
        let html = render_markdown_html("Abstract: see [click](javascript:alert(document.cookie)) here");
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r##"<a href="#">click</a>"##));

        let html = render_markdown_html("Abstract: <javascript:alert(1)>");
        assert!(!html.contains(r#"href="javascript"#));

        let html = render_markdown_html("![x](JavaScript:alert(1)) [y](data:text/html,hi)");
        assert!(!html.to_lowercase().contains("javascript:alert"));
        assert!(!html.contains("href=\"data:"));
    }

    #[test]
    fn test_web_links_are_kept() {
        let html = render_markdown_html("[pdf](https://arxiv.org/pdf/1706.03762) <http://arxiv.org/abs/1>");
        assert!(html.contains(r#"href="https://arxiv.org/pdf/1706.03762""#));
        assert!(html.contains(r#"href="http://arxiv.org/abs/1""#));
    }

    #[test]
    fn test_html_block_is_escaped() {
        let html = render_markdown_html("<div onclick=\"x()\">hi</div>");
        assert!(!html.contains("<div"));
        assert!(html.contains("&lt;div"));
    }
}
