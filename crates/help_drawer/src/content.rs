// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turning API content into drawer markup

use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::api::{Article, SearchHit};

pub const NO_RESOURCE_ARTICLE: &str = "We couldn't find an article specific to this page.  \
    Please try the search option or browse all help articles below.";

pub const NO_ARTICLE: &str = "We couldn't find that article.  Please try the search option.";

static WRAPPERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^<body[^>]*><main[^>]*>(.+)</main></body>$").unwrap());

static ROOT_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<a\b([^>]*?)\shref\s*=\s*"(/[^"]*)"([^>]*)>"#).unwrap());

static TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)\starget\s*=\s*"[^"]*""#).unwrap());

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Placeholder article carrying `message`, used when a fetch fails.
pub fn error_article(message: &str, href: Option<&str>) -> Article {
    Article {
        href: href.map(Into::into),
        content: format!("<article>{message}</article>"),
        ..Article::default()
    }
}

/// Make `href` absolute against the portal. Already absolute hrefs are kept.
pub fn portal_href(portal: &str, href: &str) -> String {
    if href.starts_with(portal) {
        href.into()
    } else if href.starts_with('/') {
        format!("{portal}{href}")
    } else {
        format!("{portal}/{href}")
    }
}

/// Markup for a full article: header first, `<body><main>` wrappers dropped,
/// root-relative links pointed at the portal.
pub fn article_markup(article: &Article, portal: &str) -> String {
    let mut html = String::new();

    if let Some(header) = &article.header {
        html.push_str(header);
    }

    html.push_str(&WRAPPERS.replace(&article.content, "$1"));

    rewrite_links(&html, portal)
}

/// Point every `<a href="/...">` at the portal, in a new tab, keeping the
/// original path in `data-path` so the drawer can open it in place.
pub fn rewrite_links(html: &str, portal: &str) -> String {
    ROOT_LINK
        .replace_all(html, |caps: &Captures| {
            let before = TARGET.replace_all(&caps[1], "");
            let after = TARGET.replace_all(&caps[3], "");
            let path = &caps[2];

            format!(r#"<a{before} data-path="{path}" href="{portal}{path}" target="_blank"{after}>"#)
        })
        .into_owned()
}

/// Plain text of an article with the leading title removed.
pub fn teaser(article: &Article) -> String {
    let text = TAG.replace_all(&article.content, " ");
    let text = text.trim();

    if article.title.is_empty() {
        return text.into();
    }

    match Regex::new(&format!("(?i)^{}", regex::escape(&article.title))) {
        Ok(title) => title.replace(text, "").trim().into(),
        Err(_) => text.into(),
    }
}

/// Card linking to the article found for the current page.
pub fn resource_article_markup(article: &Article) -> String {
    format!(
        r#"<article><a class="search-result search-result--main" data-path="{}" href="javascript:void(0);"><h1>{}</h1><div>{}</div></a></article>"#,
        article.href.as_deref().unwrap_or_default(),
        article.title,
        teaser(article),
    )
}

pub fn search_results_markup(hits: &[SearchHit]) -> String {
    let mut html = String::new();

    for hit in hits {
        let _ = write!(
            html,
            r#"<article><a data-if="searchText" class="search-result" data-path="{}" href="javascript:void(0);"><h1>{}</h1>{}</a></article>"#,
            hit.href,
            hit.title,
            hit.highlights.first().map(String::as_str).unwrap_or_default(),
        );
    }

    html
}

pub fn results_text(total: u64) -> String {
    match total {
        0 => "Sorry, no results found.".into(),
        1 => "1 result".into(),
        n => format!("{n} results"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PORTAL: &str = "https://help.example.com";

    #[test]
    fn strips_body_and_main() {
        let article = Article {
            header: Some("<h1>Title</h1>".into()),
            content: "<body class=\"x\"><main id=\"m\"><p>one</p>\n<p>two</p></main></body>".into(),
            ..Article::default()
        };

        assert_eq!(article_markup(&article, PORTAL), "<h1>Title</h1><p>one</p>\n<p>two</p>");
    }

    #[test]
    fn leaves_unwrapped_content() {
        let article = Article {
            content: "<main><p>x</p></main>".into(),
            ..Article::default()
        };

        assert_eq!(article_markup(&article, PORTAL), "<main><p>x</p></main>");
    }

    #[test]
    fn rewrites_root_relative_links_only() {
        let html = r#"<p><a class="x" href="/guide/setup.html#install" target="_self">Setup</a> <a href="https://elsewhere.com/">Out</a></p>"#;

        assert_eq!(
            rewrite_links(html, PORTAL),
            r#"<p><a class="x" data-path="/guide/setup.html#install" href="https://help.example.com/guide/setup.html#install" target="_blank">Setup</a> <a href="https://elsewhere.com/">Out</a></p>"#
        );
    }

    #[test]
    fn portal_hrefs() {
        assert_eq!(portal_href(PORTAL, "guide.html"), "https://help.example.com/guide.html");
        assert_eq!(portal_href(PORTAL, "/guide.html"), "https://help.example.com/guide.html");
        assert_eq!(
            portal_href(PORTAL, "https://help.example.com/guide.html"),
            "https://help.example.com/guide.html"
        );
    }

    #[test]
    fn teaser_drops_markup_and_title() {
        let article = Article {
            title: "Getting Started".into(),
            content: "<h1>Getting started</h1><p>Install the app.</p>".into(),
            ..Article::default()
        };

        assert_eq!(teaser(&article), "Install the app.");
    }

    #[test]
    fn result_counts() {
        assert_eq!(results_text(0), "Sorry, no results found.");
        assert_eq!(results_text(1), "1 result");
        assert_eq!(results_text(12), "12 results");
    }

    #[test]
    fn search_result_cards() {
        let html = search_results_markup(&[SearchHit {
            title: "Reset".into(),
            href: "/reset.html".into(),
            highlights: vec!["<em>reset</em> your password".into()],
        }]);

        assert!(html.contains(r#"data-path="/reset.html""#));
        assert!(html.contains("<h1>Reset</h1><em>reset</em> your password"));
    }
}
