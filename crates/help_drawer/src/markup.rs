// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The drawer's static markup, built element by element

use binder::DomNode;

const VOID_HREF: &str = "javascript:void(0);";

fn el<N: DomNode>(parent: &N, tag: &str, attrs: &[(&str, &str)]) -> N {
    let node = parent.create(tag);

    for (name, value) in attrs {
        node.set_attr(name, value);
    }

    parent.append(&node);
    node
}

fn text<N: DomNode>(parent: &N, tag: &str, attrs: &[(&str, &str)], content: &str) -> N {
    let node = el(parent, tag, attrs);
    node.set_text(content);
    node
}

/// Append a `u-icon` element to `parent`.
pub fn icon<N: DomNode>(parent: &N, sprite: &str, classes: &str) -> N {
    el(parent, "u-icon", &[("sprite", sprite), ("classes", classes)])
}

fn icon_link<N: DomNode>(parent: &N, class: &str, sprite: &str) -> N {
    let link = el(parent, "a", &[("class", class), ("href", VOID_HREF)]);
    icon(&link, sprite, "icon icon--muted icon--hover");
    link
}

/// Build the detached `.heretto-help` wrapper. `doc` only provides the
/// document new elements are created in.
pub fn build<N: DomNode>(doc: &N) -> N {
    let wrapper = doc.create("div");
    wrapper.set_attr("class", "heretto-help");

    el(&wrapper, "div", &[("class", "overlay overlay--main js-toggle-drawer")]);

    let content = el(&wrapper, "div", &[("class", "heretto-help__content")]);

    header(&content);

    let main = el(&content, "main", &[("class", "main")]);

    resource_section(&main);
    article_section(&main);
    search_section(&main);

    let footer = el(&content, "footer", &[("class", "footer")]);
    let copyright = el(&footer, "p", &[]);
    copyright.set_html(r#"Copyright &copy; 2024, <a href="https://github.com/doug-gainey">Doug Gainey</a>."#);

    wrapper
}

fn header<N: DomNode>(content: &N) {
    let header = el(content, "header", &[("class", "header flex")]);
    let title = el(&header, "h2", &[("class", "flex__fill")]);

    text(&title, "a", &[("class", "js-home"), ("href", VOID_HREF)], "Help");
    icon_link(&header, "flex js-show-search", "search");
    icon_link(&header, "flex js-toggle-drawer", "close");
}

fn resource_section<N: DomNode>(main: &N) {
    let section = el(main, "section", &[("data-not", "article.href")]);

    text(&section, "h3", &[], "TOP RESULT");
    el(&section, "div", &[("class", "js-resource-article")]);

    let see_all = text(
        &section,
        "a",
        &[("class", "link see-all"), ("target", "_blank"), ("data-bind", "href:portalUrl")],
        "See All Help Articles ",
    );
    icon(&see_all, "new-window", "icon icon--sm");

    let nav = el(&section, "nav", &[("class", "more-links")]);
    text(&nav, "h3", &[], "MORE HELP");
    el(&nav, "ul", &[("class", "js-more-links-content")]);
}

fn article_section<N: DomNode>(main: &N) {
    let section = el(main, "section", &[("data-if", "article.href")]);
    let toolbar = el(&section, "div", &[("class", "toolbar flex")]);

    let back = el(&toolbar, "a", &[("class", "btn btn--link btn--sm js-go-back"), ("href", VOID_HREF)]);
    back.set_html(r#"<u-icon sprite="arrow-left" classes="icon"></u-icon>Back"#);

    el(&toolbar, "div", &[("class", "flex__fill")]);

    let open = text(
        &toolbar,
        "a",
        &[
            ("class", "btn btn--secondary btn--sm"),
            ("target", "_blank"),
            ("data-bind", "href:article.href"),
        ],
        "Open In A New Tab ",
    );
    icon(&open, "new-window", "icon icon--sm");

    el(&section, "div", &[("class", "article-content js-article-content")]);
}

fn search_section<N: DomNode>(main: &N) {
    let section = el(main, "section", &[("data-if", "showSearch")]);

    el(&section, "div", &[("class", "overlay")]);

    let dialog = el(&section, "div", &[("class", "dialog dialog--has-subheader")]);
    let header = el(&dialog, "div", &[("class", "dialog__header")]);
    let fieldset = el(&header, "fieldset", &[("class", "horizontal")]);
    let field = el(&fieldset, "div", &[("class", "flex flex__fill icon-overlay")]);

    el(
        &field,
        "input",
        &[
            ("data-bind", "searchText"),
            ("class", "search flex__fill js-search-input"),
            ("placeholder", "How can we help?"),
            ("type", "text"),
        ],
    );

    let spinner = icon(&field, "spinner", "icon icon--muted icon--spin icon-overlay__icon");
    spinner.set_attr("data-show", "isSearching");

    text(
        &field,
        "a",
        &[
            ("data-show", "isComplete"),
            ("class", "icon-overlay__text text-bold text-link js-clear-search"),
            ("href", VOID_HREF),
        ],
        "Clear",
    );

    icon_link(&fieldset, "flex js-close-search", "close");

    let subheader = el(&dialog, "div", &[("data-if", "totalResultsText"), ("class", "dialog__subheader")]);
    let muted = el(&subheader, "div", &[("class", "text-sm text-muted")]);
    el(&muted, "span", &[("data-bind", "totalResultsText")]);

    let results = el(&dialog, "div", &[("data-if", "totalResults"), ("class", "dialog__content")]);
    el(&results, "div", &[("class", "js-search-results")]);
}

#[cfg(test)]
mod test {
    use super::*;
    use binder::{MemNode, Selector};

    #[test]
    fn skeleton() {
        let wrapper = build(&MemNode::new("heretto-help"));

        assert!(wrapper.has_class("heretto-help"));
        assert_eq!(wrapper.parent(), None);

        for class in [
            "overlay--main",
            "heretto-help__content",
            "main",
            "footer",
            "js-home",
            "js-show-search",
            "js-resource-article",
            "js-more-links-content",
            "js-article-content",
            "js-search-input",
            "js-clear-search",
            "js-close-search",
            "js-search-results",
        ] {
            assert!(wrapper.query(&Selector::Class(class)).is_some(), "missing .{class}");
        }

        assert_eq!(wrapper.query_all(&Selector::Class("js-toggle-drawer")).len(), 2);
        assert_eq!(wrapper.query_all(&Selector::Class("js-go-back")).len(), 1);
    }

    #[test]
    fn header_footer_and_main_are_content_children() {
        let wrapper = build(&MemNode::new("div"));
        let content = wrapper.query(&Selector::Class("heretto-help__content")).unwrap();
        let tags: Vec<String> = content.children().iter().map(|c| c.tag()).collect();

        assert_eq!(tags, ["header", "main", "footer"]);
    }

    #[test]
    fn back_link_leads_with_its_icon() {
        let wrapper = build(&MemNode::new("div"));
        let back = wrapper.query(&Selector::Class("js-go-back")).unwrap();

        assert_eq!(back.html(), r#"<u-icon sprite="arrow-left" classes="icon"></u-icon>Back"#);
    }
}
