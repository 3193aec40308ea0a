// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The help drawer itself

use std::cell::{Cell, RefCell};

use binder::{BindError, Bound, DomNode, Selector};
use futures::future::join_all;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::{Article, ContentProvider};
use crate::content;
use crate::markup;
use crate::stylesheet::{Placement, StylesheetLoader, FONTS, MATERIAL_ICONS};
use crate::HelpConfig;

/// Class on the host element while the drawer is open.
pub const OPEN_CLASS: &str = "heretto-help--open";

/// Payload of the `toggle` event.
///
/// `open` forces a state, without it the drawer flips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

/// Monotonic ticket counter. Taking a ticket invalidates every earlier one,
/// so the response to the latest request is the only one applied.
#[derive(Default)]
struct Sequence(Cell<u64>);

impl Sequence {
    fn next(&self) -> u64 {
        let ticket = self.0.get() + 1;
        self.0.set(ticket);
        ticket
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.0.get() == ticket
    }
}

pub struct HelpDrawer<N, P> {
    host: N,
    body: N,
    bound: RefCell<Bound<N>>,
    provider: P,
    config: HelpConfig,
    body_overflow: RefCell<Option<String>>,
    toggles: Sequence,
    searches: Sequence,
    articles: Sequence,
}

impl<N, P> HelpDrawer<N, P>
where
    N: DomNode,
    P: ContentProvider,
{
    /// Build the drawer markup for `host`. The markup stays detached until
    /// [`mount`](HelpDrawer::mount), bindings apply to it either way. `body` is
    /// the page body, its overflow is locked while the drawer is open.
    pub fn new(host: N, body: N, provider: P, config: HelpConfig) -> Self {
        let wrapper = markup::build(&host);

        HelpDrawer {
            host,
            body,
            bound: RefCell::new(Bound::new(wrapper)),
            provider,
            config,
            body_overflow: RefCell::new(None),
            toggles: Sequence::default(),
            searches: Sequence::default(),
            articles: Sequence::default(),
        }
    }

    pub fn host(&self) -> &N {
        &self.host
    }

    pub fn wrapper(&self) -> N {
        self.bound.borrow().root().clone()
    }

    pub fn config(&self) -> &HelpConfig {
        &self.config
    }

    /// Current value of a state key.
    pub fn state(&self, key: &str) -> Option<Value> {
        self.bound.borrow().get(key).cloned()
    }

    pub fn is_open(&self) -> bool {
        self.host.has_class(OPEN_CLASS)
    }

    /// Detail for a `toggle` event that flips the drawer.
    pub fn toggle_request(&self) -> ToggleDetail {
        ToggleDetail {
            open: Some(!self.is_open()),
            resource_id: None,
        }
    }

    pub fn select(&self, class: &str) -> Option<N> {
        self.bound.borrow().select(&Selector::Class(class))
    }

    fn select_all(&self, class: &str) -> Vec<N> {
        self.bound.borrow().select_all(&Selector::Class(class))
    }

    /// Push `partial` through the bindings, then store it as given: nested
    /// objects here replace what was there instead of merging into it.
    fn update_state(&self, partial: Value) -> Result<(), BindError> {
        let mut bound = self.bound.borrow_mut();

        bound.set_state(partial.clone())?;
        bound.assign(&partial);

        Ok(())
    }

    fn current_article(&self) -> Option<Article> {
        self.state("article").and_then(|article| serde_json::from_value(article).ok())
    }

    fn history(&self) -> Vec<Article> {
        self.state("history")
            .and_then(|history| serde_json::from_value(history).ok())
            .unwrap_or_default()
    }

    /// Wait for fonts and the drawer stylesheet, then hand the markup over to
    /// `attach`.
    pub async fn mount<L, F>(&self, loader: &L, attach: F)
    where
        L: StylesheetLoader,
        F: FnOnce(&N),
    {
        join_all([
            loader.load(FONTS, Placement::Head),
            loader.load(&self.config.styles_url, Placement::Shadow),
            loader.load(MATERIAL_ICONS, Placement::Head),
        ])
        .await;

        attach(&self.wrapper());
    }

    /// Open or close the drawer. An open still waiting on its resource article
    /// is abandoned when another toggle comes in first.
    pub async fn toggle(&self, detail: ToggleDetail) -> Result<(), BindError> {
        let ticket = self.toggles.next();
        let currently_open = self.is_open();
        let open = detail.open.unwrap_or(!currently_open);

        if !currently_open && open {
            self.update_state(json!({ "portalUrl": self.config.portal_url }))?;
            self.reset_view()?;
            self.load_resource_article(detail.resource_id.as_deref()).await;

            if !self.toggles.is_current(ticket) {
                debug!("open superseded while loading the resource article");
                return Ok(());
            }

            self.render_more_links();
            self.reset_scroll(None, None);

            let overflow = self.body.style_prop("overflow");
            *self.body_overflow.borrow_mut() = Some(overflow);
            self.body.set_style_prop("overflow", "hidden");
        } else if currently_open && !open {
            let overflow = self.body_overflow.borrow_mut().take().unwrap_or_default();
            self.body.set_style_prop("overflow", &overflow);
        }

        self.host.toggle_class(OPEN_CLASS, open);

        Ok(())
    }

    /// Back to the landing view: no article, no search, no history.
    pub fn reset_view(&self) -> Result<(), BindError> {
        self.searches.next();
        self.articles.next();

        self.update_state(json!({
            "article": { "href": null },
            "showSearch": false,
            "searchText": "",
            "isSearching": false,
            "isComplete": false,
            "searchResults": null,
            "totalResults": 0,
            "totalResultsText": "",
            "history": [],
        }))
    }

    pub fn show_search(&self) -> Result<(), BindError> {
        self.update_state(json!({ "showSearch": true }))?;

        if let Some(input) = self.select("js-search-input") {
            input.focus();
        }

        Ok(())
    }

    pub fn close_search(&self) -> Result<(), BindError> {
        self.update_state(json!({ "showSearch": false }))
    }

    pub fn reset_search(&self) -> Result<(), BindError> {
        self.searches.next();

        self.update_state(json!({
            "isSearching": false,
            "isComplete": false,
            "searchText": "",
            "searchResults": null,
            "totalResults": 0,
            "totalResultsText": "",
        }))?;

        if let Some(input) = self.select("js-search-input") {
            input.focus();
        }
        self.reset_scroll(None, None);

        Ok(())
    }

    pub async fn search(&self, query: &str) -> Result<(), BindError> {
        let ticket = self.searches.next();

        self.update_state(json!({ "isSearching": true, "isComplete": false }))?;

        let (hits, total, total_text, html) = match self.provider.search(query).await {
            Ok(results) => {
                let html = match results.total_results {
                    0 => String::new(),
                    _ => content::search_results_markup(&results.hits),
                };
                let hits = serde_json::to_value(&results.hits).unwrap_or_default();
                let total = results.total_results;

                (hits, total, content::results_text(total), html)
            }
            Err(err) => {
                warn!("search for {query:?} failed: {err}");
                (json!([]), 0, String::new(), String::new())
            }
        };

        if !self.searches.is_current(ticket) {
            debug!("dropping stale results for {query:?}");
            return Ok(());
        }

        if let Some(container) = self.select("js-search-results") {
            container.set_html(&html);
        }

        self.update_state(json!({
            "isSearching": false,
            "isComplete": true,
            "searchText": query,
            "searchResults": hits,
            "totalResults": total,
            "totalResultsText": total_text,
            "article": { "href": null },
        }))?;
        self.reset_scroll(None, None);

        Ok(())
    }

    /// Open the article at `link`, a portal path with an optional `#anchor`.
    pub async fn select_article(&self, link: &str) -> Result<(), BindError> {
        self.close_search()?;

        let (path, anchor) = match link.split_once('#') {
            Some((path, anchor)) => (path, Some(anchor)),
            None => (link, None),
        };
        let container = self.select("js-article-content");
        let target = content::portal_href(&self.config.portal_url, path);
        let current = self.current_article().and_then(|article| article.href);

        if current.as_deref() != Some(target.as_str()) {
            let ticket = self.articles.next();

            let article = match self.provider.fetch_article_by_path(path).await {
                Ok(article) => article,
                Err(err) => {
                    warn!("article {path} failed to load: {err}");
                    content::error_article(content::NO_ARTICLE, Some(link))
                }
            };

            if !self.articles.is_current(ticket) {
                debug!("dropping stale article {path}");
                return Ok(());
            }

            let article = self.load_article(article, container.as_ref());
            let mut history = self.history();

            if let Some(current) = self.current_article().filter(|a| a.href.is_some()) {
                history.push(current);
            }

            self.update_state(json!({ "article": article, "history": history }))?;
        }

        self.reset_scroll(anchor, container.as_ref());

        Ok(())
    }

    /// Go back to the previous article, or to the landing view when there is
    /// none.
    pub fn back(&self) -> Result<(), BindError> {
        self.articles.next();

        let mut history = self.history();

        match history.pop() {
            Some(previous) => {
                let container = self.select("js-article-content");
                let article = self.load_article(previous, container.as_ref());

                self.update_state(json!({ "article": article, "history": history }))?;
            }
            None => self.update_state(json!({ "article": { "href": null } }))?,
        }

        self.reset_scroll(None, None);

        Ok(())
    }

    /// Render `article` into `container`, returning it with a portal href.
    fn load_article(&self, mut article: Article, container: Option<&N>) -> Article {
        let portal = &self.config.portal_url;

        article.href = article.href.map(|href| content::portal_href(portal, &href));

        if let Some(container) = container {
            container.set_html(&content::article_markup(&article, portal));
        }

        article
    }

    async fn load_resource_article(&self, resource_id: Option<&str>) {
        let container = self.select("js-resource-article");

        let found = match resource_id {
            Some(id) => match self.provider.fetch_article_by_resource_id(id).await {
                Ok(article) => Some(article),
                Err(err) => {
                    warn!("no article for resource {id}: {err}");
                    None
                }
            },
            None => None,
        };

        match found {
            Some(article) => {
                if let Some(container) = &container {
                    container.set_html(&content::resource_article_markup(&article));
                }
            }
            None => {
                let article = content::error_article(content::NO_RESOURCE_ARTICLE, None);
                self.load_article(article, container.as_ref());
            }
        }
    }

    fn render_more_links(&self) {
        let urls = &self.config.other_urls;

        if let Some(list) = self.select("js-more-links-content") {
            list.set_html("");

            for url in urls {
                let item = list.create("li");
                let link = list.create("a");

                link.set_attr("class", "link");
                link.set_attr("href", &url.href);
                link.set_text(&url.text);

                if let Some(target) = &url.target {
                    link.set_attr("target", target);
                    markup::icon(&link, "new-window", "icon icon--sm");
                }

                item.append(&link);
                list.append(&item);
            }
        }

        if let Some(nav) = self.select("more-links") {
            nav.toggle_class("hidden", urls.is_empty());
        }
    }

    fn reset_scroll(&self, anchor: Option<&str>, container: Option<&N>) {
        if let Some(anchor) = anchor {
            let wrapper = self.wrapper();
            let scope = container.unwrap_or(&wrapper);

            if let Some(target) = scope.query(&Selector::Id(anchor)) {
                target.scroll_into_view();
                return;
            }
        }

        if let Some(main) = self.select("main") {
            main.set_scroll_top(0);
        }
        for dialog in self.select_all("dialog__content") {
            dialog.set_scroll_top(0);
        }
    }
}
