// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Browser glue: the objects behind the `heretto-help` and `u-icon` custom
//! elements. `js/elements.js` defines the elements and forwards their
//! lifecycle callbacks here.

use std::cell::RefCell;
use std::rc::Rc;

use binder::{BindError, DomNode, Selector};
use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    CustomEvent, CustomEventInit, Element, Event, EventTarget, HtmlElement, HtmlInputElement,
    ShadowRootInit, ShadowRootMode,
};

use crate::api::HerettoApi;
use crate::drawer::{HelpDrawer, ToggleDetail};
use crate::events::Registry;
use crate::icon::Icon;
use crate::stylesheet::LinkLoader;
use crate::{init_panic_hook, HelpConfig};

/// Quiet period after the last keystroke before a search goes out.
const SEARCH_DEBOUNCE_MS: u32 = 500;

/// Clicks on these open an article inside the drawer.
const ARTICLE_LINKS: &str = ".search-result, .article-content a";

type Drawer = HelpDrawer<Element, HerettoApi>;

thread_local! {
    static CONFIG: RefCell<Option<HelpConfig>> = RefCell::new(None);
}

/// Set the options every drawer on the page is built with. Must run before
/// the first `heretto-help` element is created.
#[wasm_bindgen]
pub fn configure(options: JsValue) -> Result<(), JsValue> {
    init_panic_hook();

    let config: HelpConfig = serde_wasm_bindgen::from_value(options)?;

    debug!("configured for portal {}", config.portal_url);

    CONFIG.with(|slot| *slot.borrow_mut() = Some(config));

    Ok(())
}

fn config() -> Result<HelpConfig, JsValue> {
    CONFIG
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| JsValue::from_str("help drawer used before `configure`"))
}

fn report(result: Result<(), BindError>) {
    if let Err(err) = result {
        error!("{err}");
    }
}

#[wasm_bindgen]
pub struct HelpElement {
    host: HtmlElement,
    drawer: Rc<Drawer>,
    listeners: Registry<EventListener>,
}

#[wasm_bindgen]
impl HelpElement {
    #[wasm_bindgen(constructor)]
    pub fn new(host: HtmlElement) -> Result<HelpElement, JsValue> {
        let config = config()?;
        let document = host.owner_document().ok_or("element without a document")?;
        let body = document.body().ok_or("document without a body")?;
        let shadow = host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))?;

        let provider = HerettoApi::new(&config);
        let drawer = Rc::new(HelpDrawer::new(
            Element::from(host.clone()),
            body.into(),
            provider,
            config,
        ));

        let loader = LinkLoader::new(document, shadow.clone().into());
        let mounting = drawer.clone();

        spawn_local(async move {
            mounting
                .mount(&loader, |wrapper| {
                    if let Err(err) = shadow.append_child(wrapper) {
                        error!("failed to attach the drawer: {err:?}");
                    }
                })
                .await;
        });

        Ok(HelpElement {
            host,
            drawer,
            listeners: Registry::new(),
        })
    }

    /// Attach every listener. Called from `connectedCallback`.
    pub fn connect(&mut self) {
        let wrapper = self.drawer.wrapper();

        self.on_click("js-home", |drawer| report(drawer.reset_view()));
        self.on_click("js-show-search", |drawer| report(drawer.show_search()));
        self.on_click("js-go-back", |drawer| report(drawer.back()));
        self.on_click("js-close-search", |drawer| report(drawer.close_search()));
        self.on_click("js-clear-search", |drawer| report(drawer.reset_search()));

        if let Some(input) = self.drawer.select("js-search-input") {
            let listener = self.debounced_search(&input);
            self.listeners.register(listener);
        }

        let drawer = self.drawer.clone();
        self.listeners.register(EventListener::new(&wrapper, "click", move |event| {
            let link = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|target| Element::closest(&target, ARTICLE_LINKS).ok().flatten());

            if let Some(path) = link.and_then(|link| link.get_attribute("data-path")) {
                event.prevent_default();

                let drawer = drawer.clone();
                spawn_local(async move { report(drawer.select_article(&path).await) });
            }
        }));

        let drawer = self.drawer.clone();
        self.listeners.register(EventListener::new(&self.host, "toggle", move |event| {
            let detail = event
                .dyn_ref::<CustomEvent>()
                .map(CustomEvent::detail)
                .and_then(|detail| serde_wasm_bindgen::from_value::<ToggleDetail>(detail).ok())
                .unwrap_or_default();

            let drawer = drawer.clone();
            spawn_local(async move { report(drawer.toggle(detail).await) });
        }));

        for toggle in self.all("js-toggle-drawer") {
            let drawer = self.drawer.clone();
            let host: EventTarget = self.host.clone().into();

            self.listeners.register(EventListener::new(&toggle, "click", move |_| {
                dispatch_toggle(&host, &drawer.toggle_request());
            }));
        }

        debug!("connected with {} listeners", self.listeners.len());
    }

    /// Detach everything [`connect`](HelpElement::connect) attached. Called
    /// from `disconnectedCallback`.
    pub fn disconnect(&mut self) {
        let count = self.listeners.clear();

        debug!("disconnected, dropped {count} listeners");
    }

    /// Open or close the drawer as if a `toggle` event carried `detail`.
    pub fn toggle(&self, detail: JsValue) {
        let detail = serde_wasm_bindgen::from_value(detail).unwrap_or_default();

        dispatch_toggle(self.host.as_ref(), &detail);
    }
}

impl HelpElement {
    fn all(&self, class: &str) -> Vec<Element> {
        self.drawer.wrapper().query_all(&Selector::Class(class))
    }

    fn on_click<F>(&mut self, class: &str, handler: F)
    where
        F: Fn(&Drawer) + Clone + 'static,
    {
        for target in self.all(class) {
            let drawer = self.drawer.clone();
            let handler = handler.clone();

            self.listeners.register(EventListener::new(&target, "click", move |_| handler(&drawer)));
        }
    }

    fn debounced_search(&self, input: &Element) -> EventListener {
        let drawer = self.drawer.clone();
        let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();

        EventListener::new(input, "input", move |event: &Event| {
            let query = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();

            let drawer = drawer.clone();

            // Replacing the timeout drops, and so cancels, the previous one
            *pending.borrow_mut() = Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                spawn_local(async move { report(drawer.search(&query).await) });
            }));
        })
    }
}

fn dispatch_toggle(host: &EventTarget, detail: &ToggleDetail) {
    let init = CustomEventInit::new();

    match serde_wasm_bindgen::to_value(detail) {
        Ok(detail) => init.set_detail(&detail),
        Err(err) => error!("failed to encode toggle detail: {err}"),
    }

    match CustomEvent::new_with_event_init_dict("toggle", &init) {
        Ok(event) => {
            let _ = host.dispatch_event(&event);
        }
        Err(err) => error!("failed to build toggle event: {err:?}"),
    }
}

/// Backing object of a `u-icon` element.
#[wasm_bindgen]
pub struct IconElement {
    icon: Icon<Element>,
}

#[wasm_bindgen]
impl IconElement {
    #[wasm_bindgen(constructor)]
    pub fn new(host: HtmlElement) -> Result<IconElement, JsValue> {
        let config = config()?;

        Ok(IconElement {
            icon: Icon::new(host.into(), &config.sprites_url),
        })
    }

    #[wasm_bindgen(js_name = observedAttributes)]
    pub fn observed_attributes() -> js_sys::Array {
        Icon::<Element>::OBSERVED.iter().copied().map(JsValue::from_str).collect()
    }

    /// Called from `connectedCallback`.
    pub fn connect(&mut self) {
        self.icon.connected();
    }

    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(&mut self, name: &str, old: Option<String>, new: Option<String>) {
        report(self.icon.attribute_changed(name, old.as_deref(), new.as_deref()));
    }
}
