//! `AuraDocument` over the real DOM.

use cursor_aura::dom::{AuraDocument, AuraWindow, Callback, StyleHandle, Subscription};
use cursor_aura::error::{AuraError, AuraResult, OptionExt, ResultExt};
use gloo_events::EventListener;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, MutationObserver, MutationObserverInit};

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// A browser document: the main page, an iframe's, or a pop-out window's.
#[derive(Clone)]
pub struct WebDocument(pub Document);

impl WebDocument {
    /// The current page's document.
    pub fn current() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(WebDocument)
    }

    fn root(&self) -> AuraResult<Element> {
        self.0.document_element().context("Document has no root element")
    }

    fn root_style(&self) -> AuraResult<CssStyleDeclaration> {
        let root = self
            .root()?
            .dyn_into::<HtmlElement>()
            .map_err(|_| AuraError::DomError("Root element is not an HTML element".to_string()))?;
        Ok(root.style())
    }

    fn style_element(&self, id: &str) -> AuraResult<Element> {
        self.0
            .get_element_by_id(id)
            .ok_or_else(|| AuraError::ElementNotFound { id: id.to_string() })
    }
}

/// The window a [`WebDocument`] is displayed in.
#[derive(Clone)]
pub struct WebWindow(pub web_sys::Window);

impl AuraWindow for WebWindow {
    fn matches_media(&self, query: &str) -> bool {
        match self.0.match_media(query) {
            Ok(Some(list)) => list.matches(),
            Ok(None) => false,
            Err(e) => {
                log::warn!("[AURA] matchMedia({}) failed: {}", query, js_error(e));
                false
            },
        }
    }

    fn listen(&self, event: &str, callback: Callback) -> AuraResult<Subscription> {
        let listener = EventListener::new(&self.0, event.to_string(), move |_| callback());
        Ok(Subscription::new(move || drop(listener)))
    }
}

impl AuraDocument for WebDocument {
    type Window = WebWindow;

    fn window(&self) -> Option<WebWindow> {
        self.0.default_view().map(WebWindow)
    }

    fn find_style(&self, id: &str) -> Option<StyleHandle> {
        self.0.get_element_by_id(id).map(|element| StyleHandle {
            id: id.to_string(),
            media: element.get_attribute("media"),
        })
    }

    fn prepend_style(&self, id: &str, css: &str) -> AuraResult<StyleHandle> {
        let head = self.0.head().ok_or(AuraError::NoEnvironment)?;
        let style = self
            .0
            .create_element("style")
            .map_err(js_error)
            .context("create <style>")?;
        style.set_id(id);
        style.set_text_content(Some(css));
        head.prepend_with_node_1(&style)
            .map_err(js_error)
            .context("prepend <style> to <head>")?;
        Ok(StyleHandle {
            id: id.to_string(),
            media: None,
        })
    }

    fn remove_element(&self, id: &str) -> AuraResult<()> {
        if let Some(element) = self.0.get_element_by_id(id) {
            element.remove();
        }
        Ok(())
    }

    fn set_style_media(&self, id: &str, media: Option<&str>) -> AuraResult<()> {
        let element = self.style_element(id)?;
        let result = match media {
            Some(media) => element.set_attribute("media", media),
            None => element.remove_attribute("media"),
        };
        result
            .map_err(js_error)
            .with_context(|| format!("set media on #{}", id))
    }

    fn set_root_property(&self, name: &str, value: &str) -> AuraResult<()> {
        self.root_style()?
            .set_property(name, value)
            .map_err(js_error)
            .with_context(|| format!("set {}", name))
    }

    fn remove_root_property(&self, name: &str) -> AuraResult<()> {
        self.root_style()?
            .remove_property(name)
            .map(|_| ())
            .map_err(js_error)
            .with_context(|| format!("remove {}", name))
    }

    fn root_property(&self, name: &str) -> Option<String> {
        self.root_style()
            .ok()
            .and_then(|style| style.get_property_value(name).ok())
            .filter(|value| !value.is_empty())
    }

    fn computed_root_property(&self, name: &str) -> Option<String> {
        let window = self.0.default_view()?;
        let root = self.root().ok()?;
        let style = window.get_computed_style(&root).ok().flatten()?;
        style
            .get_property_value(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn observe_root_attributes(
        &self,
        attributes: &[&str],
        callback: Callback,
    ) -> AuraResult<Subscription> {
        let root = self.root()?;
        let handler = Closure::<dyn FnMut()>::new(move || callback());
        let observer = MutationObserver::new(handler.as_ref().unchecked_ref())
            .map_err(js_error)
            .context("create MutationObserver")?;

        let filter: js_sys::Array = attributes.iter().map(|name| JsValue::from_str(name)).collect();
        let init = MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_filter(&filter);
        observer
            .observe_with_options(&root, &init)
            .map_err(js_error)
            .context("observe root attributes")?;

        Ok(Subscription::new(move || {
            observer.disconnect();
            drop(handler);
        }))
    }
}
