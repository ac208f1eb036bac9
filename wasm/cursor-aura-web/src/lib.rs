//! WASM bindings for Aura themed cursors.
//!
//! Exposes the imperative API (`init`, `setColor`, `destroy`) backed by a
//! page-wide singleton, and an `Aura` class for component frameworks that
//! want one binding per mounted instance.

mod dom;

use std::cell::RefCell;

use cursor_aura::{
    Aura, AuraConfig, AuraError, AuraVanilla, BindingState, CursorKind, InitOptions,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub use dom::{WebDocument, WebWindow};

thread_local! {
    static AURA: RefCell<Option<AuraVanilla<WebDocument>>> = const { RefCell::new(None) };
}

/// Initialize panic hook and logging for better error messages
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("[AURA] WASM module initialized");
}

fn to_js_error(err: AuraError) -> JsValue {
    serde_wasm_bindgen::to_value(&err).unwrap_or_else(|_| JsValue::from_str(&err.to_string()))
}

/// Read `{ color, pressedVariants, observedAttributes, themeEvent, document }`.
///
/// A bare string is taken as the color; `undefined` means all defaults.
fn parse_options(options: JsValue) -> Result<InitOptions<WebDocument>, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(InitOptions::default());
    }
    if let Some(color) = options.as_string() {
        return Ok(InitOptions::color(color));
    }

    let document = js_sys::Reflect::get(&options, &JsValue::from_str("document"))?
        .dyn_into::<web_sys::Document>()
        .ok()
        .map(WebDocument);

    // Deserialize a copy without the DOM node
    let plain = js_sys::Object::assign(&js_sys::Object::new(), options.unchecked_ref());
    js_sys::Reflect::delete_property(&plain, &JsValue::from_str("document"))?;
    let mut config: AuraConfig = serde_wasm_bindgen::from_value(plain.into())
        .map_err(|e| to_js_error(AuraError::Other(format!("Invalid options: {}", e))))?;
    config.validate();

    Ok(InitOptions { config, document })
}

fn with_singleton<R>(f: impl FnOnce(&mut AuraVanilla<WebDocument>) -> R) -> Option<R> {
    AURA.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = WebDocument::current().map(AuraVanilla::new);
        }
        slot.as_mut().map(f)
    })
}

/// Apply themed cursors to the page (or `options.document`).
///
/// Returns whether cursors are active. Touch-only devices keep native cursors.
#[wasm_bindgen]
pub fn init(options: JsValue) -> Result<bool, JsValue> {
    let options = parse_options(options)?;
    let state = with_singleton(|aura| aura.init(options));
    if state.is_none() {
        log::debug!("[AURA] No document available, init skipped");
    }
    Ok(state == Some(BindingState::Active))
}

/// Change the shadow color of the active binding.
#[wasm_bindgen(js_name = setColor)]
pub fn set_color(color: &str) {
    with_singleton(|aura| aura.set_color(color));
}

/// Remove the stylesheet, the cursor properties and every listener.
#[wasm_bindgen]
pub fn destroy() {
    AURA.with(|cell| {
        if let Some(aura) = cell.borrow_mut().as_mut() {
            aura.destroy();
        }
    });
}

/// Raw SVG markup for one cursor kind.
#[wasm_bindgen(js_name = generateCursorSvg)]
pub fn generate_cursor_svg(color: &str, kind: &str) -> Result<String, JsValue> {
    let kind: CursorKind = kind.parse().map_err(|e: String| JsValue::from_str(&e))?;
    Ok(cursor_aura::generate_cursor_svg(color, kind))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CursorValue {
    kind: CursorKind,
    data_uri: String,
    hotspot: (u32, u32),
    css: String,
}

/// Every cursor kind for `color` as `{ kind, dataUri, hotspot, css }` objects.
///
/// Returns `null` for colors that cannot be embedded.
#[wasm_bindgen(js_name = generateThemedCursors)]
pub fn generate_themed_cursors(color: &str, pressed: Option<bool>) -> Result<JsValue, JsValue> {
    let Some(set) = cursor_aura::generate_themed_cursors(color, pressed.unwrap_or(false)) else {
        return Ok(JsValue::NULL);
    };
    let values: Vec<CursorValue> = set
        .iter()
        .map(|(kind, image)| CursorValue {
            kind,
            data_uri: image.data_uri.clone(),
            hotspot: image.hotspot,
            css: cursor_aura::cursor_css(image, kind, kind.fallback()),
        })
        .collect();
    serde_wasm_bindgen::to_value(&values).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Component-style binding: one instance per mounted component.
///
/// Outside a browsing context every method is a no-op.
#[wasm_bindgen(js_name = Aura)]
pub struct AuraComponent {
    inner: Option<Aura<WebDocument>>,
}

impl AuraComponent {
    fn for_document(doc: Option<WebDocument>, color: Option<String>) -> Self {
        if doc.is_none() {
            log::debug!("[AURA] No document available, component stays idle");
        }
        let inner = doc.map(|doc| match color {
            Some(color) => Aura::with_color(doc, color),
            None => Aura::new(doc),
        });
        AuraComponent { inner }
    }
}

#[wasm_bindgen(js_class = Aura)]
impl AuraComponent {
    #[wasm_bindgen(constructor)]
    pub fn new(color: Option<String>, document: Option<web_sys::Document>) -> AuraComponent {
        let doc = document.map(WebDocument).or_else(WebDocument::current);
        Self::for_document(doc, color)
    }

    /// Returns whether cursors are active after mounting.
    pub fn mount(&mut self) -> bool {
        self.inner
            .as_mut()
            .is_some_and(|aura| aura.mount() == BindingState::Active)
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, color: String) {
        if let Some(aura) = self.inner.as_mut() {
            aura.set_color(color);
        }
    }

    #[wasm_bindgen(js_name = setVisible)]
    pub fn set_visible(&mut self, visible: bool) {
        if let Some(aura) = self.inner.as_mut() {
            aura.set_visible(visible);
        }
    }

    pub fn unmount(&mut self) {
        if let Some(aura) = self.inner.as_mut() {
            aura.unmount();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn color(&self) -> Option<String> {
        self.inner.as_ref().map(|aura| aura.color().to_string())
    }

    #[wasm_bindgen(getter, js_name = appliedColor)]
    pub fn applied_color(&self) -> Option<String> {
        self.inner.as_ref().and_then(|aura| aura.applied_color())
    }
}
