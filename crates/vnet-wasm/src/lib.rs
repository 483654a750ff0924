//! vnet-wasm — WebAssembly bindings for vnet-core
//!
//! This crate exposes the Voucher Network logic of `vnet-core` to the
//! browser: the thank-you and landing page scripts, plus the helpers the
//! admin settings form calls on every edit.
//!
//! What it provides
//! ----------------
//! - Automatic initialization on module load (via `#[wasm_bindgen(start)]`)
//! - Resolution: `resolve_voucher_network(settings, country, language)`
//! - Admin editing: `set_enabled(...)`, `set_field(...)`, `country_status(...)`,
//!   `is_usable(leaf)`, `languages_by_country()`, `get_stats(settings)`
//! - Page flows: `run_thank_you_page(config)`, `run_landing_page(config, scriptUrl)`
//!
//! Quick start (thank-you page)
//! ----------------------------
//! ```javascript
//! import init, { run_thank_you_page } from 'vnet-wasm';
//!
//! async function main() {
//!   await init();
//!   const status = run_thank_you_page(window.sovThankyouConfig);
//!   console.log(status.loadedVoucherNetwork);
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - Settings cross the boundary as plain JSON-shaped objects, in the same
//!   camelCase layout the admin persists.
//! - Editing functions return the next settings object; the input is never
//!   modified, and an edit that changes nothing returns the input object itself.
//! - Browser access is confined to the three collaborator types below; all
//!   decisions are made in `vnet-core`.

use std::sync::Arc;

use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use vnet_core::editor;
use vnet_core::landing::{
    self, clear_cookie_assignment, cookie_assignment, LandingPageConfig, COOKIE_LIFETIME_DAYS,
};
use vnet_core::thankyou::{self, Consumer, ThankYouPageConfig, VoucherNetworkIframe};
use vnet_core::traits::{CookieStore, LanguageDetector, ScriptInjector, ScriptTarget};
use vnet_core::{
    resolve_voucher_network_settings, CountryCode, LanguageCode, LanguageSettings, TrafficField,
    VnetError, VoucherNetworkSettings, LANGUAGES_BY_COUNTRIES,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const FLEXIBLE_IFRAME_SCRIPT: &str = "https://api.sovendus.com/sovabo/common/js/flexibleIframe.js";
const CONTAINER_ID: &str = "sovendus-integration-container";

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing Voucher Network WASM module...".into());
    web_sys::console::log_1(
        &format!("✓ {} countries supported", LANGUAGES_BY_COUNTRIES.len()).into(),
    );
}

/* --------------------------------------------------------------------------
   Boundary helpers
-------------------------------------------------------------------------- */

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Plain objects instead of `Map`s, so results read like the persisted JSON.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(js_err)
}

fn settings_from_js(settings: JsValue) -> Result<VoucherNetworkSettings, JsValue> {
    if settings.is_undefined() || settings.is_null() {
        return Ok(VoucherNetworkSettings::default());
    }
    from_value(settings).map_err(js_err)
}

fn leaf_key(country: &str, language: &str) -> Result<(CountryCode, LanguageCode), JsValue> {
    let country = CountryCode::parse_normalized(country).map_err(js_err)?;
    let language = language.parse::<LanguageCode>().map_err(js_err)?;
    Ok((country, language))
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn document() -> Result<web_sys::Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/* --------------------------------------------------------------------------
   Browser collaborators
-------------------------------------------------------------------------- */

/// `<html lang>` first, `navigator.language` second.
pub struct BrowserLanguageDetector;

impl LanguageDetector for BrowserLanguageDetector {
    fn document_language(&self) -> Option<String> {
        let root = web_sys::window()?.document()?.document_element()?;
        root.dyn_into::<web_sys::HtmlElement>()
            .ok()
            .map(|html| html.lang())
    }

    fn navigator_language(&self) -> Option<String> {
        web_sys::window()?.navigator().language()
    }
}

/// `document.cookie`, scoped to the current hostname.
pub struct DocumentCookieStore {
    document: web_sys::HtmlDocument,
    domain: String,
}

impl DocumentCookieStore {
    pub fn new() -> Result<Self, JsValue> {
        let window = window()?;
        let domain = window.location().hostname()?;
        let document = document()?.dyn_into::<web_sys::HtmlDocument>()?;
        Ok(DocumentCookieStore { document, domain })
    }

    fn write(&self, assignment: &str) {
        if let Err(err) = self.document.set_cookie(assignment) {
            web_sys::console::error_2(&"failed to write cookie".into(), &err);
        }
    }
}

impl CookieStore for DocumentCookieStore {
    fn get(&self, key: &str) -> Option<String> {
        let cookies = self.document.cookie().ok()?;
        cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.to_owned())
    }

    fn set(&mut self, key: &str, value: &str) {
        let expires = js_sys::Date::new_0();
        expires.set_time(expires.get_time() + f64::from(COOKIE_LIFETIME_DAYS) * 86_400_000.0);
        let expires: String = expires.to_utc_string().into();
        self.write(&cookie_assignment(key, value, &self.domain, &expires));
    }

    fn clear(&mut self, key: &str) {
        self.write(&clear_cookie_assignment(key, &self.domain));
    }
}

/// Publishes `window.sovIframes` / `window.sovConsumer`, loads the partner
/// widget script and appends the Optimize scripts.
pub struct DomScriptInjector;

fn script_element(src: &str) -> Result<web_sys::HtmlScriptElement, JsValue> {
    let script = document()?
        .create_element("script")?
        .dyn_into::<web_sys::HtmlScriptElement>()?;
    script.set_type("text/javascript");
    script.set_async(true);
    script.set_src(src);
    Ok(script)
}

impl DomScriptInjector {
    fn inject(
        &self,
        iframe: &VoucherNetworkIframe,
        consumer: &Consumer,
        container_selector: Option<&str>,
    ) -> Result<(), JsValue> {
        let window = window()?;
        let document = document()?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no document body"))?;

        let iframes = js_sys::Reflect::get(&window, &"sovIframes".into())?
            .dyn_into::<js_sys::Array>()
            .unwrap_or_else(|_| js_sys::Array::new());
        iframes.push(&to_js(iframe)?);
        js_sys::Reflect::set(&window, &"sovIframes".into(), &iframes)?;
        js_sys::Reflect::set(&window, &"sovConsumer".into(), &to_js(consumer)?)?;

        let container = document.create_element("div")?;
        container.set_id(CONTAINER_ID);
        let root = match container_selector {
            Some(selector) if !selector.is_empty() => document.query_selector(selector)?,
            _ => None,
        };
        match root {
            Some(root) => root.append_child(&container)?,
            None => body.append_child(&container)?,
        };

        let script = script_element(FLEXIBLE_IFRAME_SCRIPT)?;
        body.append_child(&script)?;
        Ok(())
    }

    fn append_script(&self, src: &str, target: ScriptTarget) -> Result<(), JsValue> {
        let document = document()?;
        let parent: web_sys::HtmlElement = match target {
            ScriptTarget::Head => document.head().map(Into::into),
            ScriptTarget::Body => document.body(),
        }
        .ok_or_else(|| JsValue::from_str("no script parent element"))?;
        let script = script_element(src)?;
        parent.append_child(&script)?;
        Ok(())
    }
}

impl ScriptInjector for DomScriptInjector {
    fn inject_voucher_network(
        &mut self,
        iframe: &VoucherNetworkIframe,
        consumer: &Consumer,
        container_selector: Option<&str>,
    ) -> vnet_core::Result<()> {
        self.inject(iframe, consumer, container_selector)
            .map_err(|err| VnetError::Injection(format!("{err:?}")))
    }

    fn load_script(&mut self, src: &str, target: ScriptTarget) -> vnet_core::Result<()> {
        self.append_script(src, target)
            .map_err(|err| VnetError::Injection(format!("{err:?}")))
    }
}

/* --------------------------------------------------------------------------
   Resolution
-------------------------------------------------------------------------- */

/// Resolves the active leaf; `undefined` when nothing applies.
#[wasm_bindgen]
pub fn resolve_voucher_network(
    settings: JsValue,
    country: Option<String>,
    language: Option<String>,
) -> Result<JsValue, JsValue> {
    let settings = settings_from_js(settings)?;
    let resolution = resolve_voucher_network_settings(
        &settings,
        country.as_deref(),
        language.as_deref(),
        &BrowserLanguageDetector,
    );
    match resolution.settings() {
        Some(leaf) => to_js(leaf),
        None => Ok(JsValue::UNDEFINED),
    }
}

/* --------------------------------------------------------------------------
   Admin editing
-------------------------------------------------------------------------- */

/// Applies one edit to the settings object the admin UI holds.
///
/// An edit that changes nothing hands back `settings` itself, so callers can
/// compare with `Object.is`. Otherwise a new object is built from the typed
/// tree; unsupported keys do not survive that rebuild.
fn apply_edit(
    settings: JsValue,
    edit: impl FnOnce(&Arc<VoucherNetworkSettings>) -> Arc<VoucherNetworkSettings>,
) -> Result<JsValue, JsValue> {
    let tree = Arc::new(settings_from_js(settings.clone())?);
    let next = edit(&tree);
    if Arc::ptr_eq(&tree, &next) {
        return Ok(settings);
    }
    to_js(next.as_ref())
}

#[wasm_bindgen]
pub fn set_enabled(
    settings: JsValue,
    country: &str,
    language: &str,
    checked: bool,
) -> Result<JsValue, JsValue> {
    let (country, language) = leaf_key(country, language)?;
    apply_edit(settings, |tree| {
        editor::set_enabled(tree, country, language, checked)
    })
}

/// `field` is `trafficSourceNumber` / `trafficMediumNumber` (or `source` / `medium`).
#[wasm_bindgen]
pub fn set_field(
    settings: JsValue,
    country: &str,
    language: &str,
    field: &str,
    value: &str,
) -> Result<JsValue, JsValue> {
    let (country, language) = leaf_key(country, language)?;
    let field = field.parse::<TrafficField>().map_err(js_err)?;
    apply_edit(settings, |tree| {
        editor::set_field(tree, country, language, field, value)
    })
}

/// Admin status text, e.g. `"Source: 123, Medium: 456"`.
#[wasm_bindgen]
pub fn country_status(settings: JsValue, country: &str, language: &str) -> Result<String, JsValue> {
    let (country, language) = leaf_key(country, language)?;
    let settings = settings_from_js(settings)?;
    Ok(editor::country_status(&settings, country, language).to_string())
}

#[wasm_bindgen]
pub fn is_usable(leaf: JsValue) -> Result<bool, JsValue> {
    if leaf.is_undefined() || leaf.is_null() {
        return Ok(false);
    }
    let leaf: LanguageSettings = from_value(leaf).map_err(js_err)?;
    Ok(vnet_core::validation::is_usable(Some(&leaf)))
}

#[wasm_bindgen]
pub fn languages_by_country() -> Result<JsValue, JsValue> {
    to_js(&*LANGUAGES_BY_COUNTRIES)
}

#[wasm_bindgen]
pub fn get_stats(settings: JsValue) -> Result<JsValue, JsValue> {
    let settings = settings_from_js(settings)?;
    to_js(&settings.stats())
}

/* --------------------------------------------------------------------------
   Page flows
-------------------------------------------------------------------------- */

/// Runs the thank-you flow. Returns the status object the page used to keep
/// in `window.sovThankyouStatus`.
#[wasm_bindgen]
pub fn run_thank_you_page(config: JsValue) -> Result<JsValue, JsValue> {
    let config: Option<ThankYouPageConfig> = if config.is_undefined() || config.is_null() {
        None
    } else {
        Some(from_value(config).map_err(js_err)?)
    };
    let status = thankyou::run_thank_you_page(
        config.as_ref(),
        &BrowserLanguageDetector,
        &mut DomScriptInjector,
    );
    if !status.sov_thankyou_config_found {
        web_sys::console::error_1(&"sovThankyouConfig is not defined".into());
    }
    to_js(&status)
}

/// Harvests partner URL parameters into cookies and loads the Optimize tag
/// when `config` (`window.sovPageConfig`) has an applicable id. `script_url`
/// is the loader script's own `src`, consulted for keys the page URL lacks.
#[wasm_bindgen]
pub fn run_landing_page(config: JsValue, script_url: Option<String>) -> Result<JsValue, JsValue> {
    let config: Option<LandingPageConfig> = if config.is_undefined() || config.is_null() {
        None
    } else {
        Some(from_value(config).map_err(js_err)?)
    };
    let page_url = window()?.location().href()?;
    let mut cookies = DocumentCookieStore::new()?;
    let status = landing::run_landing_page(
        config.as_ref(),
        &page_url,
        script_url.as_deref(),
        &mut cookies,
        &mut DomScriptInjector,
    )
    .map_err(js_err)?;
    if status.stored_cookies {
        web_sys::console::log_1(&"Sovendus URL parameters stored".into());
    }
    to_js(&status)
}
