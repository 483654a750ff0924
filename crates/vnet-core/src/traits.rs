// crates/vnet-core/src/traits.rs
use crate::error::Result;
use crate::language::primary_subtag;
use crate::thankyou::{Consumer, VoucherNetworkIframe};

/// Environment collaborator consulted when a multi-language country gets no
/// explicit language.
///
/// Implementors only expose the raw tags; the precedence rule lives in the
/// provided [`LanguageDetector::detect_primary_language_subtag`].
///
/// # Examples
/// ```rust
/// use vnet_core::traits::LanguageDetector;
///
/// struct Page;
/// impl LanguageDetector for Page {
///     fn document_language(&self) -> Option<String> { Some(String::new()) }
///     fn navigator_language(&self) -> Option<String> { Some("fr-CH".into()) }
/// }
///
/// assert_eq!(Page.detect_primary_language_subtag(), "fr");
/// ```
pub trait LanguageDetector {
    /// Language declared by the document (`<html lang>`), if any.
    fn document_language(&self) -> Option<String>;

    /// Language negotiated by the runtime (`navigator.language`), if any.
    fn navigator_language(&self) -> Option<String>;

    /// Primary subtag of the document language, or of the runtime language
    /// when the document one is empty. Empty when neither is available.
    fn detect_primary_language_subtag(&self) -> String {
        let document = self.document_language().unwrap_or_default();
        let from_document = primary_subtag(&document);
        if !from_document.is_empty() {
            return from_document.to_owned();
        }
        let navigator = self.navigator_language().unwrap_or_default();
        primary_subtag(&navigator).to_owned()
    }
}

/// Key/value cookie storage used by the landing-page parameter harvesting.
pub trait CookieStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn clear(&mut self, key: &str);
}

/// Where a plain script tag is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptTarget {
    Head,
    Body,
}

/// Builds and inserts the partner widget once a leaf resolved, and loads the
/// Optimize scripts.
pub trait ScriptInjector {
    /// `container_selector` is the settings' `iframeContainerId`; implementors
    /// fall back to the document body when it is absent or matches nothing.
    fn inject_voucher_network(
        &mut self,
        iframe: &VoucherNetworkIframe,
        consumer: &Consumer,
        container_selector: Option<&str>,
    ) -> Result<()>;

    /// Appends `<script src=...>` to `target`.
    fn load_script(&mut self, src: &str, target: ScriptTarget) -> Result<()>;
}
