//! Request language resolution.
//!
//! The target language of a request is decided by a fixed chain of signals:
//!
//! 1. the `lang` request parameter (a language code)
//! 2. the `X-Lang` request header (a language code)
//! 3. the `locale` request parameter (a long-form locale such as `fr_FR`),
//!    mapped to a code through the known languages
//!
//! The first signal carrying a non-empty value wins and the rest are never
//! read. Signals are pulled lazily through [`SignalSource`], so the adapters
//! below ([`RequestSignals`] for a structured request, [`AmbientSignals`] for
//! raw CGI-style data) all share exactly one algorithm.

use crate::i18n::{sanitize_text, KnownLanguages};
use axum::extract::Query;
use axum::http::{HeaderMap, Uri};
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::debug;

/// Request parameter carrying an explicit language code.
pub const LANG_PARAM: &str = "lang";

/// Request header carrying a language code.
pub const LANGUAGE_HEADER: &str = "x-lang";

/// Request parameter carrying a long-form locale.
pub const LOCALE_PARAM: &str = "locale";

/// Ambient variable holding the raw query string.
pub const AMBIENT_QUERY_STRING: &str = "QUERY_STRING";

/// Ambient variable holding the language header, CGI-style.
pub const AMBIENT_LANGUAGE_HEADER: &str = "HTTP_X_LANG";

/// A source of the three language signals, read on demand.
///
/// Values are borrowed where the source already holds text and owned where
/// it has to decode raw bytes first.
pub trait SignalSource {
    /// Raw value of the explicit language parameter.
    fn lang_param(&self) -> Option<Cow<'_, str>>;

    /// Raw value of the language header.
    fn language_header(&self) -> Option<Cow<'_, str>>;

    /// Raw value of the locale parameter.
    fn locale_param(&self) -> Option<Cow<'_, str>>;
}

/// Resolve the target language code for a request.
///
/// Returns `None` when no signal is present, when the winning signal
/// sanitizes to an empty string, or when the locale signal matches no known
/// language. Only the locale path consults `known`; codes arriving through
/// the parameter or header are returned without checking they exist.
///
/// # Example
/// ```
/// use catalog_translations::i18n::{resolve_language, KnownLanguages, Language, LanguageSignals};
///
/// let known = KnownLanguages::new(vec![Language::with_locale("fr", "fr_FR")]);
/// let signals = LanguageSignals {
///     locale: Some("fr_FR".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(resolve_language(&signals, &known).as_deref(), Some("fr"));
/// ```
pub fn resolve_language<S>(source: &S, known: &KnownLanguages) -> Option<String>
where
    S: SignalSource + ?Sized,
{
    if let Some(raw) = non_empty(source.lang_param()) {
        debug!("Language resolved from '{}' parameter", LANG_PARAM);
        return accept(&raw);
    }

    if let Some(raw) = non_empty(source.language_header()) {
        debug!("Language resolved from '{}' header", LANGUAGE_HEADER);
        return accept(&raw);
    }

    if let Some(raw) = non_empty(source.locale_param()) {
        let locale = sanitize_text(&raw);
        let resolved = known.find_by_locale(&locale).map(|lang| lang.code.clone());
        if resolved.is_none() {
            debug!("Locale '{}' matches no known language", locale);
        }
        return resolved;
    }

    None
}

fn non_empty(value: Option<Cow<'_, str>>) -> Option<Cow<'_, str>> {
    value.filter(|v| !v.is_empty())
}

fn accept(raw: &str) -> Option<String> {
    let code = sanitize_text(raw);
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

// ==================== Plain Record ====================

/// The three signals as plain optional values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSignals {
    pub lang: Option<String>,
    pub header: Option<String>,
    pub locale: Option<String>,
}

impl SignalSource for LanguageSignals {
    fn lang_param(&self) -> Option<Cow<'_, str>> {
        self.lang.as_deref().map(Cow::Borrowed)
    }

    fn language_header(&self) -> Option<Cow<'_, str>> {
        self.header.as_deref().map(Cow::Borrowed)
    }

    fn locale_param(&self) -> Option<Cow<'_, str>> {
        self.locale.as_deref().map(Cow::Borrowed)
    }
}

// ==================== Structured Request Adapter ====================

/// Signals read from an already-parsed request: its query map and headers.
#[derive(Debug, Clone, Copy)]
pub struct RequestSignals<'a> {
    query: &'a HashMap<String, String>,
    headers: &'a HeaderMap,
}

impl<'a> RequestSignals<'a> {
    pub fn new(query: &'a HashMap<String, String>, headers: &'a HeaderMap) -> Self {
        Self { query, headers }
    }
}

impl SignalSource for RequestSignals<'_> {
    fn lang_param(&self) -> Option<Cow<'_, str>> {
        self.query.get(LANG_PARAM).map(|v| Cow::Borrowed(v.as_str()))
    }

    fn language_header(&self) -> Option<Cow<'_, str>> {
        // A present header always counts; non-UTF-8 bytes are replaced, not dropped
        self.headers
            .get(LANGUAGE_HEADER)
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
    }

    fn locale_param(&self) -> Option<Cow<'_, str>> {
        self.query.get(LOCALE_PARAM).map(|v| Cow::Borrowed(v.as_str()))
    }
}

// ==================== Ambient Request Adapter ====================

/// Signals read from raw ambient request data, CGI-style: a `QUERY_STRING`
/// variable and an `HTTP_X_LANG` variable.
#[derive(Debug, Clone, Default)]
pub struct AmbientSignals {
    query: HashMap<String, String>,
    header: Option<String>,
}

impl AmbientSignals {
    /// Build from `(name, value)` pairs such as CGI variables.
    ///
    /// A query string that cannot be parsed yields no parameters.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut signals = Self::default();

        for (name, value) in vars {
            match name.as_ref() {
                AMBIENT_QUERY_STRING => signals.query = parse_query_string(&value.into()),
                AMBIENT_LANGUAGE_HEADER => signals.header = Some(value.into()),
                _ => {}
            }
        }

        signals
    }

    /// Build from the current process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }
}

impl SignalSource for AmbientSignals {
    fn lang_param(&self) -> Option<Cow<'_, str>> {
        self.query.get(LANG_PARAM).map(|v| Cow::Borrowed(v.as_str()))
    }

    fn language_header(&self) -> Option<Cow<'_, str>> {
        self.header.as_deref().map(Cow::Borrowed)
    }

    fn locale_param(&self) -> Option<Cow<'_, str>> {
        self.query.get(LOCALE_PARAM).map(|v| Cow::Borrowed(v.as_str()))
    }
}

/// Parse a raw, percent-encoded query string into a map.
fn parse_query_string(raw: &str) -> HashMap<String, String> {
    let raw = raw.trim_start_matches('?');
    if raw.is_empty() {
        return HashMap::new();
    }

    let uri: Uri = match format!("/?{}", raw).parse() {
        Ok(uri) => uri,
        Err(e) => {
            debug!("Ignoring malformed query string: {}", e);
            return HashMap::new();
        }
    };

    match Query::<HashMap<String, String>>::try_from_uri(&uri) {
        Ok(Query(params)) => params,
        Err(e) => {
            debug!("Ignoring undecodable query string: {}", e);
            HashMap::new()
        }
    }
}
