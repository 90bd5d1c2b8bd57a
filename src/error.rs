use thiserror::Error;

/// Failures the browser bindings can run into. None of them are fatal: the
/// caller logs the error and leaves the affected feature switched off.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no element matches `{0}`")]
    MissingElement(&'static str),
    #[error("browser does not provide {0}")]
    Unsupported(&'static str),
    #[error("browser call failed: {0}")]
    Dom(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &wasm_bindgen::JsValue::from_str("message"))
                    .ok()
                    .and_then(|message| message.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Dom(message)
    }
}

pub type SiteResult<T> = Result<T, SiteError>;
