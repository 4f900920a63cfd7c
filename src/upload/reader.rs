use super::preview::retag_data_uri;
use super::DecodeError;
use js_sys::{Function, Promise};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader};

impl From<JsValue> for DecodeError {
    fn from(value: JsValue) -> Self {
        let message = if let Some(msg) = value.as_string() {
            msg
        } else if let Some(msg) = js_sys::Error::from(value).message().as_string() {
            msg
        } else {
            "Unknown error".to_string()
        };

        DecodeError::Read(message)
    }
}

/// Reads the file as a data URI of type `mime`.
///
/// The browser does the base64 encoding, so the payload only crosses into
/// wasm memory once, as the finished string.
pub async fn read_data_uri(file: &File, mime: &str) -> Result<String, DecodeError> {
    let reader = FileReader::new()?;

    let loaded = Promise::new(&mut |resolve: Function, _reject: Function| {
        let onloadend = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        });
        reader.set_onloadend(Some(onloadend.unchecked_ref()));
    });

    reader.read_as_data_url(file)?;
    JsFuture::from(loaded).await?;

    if let Some(err) = reader.error() {
        return Err(JsValue::from(err).into());
    }

    let uri = reader
        .result()?
        .as_string()
        .ok_or_else(|| DecodeError::Read("reader returned no text".to_string()))?;

    Ok(retag_data_uri(uri, mime))
}
