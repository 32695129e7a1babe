//! Small browser helpers: clipboard, new tabs, and file uploads.
//!
//! All functions no-op or fail softly during SSR.

/// Absolute link to a hash route, e.g. `https://knix.lk/#/resources`.
#[must_use]
pub fn share_link(origin: &str, path: &str) -> String {
    format!("{}/#{path}", origin.trim_end_matches('/'))
}

/// Page origin, empty on the server.
#[must_use]
pub fn origin() -> String {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}

/// Copy `text` to the clipboard. Returns whether a clipboard was available.
pub fn copy_to_clipboard(text: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let Some(clipboard) = window.navigator().clipboard() else {
            return false;
        };
        let _ = clipboard.write_text(text);
        true
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = text;
        false
    }
}

/// Open `url` in a new tab.
pub fn open_in_new_tab(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.open_with_url_and_target(url, "_blank");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
    }
}

#[cfg(feature = "hydrate")]
pub(crate) fn js_error(err: &wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// First file selected in an `<input type="file">` change event.
#[cfg(feature = "hydrate")]
pub fn selected_file(ev: &leptos::ev::Event) -> Option<web_sys::File> {
    use wasm_bindgen::JsCast;
    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// Read a file as a `data:<mime>;base64,...` URL.
///
/// # Errors
///
/// Returns an error string if the reader fails or yields no text.
#[cfg(feature = "hydrate")]
pub async fn read_data_url(file: &web_sys::File) -> Result<String, String> {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let reader = web_sys::FileReader::new().map_err(|e| js_error(&e))?;
    let (tx, rx) = futures::channel::oneshot::channel::<()>();
    let tx = Rc::new(RefCell::new(Some(tx)));
    let on_load_end = Closure::<dyn FnMut()>::new(move || {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(());
        }
    });
    reader.set_onloadend(Some(on_load_end.as_ref().unchecked_ref()));
    reader.read_as_data_url(file).map_err(|e| js_error(&e))?;
    rx.await.map_err(|_| "file read cancelled".to_owned())?;
    reader
        .result()
        .map_err(|e| js_error(&e))?
        .as_string()
        .ok_or_else(|| "file read failed".to_owned())
}
