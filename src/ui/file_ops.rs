//! Settings export and import through files.
//!
//! Natively the dialogs come from `rfd` on a tokio task. In the browser an export is a
//! synchronous blob download and an import goes through a hidden file input. Either way the
//! outcome travels back over the [`FileState`](super::state::FileState) channel and is applied
//! at the start of the next frame.

use super::state::{
    FileOperationResult, Notice, PendingExportOperation, PendingImportOperation, SpecsApp,
};
use crate::constants::EXPORT_FILE_NAME;
use crate::devlog::LogKind;
use eframe::egui;
use std::sync::mpsc::Sender;

fn report(sender: &Sender<FileOperationResult>, result: FileOperationResult) {
    if sender.send(result).is_err() {
        log::warn!("File operation finished after the app closed its channel");
    }
}

impl SpecsApp {
    /// Applies finished file operations and starts requested ones.
    pub fn handle_pending_operations(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.file.receiver.try_recv() {
            match result {
                FileOperationResult::ExportCompleted(path) => {
                    log::info!("Settings exported to {path}");
                    self.logs
                        .append("SYSTEM", format!("Settings exported to {path}"), LogKind::Info);
                    self.notice = Some(Notice::new("Export", format!("Configuration saved to {path}")));
                }
                FileOperationResult::ImportLoaded(path, content) => {
                    if self.import_settings(&content) {
                        self.logs
                            .append("SYSTEM", format!("Settings imported from {path}"), LogKind::Info);
                    }
                }
                FileOperationResult::OperationFailed(error) => {
                    log::error!("File operation failed: {error}");
                    self.logs.append("SYSTEM", error.clone(), LogKind::Error);
                    self.notice = Some(Notice::new("File Error", error));
                }
            }
        }

        if let Some(PendingExportOperation::ToFile) = self.file.pending_export.take() {
            self.start_export(ctx);
        }
        if let Some(PendingImportOperation::FromFile) = self.file.pending_import.take() {
            self.start_import(ctx);
        }
    }

    fn start_export(&self, ctx: &egui::Context) {
        let json = self.export_json();
        let sender = self.file.sender.clone();
        let ctx = ctx.clone();

        #[cfg(target_arch = "wasm32")]
        {
            // Synchronous so the download stays inside the click's user activation.
            match Self::trigger_download(EXPORT_FILE_NAME, &json) {
                Ok(()) => report(
                    &sender,
                    FileOperationResult::ExportCompleted(EXPORT_FILE_NAME.to_string()),
                ),
                Err(err) => report(&sender, FileOperationResult::OperationFailed(err)),
            }
            ctx.request_repaint();
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            tokio::spawn(async move {
                if let Some(handle) = rfd::AsyncFileDialog::new()
                    .add_filter("JSON", &["json"])
                    .set_file_name(EXPORT_FILE_NAME)
                    .save_file()
                    .await
                {
                    let path = handle.path();
                    let result = match std::fs::write(path, json) {
                        Ok(()) => FileOperationResult::ExportCompleted(path.display().to_string()),
                        Err(e) => FileOperationResult::OperationFailed(format!(
                            "Failed to write {}: {e}",
                            path.display()
                        )),
                    };
                    report(&sender, result);
                }
                ctx.request_repaint();
            });
        }
    }

    fn start_import(&self, ctx: &egui::Context) {
        let sender = self.file.sender.clone();
        let ctx = ctx.clone();

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                match Self::show_open_file_picker().await {
                    Some(file) => {
                        let name = file.name();
                        let result = match Self::read_file(file).await {
                            Ok(content) => FileOperationResult::ImportLoaded(name, content),
                            Err(e) => FileOperationResult::OperationFailed(e),
                        };
                        report(&sender, result);
                    }
                    None => log::info!("Import cancelled"),
                }
                ctx.request_repaint();
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            tokio::spawn(async move {
                if let Some(handle) = rfd::AsyncFileDialog::new()
                    .add_filter("JSON", &["json"])
                    .pick_file()
                    .await
                {
                    let path = handle.path();
                    let result = match std::fs::read_to_string(path) {
                        Ok(content) => {
                            FileOperationResult::ImportLoaded(path.display().to_string(), content)
                        }
                        Err(e) => FileOperationResult::OperationFailed(format!(
                            "Failed to read {}: {e}",
                            path.display()
                        )),
                    };
                    report(&sender, result);
                }
                ctx.request_repaint();
            });
        }
    }

    /// Downloads `content` as `filename` through a temporary anchor and blob URL.
    #[cfg(target_arch = "wasm32")]
    fn trigger_download(filename: &str, content: &str) -> Result<(), String> {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("No window found")?;
        let document = window.document().ok_or("No document found")?;
        let body = document.body().ok_or("No body found")?;

        let parts = js_sys::Array::new();
        parts.push(&wasm_bindgen::JsValue::from_str(content));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("application/json");
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(|_| "Failed to create blob")?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Failed to create object URL")?;

        let anchor = document
            .create_element("a")
            .map_err(|_| "Failed to create anchor element")?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "Failed to cast to anchor element")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        body.append_child(&anchor)
            .map_err(|_| "Failed to append anchor")?;
        anchor.click();
        body.remove_child(&anchor)
            .map_err(|_| "Failed to remove anchor")?;

        web_sys::Url::revoke_object_url(&url).map_err(|_| "Failed to revoke object URL")?;
        Ok(())
    }

    /// Waits for the user to pick a JSON file through a hidden file input.
    ///
    /// `None` when the picker could not be created or nothing was picked.
    #[cfg(target_arch = "wasm32")]
    async fn show_open_file_picker() -> Option<web_sys::File> {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let body = document.body()?;
        let input = document
            .create_element("input")
            .ok()?
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()?;
        input.set_type("file");
        input.set_accept(".json,application/json");
        input.style().set_property("display", "none").ok()?;

        let (tx, rx) = futures::channel::oneshot::channel::<Option<web_sys::File>>();
        let tx = std::rc::Rc::new(std::cell::RefCell::new(Some(tx)));
        let onchange = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let file = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(file);
            }
        }) as Box<dyn FnMut(_)>);
        input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        onchange.forget();

        body.append_child(&input).ok()?;
        input.click();
        let file = rx.await.ok().flatten();
        body.remove_child(&input).ok()?;
        file
    }

    /// Reads a picked file as text with a `FileReader`.
    #[cfg(target_arch = "wasm32")]
    async fn read_file(file: web_sys::File) -> Result<String, String> {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::{JsCast, JsValue};

        let reader =
            web_sys::FileReader::new().map_err(|_| "Failed to create FileReader".to_string())?;

        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            let loaded = reader.clone();
            let onload = Closure::wrap(Box::new(move |_event: web_sys::ProgressEvent| {
                if let Ok(result) = loaded.result() {
                    let _ = resolve.call1(&JsValue::NULL, &result);
                }
            }) as Box<dyn FnMut(_)>);
            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            let onerror = Closure::wrap(Box::new(move |_event: web_sys::ProgressEvent| {
                let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("Failed to read file"));
            }) as Box<dyn FnMut(_)>);
            reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        });

        reader
            .read_as_text(&file)
            .map_err(|_| "Failed to start reading file".to_string())?;
        let result = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| format!("Failed to read file: {e:?}"))?;
        result
            .as_string()
            .ok_or_else(|| "File content is not a string".to_string())
    }
}
