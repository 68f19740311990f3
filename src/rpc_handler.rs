//! RPC method handler for the tilmarks JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested directly.
//! [`handle_method`] serves the synchronous methods under one lock;
//! [`handle_async_method`] serves file I/O and auto-fill, releasing the lock
//! while the slow part runs so other requests keep being answered.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::bookmark_manager::ImportReport;
use crate::managers::draft_manager::DraftManagerTrait;
use crate::platform;
use crate::services::interchange;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::summarizer::SummaryClient;
use crate::services::url_classifier::classify;
use crate::types::bookmark::BookmarkFilter;
use crate::types::draft::DraftFields;

/// Methods served by [`handle_async_method`].
pub const ASYNC_METHODS: &[&str] = &["bookmark.importFile", "bookmark.exportFile", "autofill.summarize"];

/// True when `method` must go through [`handle_async_method`].
pub fn is_async_method(method: &str) -> bool {
    ASYNC_METHODS.contains(&method)
}

fn lock(app: &Mutex<App>) -> Result<MutexGuard<'_, App>, String> {
    app.lock().map_err(|e| e.to_string())
}

fn str_param<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(|v| v.as_str())
}

/// Reads form fields from `params[name]` (or `params` itself when `name` is
/// absent). Missing fields are empty.
fn draft_param(params: &Value, name: &str) -> Result<DraftFields, String> {
    let source = params.get(name).unwrap_or(params);
    if source.is_null() {
        return Ok(DraftFields::default());
    }
    serde_json::from_value(source.clone()).map_err(|e| format!("invalid {}: {}", name, e))
}

fn report_json(report: &ImportReport) -> Value {
    json!({"accepted": report.accepted, "rejected": report.rejected, "empty": report.is_empty()})
}

/// Dispatch a synchronous JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Bookmarks ───
        "bookmark.add" => {
            let form = draft_param(params, "form")?;
            let mut a = lock(app)?;
            let bookmark = a.submit_form(&form).map_err(|e| e.to_string())?;
            serde_json::to_value(bookmark).map_err(|e| e.to_string())
        }
        "bookmark.list" => {
            let filter = BookmarkFilter::new(
                str_param(params, "search").unwrap_or_default(),
                str_param(params, "tag").unwrap_or_default(),
            );
            let a = lock(app)?;
            let items = a.view(&filter);
            Ok(json!({"items": items, "total": items.len()}))
        }
        "bookmark.tags" => {
            let a = lock(app)?;
            Ok(json!(a.tags()))
        }
        "bookmark.import" => {
            let text = str_param(params, "text").ok_or("missing text")?;
            let mut a = lock(app)?;
            let report = a.import_text(text).map_err(|e| e.to_string())?;
            Ok(report_json(&report))
        }
        "bookmark.export" => {
            let mut a = lock(app)?;
            let text = a.export_text().map_err(|e| e.to_string())?;
            Ok(json!({
                "text": text,
                "fileName": interchange::export_file_name(Utc::now().date_naive()),
            }))
        }
        "bookmark.classify" => {
            let url = str_param(params, "url").ok_or("missing url")?;
            Ok(json!({"urlType": classify(url)}))
        }

        // ─── Draft ───
        "draft.save" => {
            let fields = draft_param(params, "draft")?;
            let a = lock(app)?;
            a.drafts.save_draft(&fields).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "draft.load" => {
            let baseline = draft_param(params, "baseline")?;
            let mut a = lock(app)?;
            let fields = a.restore_draft(&baseline);
            serde_json::to_value(fields).map_err(|e| e.to_string())
        }
        "draft.clear" => {
            let a = lock(app)?;
            a.drafts.clear_draft().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Status ───
        "status.current" => {
            let a = lock(app)?;
            Ok(json!(a.status.current()))
        }
        "status.dismiss" => {
            let mut a = lock(app)?;
            a.status.dismiss();
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = lock(app)?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key").ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = lock(app)?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            if key.starts_with("status.") {
                let status = a.settings_engine.get_settings().status.clone();
                a.status.update_settings(status);
            }
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            let mut a = lock(app)?;
            a.settings_engine.reset().map_err(|e| e.to_string())?;
            let status = a.settings_engine.get_settings().status.clone();
            a.status.update_settings(status);
            Ok(json!({"ok": true}))
        }

        m if is_async_method(m) => Err(format!("method {} is asynchronous", m)),
        _ => Err(format!("unknown method: {}", method)),
    }
}

/// Dispatch an asynchronous JSON-RPC method call.
///
/// The app lock is only held for the synchronous steps; the file read/write
/// and the summarizer requests run unlocked. A second import or auto-fill
/// while one is pending is refused.
pub async fn handle_async_method(app: Arc<Mutex<App>>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "bookmark.importFile" => {
            let path = PathBuf::from(str_param(params, "path").ok_or("missing path")?);
            let flag = lock(&app)?.import_flag.clone();
            let _guard = flag.try_begin().ok_or("an import is already in progress")?;

            let text = match interchange::read_import_file(&path).await {
                Ok(text) => text,
                Err(e) => {
                    lock(&app)?.status.post_error(e.to_string());
                    return Err(e.to_string());
                }
            };
            let report = lock(&app)?.import_text(&text).map_err(|e| e.to_string())?;
            Ok(report_json(&report))
        }
        "bookmark.exportFile" => {
            let path = match str_param(params, "path") {
                Some(p) => PathBuf::from(p),
                None => platform::get_data_dir()
                    .join(interchange::export_file_name(Utc::now().date_naive())),
            };
            let text = lock(&app)?.export_text().map_err(|e| e.to_string())?;
            interchange::write_export_file(&path, &text)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }
        "autofill.summarize" => {
            let url = str_param(params, "url").ok_or("missing url")?.to_string();
            let form = draft_param(params, "draft")?;
            let (flag, settings) = {
                let a = lock(&app)?;
                (a.autofill_flag.clone(), a.settings_engine.get_settings().autofill.clone())
            };
            let _guard = flag.try_begin().ok_or("auto-fill is already in progress")?;

            let result = match SummaryClient::from_settings(&settings) {
                Ok(client) => client.summarize(&url).await,
                Err(e) => Err(e),
            };
            let filled = lock(&app)?.apply_summary(&form, result).map_err(|e| e.to_string())?;
            serde_json::to_value(filled).map_err(|e| e.to_string())
        }
        _ => Err(format!("unknown method: {}", method)),
    }
}
