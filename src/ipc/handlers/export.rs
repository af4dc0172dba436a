use crate::export::{self, ExportCollection};
use crate::ipc::error::{ok, store_err};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_export_csv(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match required_str(req, "collection") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let collection: ExportCollection = match name.parse() {
        Ok(c) => c,
        Err(e) => return store_err(&req.id, &e),
    };
    match export::export_csv(&state.store, collection) {
        Ok(out) => {
            tracing::info!(collection = collection.as_str(), rows = out.rows, "csv export");
            ok(
                &req.id,
                json!({
                    "collection": collection.as_str(),
                    "rows": out.rows,
                    "csv": out.csv,
                }),
            )
        }
        Err(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "export.csv" => Some(handle_export_csv(state, req)),
        _ => None,
    }
}
