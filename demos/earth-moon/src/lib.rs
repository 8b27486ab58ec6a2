use wasm_bindgen::prelude::*;

luna_web::export_viewer!("earth-moon");
