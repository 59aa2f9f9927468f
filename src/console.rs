//! Console Logging
//!
//! Tagged wrappers over the browser console: `[TAG] message`.
//! Off wasm (native unit tests) there is no console and messages are dropped.

pub fn log(tag: &str, message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("[{}] {}", tag, message).into());
}

pub fn warn(tag: &str, message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&format!("[{}] {}", tag, message).into());
}

pub fn error(tag: &str, message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&format!("[{}] {}", tag, message).into());
}
