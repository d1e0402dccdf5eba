//! Web front end
//!
//! The keypad, the mock DOM view and its event driver are plain Rust and
//! always compiled, so the whole UI is testable natively. The `wasm`
//! feature adds the `wasm-bindgen` entry point for real browsers.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;
mod keypad;
pub mod view;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use dom::{escape_html, DomElement, DomEvent, MockDom};
pub use driver::WasmDriver;
pub use keypad::{KeypadAction, KeypadButtonDef, WasmKeypad};
