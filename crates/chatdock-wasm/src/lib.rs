#![forbid(unsafe_code)]

//! Browser binding for the chatdock widget.
//!
//! [`ChatDock`] is a `wasm-bindgen` class that mounts a
//! [`WidgetController`](chatdock_web::WidgetController) over the live DOM:
//! it installs real window listeners through `web-sys`, forwards pointer,
//! touch and resize events, and writes every resolved panel box onto the
//! panel element's inline style.
//!
//! ```js
//! const dock = new ChatDock(JSON.stringify(config), panelElement);
//! handle.addEventListener("mousedown", (e) => dock.beginResize(e, "corner"));
//! dock.toggleSplitView();
//! dock.destroy();
//! ```

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::ChatDock;

#[cfg(any(target_arch = "wasm32", test))]
mod bridge;
