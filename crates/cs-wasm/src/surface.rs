//! Canvas-backed surfaces.
//!
//! `CanvasSurface` only knows where the canvas sits on screen. The 2D and
//! WebGL variants additionally acquire a rendering context at construction;
//! if the browser refuses, the context is `None` and the surface still works
//! for input translation.

use cs_core::{Surface, SurfaceRect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, ContextAttributes2d, HtmlCanvasElement, WebGlContextAttributes,
    WebGlRenderingContext,
};

/// A surface backed by an `HtmlCanvasElement`. Pointer listeners are
/// attached to this element.
pub trait CanvasBinding: Surface {
    fn canvas(&self) -> &HtmlCanvasElement;
}

#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl Surface for CanvasSurface {
    fn bounding_rect(&self) -> SurfaceRect {
        let rect = self.canvas.get_bounding_client_rect();
        SurfaceRect {
            left: rect.left(),
            top: rect.top(),
        }
    }
}

impl CanvasBinding for CanvasSurface {
    fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

/// Canvas with a `CanvasRenderingContext2d`.
#[derive(Debug, Clone)]
pub struct Canvas2dSurface {
    inner: CanvasSurface,
    context: Option<CanvasRenderingContext2d>,
}

impl Canvas2dSurface {
    pub fn new(canvas: HtmlCanvasElement, attributes: &ContextAttributes2d) -> Self {
        let context = acquire_context(&canvas, "2d", attributes.as_ref());
        Self {
            inner: CanvasSurface::new(canvas),
            context,
        }
    }

    pub fn context(&self) -> Option<&CanvasRenderingContext2d> {
        self.context.as_ref()
    }
}

impl Surface for Canvas2dSurface {
    fn bounding_rect(&self) -> SurfaceRect {
        self.inner.bounding_rect()
    }
}

impl CanvasBinding for Canvas2dSurface {
    fn canvas(&self) -> &HtmlCanvasElement {
        self.inner.canvas()
    }
}

/// Canvas with a `WebGlRenderingContext`.
#[derive(Debug, Clone)]
pub struct WebGlSurface {
    inner: CanvasSurface,
    context: Option<WebGlRenderingContext>,
}

impl WebGlSurface {
    pub fn new(canvas: HtmlCanvasElement, attributes: &WebGlContextAttributes) -> Self {
        let context = acquire_context(&canvas, "webgl", attributes.as_ref());
        Self {
            inner: CanvasSurface::new(canvas),
            context,
        }
    }

    pub fn context(&self) -> Option<&WebGlRenderingContext> {
        self.context.as_ref()
    }
}

impl Surface for WebGlSurface {
    fn bounding_rect(&self) -> SurfaceRect {
        self.inner.bounding_rect()
    }
}

impl CanvasBinding for WebGlSurface {
    fn canvas(&self) -> &HtmlCanvasElement {
        self.inner.canvas()
    }
}

fn acquire_context<T: JsCast>(
    canvas: &HtmlCanvasElement,
    kind: &str,
    options: &JsValue,
) -> Option<T> {
    match canvas.get_context_with_context_options(kind, options) {
        Ok(Some(object)) => match object.dyn_into::<T>() {
            Ok(context) => Some(context),
            Err(_) => {
                log::warn!("`{kind}` context has an unexpected type");
                None
            }
        },
        Ok(None) => {
            log::warn!("`{kind}` context unavailable");
            None
        }
        Err(err) => {
            log::warn!("getContext(`{kind}`) threw: {err:?}");
            None
        }
    }
}
