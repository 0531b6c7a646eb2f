//! Rendering surface abstraction.
//!
//! The shell never draws; it only needs to know where the surface sits on
//! screen so client coordinates can be mapped into surface-local space.

/// Screen-space offsets of a surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
}

/// A rendering target owned by the host (canvas element, GL context, ...).
pub trait Surface {
    /// Current on-screen bounding rectangle. Queried on every pointer event
    /// since layout can move the surface between events.
    fn bounding_rect(&self) -> SurfaceRect;
}

/// A surface pinned at fixed offsets, for headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSurface {
    pub rect: SurfaceRect,
}

impl StaticSurface {
    pub fn at(left: f64, top: f64) -> Self {
        Self {
            rect: SurfaceRect { left, top },
        }
    }
}

impl Surface for StaticSurface {
    fn bounding_rect(&self) -> SurfaceRect {
        self.rect
    }
}
