//! 2D rendering
//!
//! Geometry is computed in `shapes` without touching the browser, then handed
//! to a `DrawSurface`. The Canvas 2D backend is the only surface in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::CanvasSurface;
pub use shapes::StarSprite;

/// Anything a frame can be drawn onto
pub trait DrawSurface {
    /// Current drawable size in pixels
    fn size(&self) -> (f32, f32);

    /// Erase the whole surface
    fn clear(&mut self);

    /// Draw one twinkling star
    fn draw_star(&mut self, star: &StarSprite<'_>);
}
