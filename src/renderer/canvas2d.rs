//! Canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawSurface, StarSprite};

/// The background canvas and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up the canvas by id and grab its 2D context
    pub fn from_element_id(document: &web_sys::Document, id: &str) -> Result<Self, JsValue> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("canvas #{} not found", id)))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context not available"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Match the canvas backing store to the window size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.set_global_alpha(1.0);
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn draw_star(&mut self, star: &StarSprite<'_>) {
        let ctx = &self.ctx;
        let (cx, cy) = (star.pos.x as f64, star.pos.y as f64);
        ctx.set_global_alpha(star.alpha as f64);

        // Arms
        ctx.begin_path();
        for tip in star.arm_tips() {
            ctx.move_to(cx, cy);
            ctx.line_to(tip.x as f64, tip.y as f64);
        }
        ctx.set_stroke_style_str(star.color);
        ctx.set_line_width(star.stroke_width() as f64);
        ctx.stroke();

        // Core
        ctx.begin_path();
        let _ = ctx.arc(cx, cy, star.core_radius() as f64, 0.0, TAU);
        ctx.set_fill_style_str(star.color);
        ctx.fill();
    }
}
