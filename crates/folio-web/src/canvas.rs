//! Canvas2D replay of a [`DrawList`].

use std::f64::consts::TAU;

use folio_engine::{Cursor, DrawCommand, DrawList, HostError, Marker, Rgba, Surface, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const MARKER_FONT: &str = "600 11px ui-monospace, SFMono-Regular, Menlo, monospace";
const MARKER_PAD_X: f64 = 12.0;
const MARKER_HEIGHT: f64 = 26.0;
const MARKER_CORNER: f64 = 12.0;
/// Pill background alpha relative to the label color.
const MARKER_FILL_ALPHA: f32 = 0x20 as f32 / 255.0;
const MARKER_BORDER: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.12);

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Viewport,
}

impl CanvasSurface {
    /// Grab the 2D context of `canvas`.
    pub fn acquire(canvas: HtmlCanvasElement) -> Result<Self, HostError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(HostError::Unavailable("2d context"))?;
        Ok(Self {
            canvas,
            ctx,
            size: Viewport::ZERO,
        })
    }

    fn paint_marker(&self, marker: &Marker) {
        let ctx = &self.ctx;
        let m = &marker.instance;
        let color = marker.color();

        ctx.save();
        let _ = ctx.translate(m.x as f64, m.y as f64);
        let _ = ctx.scale(m.scale as f64, m.scale as f64);
        ctx.set_global_alpha(m.opacity as f64);
        ctx.set_font(MARKER_FONT);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        let text_width = ctx
            .measure_text(&marker.label)
            .map(|metrics| metrics.width())
            .unwrap_or(0.0);
        let w = text_width + 2.0 * MARKER_PAD_X;
        let h = MARKER_HEIGHT;
        pill_path(ctx, -w / 2.0, -h / 2.0, w, h, MARKER_CORNER);
        set_fill_style(ctx, &color.with_alpha(MARKER_FILL_ALPHA).css());
        ctx.fill();
        set_stroke_style(ctx, &MARKER_BORDER.css());
        ctx.set_line_width(1.0);
        ctx.stroke();

        set_fill_style(ctx, &color.css());
        let _ = ctx.fill_text(&marker.label, 0.0, 0.0);
        ctx.restore();
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width.max(0.0) as u32);
        self.canvas.set_height(viewport.height.max(0.0) as u32);
        self.size = viewport;
    }

    fn paint(&mut self, list: &DrawList) {
        let ctx = &self.ctx;
        for command in list.commands() {
            match command {
                DrawCommand::Clear => {
                    ctx.clear_rect(0.0, 0.0, self.size.width as f64, self.size.height as f64);
                }
                DrawCommand::FillCircle { center, radius, color } => {
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    set_fill_style(ctx, &color.css());
                    ctx.fill();
                }
                DrawCommand::StrokeCircle { center, radius, width, color } => {
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    set_stroke_style(ctx, &color.css());
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
                DrawCommand::StrokePolyline { points, width, color } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    ctx.begin_path();
                    ctx.move_to(first.x as f64, first.y as f64);
                    for p in rest {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    set_stroke_style(ctx, &color.css());
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
                DrawCommand::Marker(marker) => self.paint_marker(marker),
            }
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        let _ = self.canvas.style().set_property("cursor", cursor.css());
    }
}

fn pill_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
    let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
    let _ = ctx.arc_to(x, y + h, x, y, r);
    let _ = ctx.arc_to(x, y, x + w, y, r);
    ctx.close_path();
}

fn set_fill_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(value),
    );
}

fn set_stroke_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(value),
    );
}
