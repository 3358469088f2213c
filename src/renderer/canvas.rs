//! Canvas2D painter
//!
//! Replays a list of [`DrawCommand`]s onto an HTML canvas. The logical
//! coordinate space is the canvas pixel space.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::DrawCommand;
use crate::consts::*;

/// Render state holding the 2D context
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    /// Size the canvas to the logical resolution and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self { ctx })
    }

    /// Draw one frame
    pub fn paint(&self, commands: &[DrawCommand]) -> Result<(), JsValue> {
        for command in commands {
            self.paint_one(command)?;
        }
        Ok(())
    }

    fn paint_one(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Rect { rect, color } => {
                ctx.set_fill_style_str(&color.css());
                ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
            DrawCommand::GradientRect { rect, stops } => {
                let gradient = ctx.create_linear_gradient(
                    rect.x as f64,
                    rect.y as f64,
                    (rect.x + rect.w) as f64,
                    rect.y as f64,
                );
                for (offset, color) in stops {
                    gradient.add_color_stop(*offset, &color.css())?;
                }
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
            DrawCommand::Wedge {
                center,
                radius,
                start_angle,
                end_angle,
                color,
                glow,
            } => {
                let css = color.css();
                if *glow > 0.0 {
                    ctx.set_shadow_color(&css);
                    ctx.set_shadow_blur(*glow as f64);
                }
                ctx.set_fill_style_str(&css);
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    *start_angle as f64,
                    *end_angle as f64,
                )?;
                ctx.line_to(center.x as f64, center.y as f64);
                ctx.fill();
                if *glow > 0.0 {
                    ctx.set_shadow_blur(0.0);
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&color.css());
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )?;
                ctx.fill();
            }
            DrawCommand::Text {
                text,
                pos,
                size_px,
                bold,
                align,
                color,
            } => {
                let weight = if *bold { "bold " } else { "" };
                ctx.set_font(&format!("{}{}px Arial", weight, size_px));
                ctx.set_text_align(align.as_str());
                ctx.set_fill_style_str(&color.css());
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }
}
