use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::annotate::{LabelMetrics, LabelSize};
use crate::error::{AnnotateError, AnnotateResult};
use crate::render::{Color, RectPrimitive, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers that can draw into an externally owned Cairo context, for
/// example a toolkit draw callback.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> AnnotateResult<()>;
}

/// Cairo + Pango renderer for overlay frames.
///
/// Offscreen rendering goes through `Renderer::render`; in-place drawing on
/// a host surface goes through `CairoContextRenderer`. The host chart is
/// expected to have painted underneath, so frames are never cleared.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    corner_radius: f64,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> AnnotateResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(AnnotateError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            corner_radius: 3.0,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_corner_radius(&mut self, radius: f64) -> AnnotateResult<()> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(AnnotateError::InvalidData(
                "corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.corner_radius = radius;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> AnnotateResult<()> {
        frame.validate()?;
        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            append_rect_path(context, *rect, self.corner_radius);
            apply_color(context, rect.fill_color);
            if rect.border_width > 0.0 {
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill annotation box", err))?;
                apply_color(context, rect.border_color);
                context.set_line_width(rect.border_width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke annotation box", err))?;
            } else {
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill annotation box", err))?;
            }
            stats.rects_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> AnnotateResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> AnnotateResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Label metrics measured with Pango, matching what `CairoRenderer` draws.
pub struct PangoLabelMetrics {
    context: Context,
    font_description: FontDescription,
    horizontal_padding_px: f64,
}

impl PangoLabelMetrics {
    pub fn new(font_size_px: f64, horizontal_padding_px: f64) -> AnnotateResult<Self> {
        if !font_size_px.is_finite() || font_size_px <= 0.0 {
            return Err(AnnotateError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)
            .map_err(|err| map_backend_error("failed to create measuring surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create measuring context", err))?;
        Ok(Self {
            context,
            font_description: FontDescription::from_string(&format!("Sans {font_size_px}")),
            horizontal_padding_px: horizontal_padding_px.max(0.0),
        })
    }
}

impl LabelMetrics for PangoLabelMetrics {
    fn measure(&self, text: &str) -> LabelSize {
        if text.is_empty() {
            return LabelSize::default();
        }
        let layout = pangocairo::functions::create_layout(&self.context);
        layout.set_font_description(Some(&self.font_description));
        layout.set_text(text);
        let (width, height) = layout.pixel_size();
        LabelSize {
            width: f64::from(width) + 2.0 * self.horizontal_padding_px,
            height: f64::from(height),
        }
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: RectPrimitive, corner_radius: f64) {
    if corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = corner_radius.min(rect.width * 0.5).min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> AnnotateError {
    AnnotateError::InvalidData(format!("{prefix}: {err}"))
}
