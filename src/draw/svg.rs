//! SVG backend for [`Drawer`].

use super::{Drawer, FillStyle, LineCap, LineJoin, StrokeStyle, TextStyle};
use kurbo::{Point, Shape, Size};
use std::fmt::Write as _;
use std::{fs, io, path::Path};

/// Tolerance used when flattening shapes to bezier paths.
const TOLERANCE: f64 = 1e-3;

/// Collects draw calls into an SVG document.
pub struct SvgDrawer {
    size: Size,
    body: String,
}

impl SvgDrawer {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            body: String::new(),
        }
    }

    /// Write the finished document.
    pub fn write(self, mut writer: impl io::Write) -> io::Result<()> {
        write!(
            writer,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
             viewBox=\"0 0 {} {}\">\n{}</svg>\n",
            self.size.width, self.size.height, self.size.width, self.size.height, self.body
        )
    }

    pub fn write_to_file(self, path: impl AsRef<Path>) -> io::Result<()> {
        let file = io::BufWriter::new(fs::File::create(path)?);
        self.write(file)
    }
}

impl Drawer for SvgDrawer {
    fn draw_shape(
        &mut self,
        shape: impl Shape,
        stroke_style: Option<StrokeStyle>,
        fill_style: Option<FillStyle>,
    ) {
        let d = shape.to_path(TOLERANCE).to_svg();
        let mut attrs = String::new();
        match fill_style {
            Some(fill) => {
                let _ = write!(attrs, " fill=\"{}\"", fill.color);
            }
            None => attrs.push_str(" fill=\"none\""),
        }
        if let Some(stroke) = stroke_style {
            let _ = write!(
                attrs,
                " stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"{}\" stroke-linejoin=\"{}\"",
                stroke.color,
                stroke.width,
                line_cap_name(stroke.line_cap),
                line_join_name(stroke.line_join),
            );
        }
        let _ = writeln!(self.body, "  <path d=\"{}\"{}/>", d, attrs);
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        // SVG anchors text at the baseline; our API anchors at the top-left.
        let baseline = origin.y + style.font_size;
        let weight = if style.bold { " font-weight=\"bold\"" } else { "" };
        let _ = writeln!(
            self.body,
            "  <text x=\"{}\" y=\"{}\" font-size=\"{}\"{} fill=\"{}\">{}</text>",
            origin.x,
            baseline,
            style.font_size,
            weight,
            style.color,
            escape(text),
        );
    }
}

fn line_cap_name(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
        LineCap::Square => "square",
    }
}

fn line_join_name(join: LineJoin) -> &'static str {
    match join {
        LineJoin::Miter { .. } => "miter",
        LineJoin::Round => "round",
        LineJoin::Bevel => "bevel",
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use kurbo::Rect;

    #[test]
    fn renders_shapes_and_text() {
        let mut drawer = SvgDrawer::new(Size::new(100., 100.));
        drawer.draw_shape(
            Rect::new(0., 0., 10., 10.),
            Some(StrokeStyle::new(Color::from_rgb8(0x24, 0x36, 0x42), 3.)),
            Some(FillStyle {
                color: Color::from_rgb8(0x8d, 0xd3, 0xc7),
            }),
        );
        drawer.draw_text(
            "a < b",
            Point::new(5., 5.),
            &TextStyle::new(Color::WHITE, 12.),
        );

        let mut out = Vec::new();
        drawer.write(&mut out).unwrap();
        let svg = String::from_utf8(out).unwrap();
        assert!(svg.contains("fill=\"#8dd3c7\""));
        assert!(svg.contains("stroke=\"#243642\""));
        assert!(svg.contains("stroke-width=\"3\""));
        assert!(svg.contains("a &lt; b"));
    }
}
