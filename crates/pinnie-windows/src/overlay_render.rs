use pinnie_core::config::{Color, IconPosition, VisualSettings};

/// Horizontal gap between the icon and the overlay edge, logical px.
const ICON_MARGIN: f64 = 4.0;

/// How far the icon hangs below the header into the framed area,
/// logical px. Large icons hang further so they visually sit on the
/// border.
pub(super) fn icon_drop(icon_size: i32) -> i32 {
    if icon_size >= 80 { 15 } else { 8 }
}

/// Header height needed to fit the icon at `scale`, physical px.
pub(super) fn icon_header(icon_size: i32, scale: f64) -> i32 {
    (f64::from(icon_size - icon_drop(icon_size) + ICON_MARGIN as i32) * scale).ceil() as i32
}

/// A premultiplied RGBA bitmap.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Sprite {
    pub width: i32,
    pub height: i32,
    /// Premultiplied `0xAARRGGBB`, row-major, top-down.
    pub pixels: Vec<u32>,
}

impl Sprite {
    /// Builds a sprite from straight (non-premultiplied) RGBA bytes.
    pub fn from_rgba(width: i32, height: i32, rgba: &[u8]) -> Self {
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| premultiply(px[0], px[1], px[2], px[3]))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// The built-in pin badge: a filled disc in `color` with a darker
    /// centre dot.
    pub fn badge(size: i32, color: Color) -> Self {
        let size = size.max(1);
        let half = f64::from(size) / 2.0;
        let dot = half * 0.35;
        let mut pixels = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = f64::from(x) + 0.5 - half;
                let dy = f64::from(y) + 0.5 - half;
                let dist = (dx * dx + dy * dy).sqrt();
                let disc = coverage(dist - half);
                let hole = coverage(dist - dot);
                let ring = disc * (1.0 - hole);
                let centre = hole * 0.6;
                let alpha = ring + centre;
                pixels.push(premultiply(
                    scale_channel(color.r, ring, alpha),
                    scale_channel(color.g, ring, alpha),
                    scale_channel(color.b, ring, alpha),
                    (alpha * 255.0).round() as u8,
                ));
            }
        }
        Self {
            width: size,
            height: size,
            pixels,
        }
    }
}

/// Size and layout of one overlay frame, physical px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Frame {
    pub width: i32,
    pub height: i32,
    /// Height of the icon band at the top; the rest frames the target.
    pub header: i32,
    pub scale: f64,
}

/// Renders one overlay frame.
///
/// The border is drawn inside the framed area (below the header), with
/// anti-aliased rounded corners. The icon, if any, sits at the bottom of
/// the header and hangs slightly into the framed area.
pub(super) fn render(frame: &Frame, style: &VisualSettings, icon: Option<&Sprite>) -> Vec<u32> {
    let w = frame.width.max(0);
    let h = frame.height.max(0);
    let mut pixels = vec![0u32; (w * h) as usize];

    let thickness = (f64::from(style.border_thickness) * frame.scale).round();
    if style.show_border && thickness > 0.0 {
        let radius = f64::from(style.corner_radius) * frame.scale;
        let top = f64::from(frame.header.clamp(0, h));
        let outer = RoundRect::new(0.0, top, f64::from(w), f64::from(h), radius);
        let inner = outer.inset(thickness);
        let c = style.border_color;
        for y in frame.header.clamp(0, h)..h {
            for x in 0..w {
                let px = f64::from(x) + 0.5;
                let py = f64::from(y) + 0.5;
                let cov =
                    coverage(outer.distance(px, py)) * (1.0 - coverage(inner.distance(px, py)));
                if cov > 0.0 {
                    pixels[(y * w + x) as usize] =
                        premultiply(c.r, c.g, c.b, (cov * 255.0).round() as u8);
                }
            }
        }
    }

    if let Some(icon) = icon {
        let (x, y) = icon_origin(frame, style, icon);
        composite(&mut pixels, w, h, icon, x, y);
    }

    pixels
}

/// Top-left corner of the icon inside the frame.
pub(super) fn icon_origin(frame: &Frame, style: &VisualSettings, icon: &Sprite) -> (i32, i32) {
    let margin = (ICON_MARGIN * frame.scale).round() as i32;
    let x = match style.icon_position {
        IconPosition::Left => margin,
        IconPosition::Center => (frame.width - icon.width) / 2,
        IconPosition::Right => frame.width - icon.width - margin,
    };
    let drop = (f64::from(icon_drop(style.icon_size)) * frame.scale).round() as i32;
    (x, frame.header - icon.height + drop)
}

/// Source-over blend of a premultiplied sprite onto the canvas.
fn composite(canvas: &mut [u32], w: i32, h: i32, icon: &Sprite, ox: i32, oy: i32) {
    for sy in 0..icon.height {
        let y = oy + sy;
        if !(0..h).contains(&y) {
            continue;
        }
        for sx in 0..icon.width {
            let x = ox + sx;
            if !(0..w).contains(&x) {
                continue;
            }
            let src = icon.pixels[(sy * icon.width + sx) as usize];
            let dst = &mut canvas[(y * w + x) as usize];
            *dst = over(src, *dst);
        }
    }
}

fn over(src: u32, dst: u32) -> u32 {
    let inv = 255 - (src >> 24);
    let mut out = 0;
    for shift in [0, 8, 16, 24] {
        let s = (src >> shift) & 0xFF;
        let d = (dst >> shift) & 0xFF;
        let v = (s + (d * inv + 127) / 255).min(255);
        out |= v << shift;
    }
    out
}

/// Anti-aliasing coverage from a signed distance (negative = inside).
fn coverage(distance: f64) -> f64 {
    (0.5 - distance).clamp(0.0, 1.0)
}

fn scale_channel(channel: u8, weight: f64, alpha: f64) -> u8 {
    if alpha <= 0.0 {
        return 0;
    }
    (f64::from(channel) * weight / alpha).round().clamp(0.0, 255.0) as u8
}

fn premultiply(r: u8, g: u8, b: u8, a: u8) -> u32 {
    let mul = |c: u8| (u32::from(c) * u32::from(a) + 127) / 255;
    (u32::from(a) << 24) | (mul(r) << 16) | (mul(g) << 8) | mul(b)
}

#[derive(Debug, Clone, Copy)]
struct RoundRect {
    cx: f64,
    cy: f64,
    half_w: f64,
    half_h: f64,
    radius: f64,
}

impl RoundRect {
    fn new(x: f64, y: f64, right: f64, bottom: f64, radius: f64) -> Self {
        let half_w = ((right - x) / 2.0).max(0.0);
        let half_h = ((bottom - y) / 2.0).max(0.0);
        Self {
            cx: x + half_w,
            cy: y + half_h,
            half_w,
            half_h,
            radius: radius.clamp(0.0, half_w.min(half_h)),
        }
    }

    fn inset(&self, by: f64) -> Self {
        let half_w = (self.half_w - by).max(0.0);
        let half_h = (self.half_h - by).max(0.0);
        Self {
            half_w,
            half_h,
            radius: (self.radius - by).max(0.0).min(half_w.min(half_h)),
            ..*self
        }
    }

    /// Signed distance from `(px, py)` to the edge.
    fn distance(&self, px: f64, py: f64) -> f64 {
        let qx = (px - self.cx).abs() - (self.half_w - self.radius);
        let qy = (py - self.cy).abs() - (self.half_h - self.radius);
        let outside = qx.max(0.0).hypot(qy.max(0.0));
        outside + qx.max(qy).min(0.0) - self.radius
    }
}
