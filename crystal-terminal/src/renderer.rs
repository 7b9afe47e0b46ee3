//! ASCII wireframe rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::convert::Infallible;
use std::io::Write;
use crystal_core::{Segment, Surface, Viewport, Wireframe};

/// Character luminosity ramp for edge brightness (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Vertical viewport units per character cell; cells are about twice as tall as wide
pub const CELL_ASPECT: u32 = 2;

/// Viewport covering a terminal of `columns` x `rows` cells
pub fn viewport_for(columns: u16, rows: u16) -> crystal_core::Result<Viewport> {
    Viewport::new(columns as u32, rows as u32 * CELL_ASPECT)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Option<(u8, u8, u8)>,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: None,
};

/// ASCII renderer that draws projected wireframes as terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(viewport: Viewport) -> Self {
        let (width, height) = cell_size(viewport);
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![BLANK; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(BLANK);
    }

    /// Character currently stored for a cell
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].glyph)
    }

    pub fn render_wireframe(&mut self, frame: &Wireframe) {
        for segment in &frame.segments {
            self.render_segment(segment);
        }
    }

    fn render_segment(&mut self, segment: &Segment) {
        // Move from viewport units to cell units
        let scale = CELL_ASPECT as f32;
        let from = (segment.from.x, segment.from.y / scale, segment.from.depth);
        let to = (segment.to.x, segment.to.y / scale, segment.to.depth);

        let Some((from, to)) = clip_segment(from, to, self.width as f32, self.height as f32)
        else {
            return;
        };

        let brightness = segment.color.luminance().sqrt();
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
        let char_index = char_index.clamp(1, LUMINOSITY_RAMP.len() - 1);
        let cell = Cell {
            glyph: LUMINOSITY_RAMP[char_index],
            color: Some(segment.color.to_rgb8()),
        };

        self.rasterize_line(from, to, cell);
    }

    /// Bresenham line between two in-bounds points, depth-tested per cell
    fn rasterize_line(&mut self, from: (f32, f32, f32), to: (f32, f32, f32), cell: Cell) {
        let max_x = self.width as i32 - 1;
        let max_y = self.height as i32 - 1;
        let mut x0 = (from.0.floor() as i32).clamp(0, max_x);
        let mut y0 = (from.1.floor() as i32).clamp(0, max_y);
        let x1 = (to.0.floor() as i32).clamp(0, max_x);
        let y1 = (to.1.floor() as i32).clamp(0, max_y);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let steps = dx.max(-dy).max(1) as f32;
        let mut err = dx + dy;
        let mut step = 0.0;

        loop {
            let depth = from.2 + (to.2 - from.2) * (step / steps);
            let idx = y0 as usize * self.width + x0 as usize;
            if depth < self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.cells[idx] = cell;
            }

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
            step += 1.0;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                let color = match cell.color {
                    Some((r, g, b)) => Color::Rgb { r, g, b },
                    None => Color::DarkGrey,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(cell.glyph))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for AsciiRenderer {
    type Error = Infallible;

    fn resize(&mut self, viewport: Viewport) {
        *self = Self::new(viewport);
    }

    fn present(&mut self, frame: &Wireframe) -> Result<(), Infallible> {
        self.clear();
        self.render_wireframe(frame);
        Ok(())
    }
}

fn cell_size(viewport: Viewport) -> (usize, usize) {
    let rows = (viewport.height() / CELL_ASPECT).max(1);
    (viewport.width() as usize, rows as usize)
}

/// Liang-Barsky clip of a segment against `[0, width) x [0, height)`
fn clip_segment(
    from: (f32, f32, f32),
    to: (f32, f32, f32),
    width: f32,
    height: f32,
) -> Option<((f32, f32, f32), (f32, f32, f32))> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let mut t0: f32 = 0.0;
    let mut t1: f32 = 1.0;

    let edges = [
        (-dx, from.0),
        (dx, width - from.0),
        (-dy, from.1),
        (dy, height - from.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let lerp = |t: f32| {
        (
            from.0 + dx * t,
            from.1 + dy * t,
            from.2 + (to.2 - from.2) * t,
        )
    };
    Some((lerp(t0), lerp(t1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crystal_core::{Color as Rgb, ScreenPoint};

    fn point(x: f32, y: f32) -> ScreenPoint {
        ScreenPoint { x, y, depth: 0.5 }
    }

    fn frame(viewport: Viewport, segments: Vec<Segment>) -> Wireframe {
        Wireframe { viewport, segments }
    }

    #[test]
    fn test_viewport_doubles_rows() {
        let viewport = viewport_for(80, 24).unwrap();
        assert_eq!(viewport, Viewport::new(80, 48).unwrap());
        let renderer = AsciiRenderer::new(viewport);
        assert_eq!((renderer.width(), renderer.height()), (80, 24));
    }

    #[test]
    fn test_horizontal_line() {
        let viewport = viewport_for(10, 5).unwrap();
        let mut renderer = AsciiRenderer::new(viewport);
        let segment = Segment {
            from: point(1.0, 4.0),
            to: point(8.0, 4.0),
            color: Rgb::WHITE,
        };
        renderer.present(&frame(viewport, vec![segment])).unwrap();

        for x in 1..=8 {
            assert_eq!(renderer.glyph(x, 2), Some('@'));
        }
        assert_eq!(renderer.glyph(0, 2), Some(' '));
        assert_eq!(renderer.glyph(9, 2), Some(' '));
        assert_eq!(renderer.glyph(4, 1), Some(' '));
    }

    #[test]
    fn test_dim_edges_stay_visible() {
        let viewport = viewport_for(4, 4).unwrap();
        let mut renderer = AsciiRenderer::new(viewport);
        let segment = Segment {
            from: point(0.0, 0.0),
            to: point(0.0, 6.0),
            color: Rgb::new(0.0, 0.0, 0.01),
        };
        renderer.present(&frame(viewport, vec![segment])).unwrap();
        assert_eq!(renderer.glyph(0, 0), Some('.'));
        assert_eq!(renderer.glyph(0, 3), Some('.'));
    }

    #[test]
    fn test_offscreen_segment_is_clipped() {
        let viewport = viewport_for(10, 5).unwrap();
        let mut renderer = AsciiRenderer::new(viewport);
        let segment = Segment {
            from: point(-1000.0, 5.0),
            to: point(1000.0, 5.0),
            color: Rgb::WHITE,
        };
        renderer.present(&frame(viewport, vec![segment])).unwrap();
        assert!((0..10).all(|x| renderer.glyph(x, 2) == Some('@')));

        let outside = Segment {
            from: point(-50.0, -50.0),
            to: point(-10.0, -5.0),
            color: Rgb::WHITE,
        };
        renderer.present(&frame(viewport, vec![outside])).unwrap();
        assert!((0..10).all(|x| (0..5).all(|y| renderer.glyph(x, y) == Some(' '))));
    }

    #[test]
    fn test_resize_rebuilds_grid() {
        let mut renderer = AsciiRenderer::new(viewport_for(10, 5).unwrap());
        renderer.resize(viewport_for(30, 12).unwrap());
        assert_eq!((renderer.width(), renderer.height()), (30, 12));
    }
}
