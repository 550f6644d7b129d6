use std::{
    ops::{Index, IndexMut},
    path::Path,
};
use tracing::trace;
use crate::{
    color::Color,
    debug_font,
    error::RenderError,
    file::{Load, Save},
    geom::{affine::Affine, vector::prelude::*},
    surface::Surface,
    text::FontBitmaps,
};

/// CPU-side ARGB pixel buffer, row-major, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    data: Vec<u32>,
    width: i32,
    height: i32,
}

impl Index<(i32, i32)> for Bitmap {
    type Output = u32;
    fn index(&self, (x, y): (i32, i32)) -> &Self::Output {
        &self.data[self.offset_of(x, y)]
    }
}

impl IndexMut<(i32, i32)> for Bitmap {
    fn index_mut(&mut self, (x, y): (i32, i32)) -> &mut u32 {
        let offset = self.offset_of(x, y);
        &mut self.data[offset]
    }
}

impl Bitmap {
    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }
    pub fn dim(&self) -> V2i { V2i::new(self.width, self.height) }

    pub fn with_dimensions(width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Bitmap dimensions must be positive. (width, height) = {:?}",
            (width, height),
        );
        Self {
            data: vec![u32::from(Color::TRANSPARENT); width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn filled(mut self, color: Color) -> Self {
        self.clear(color);
        self
    }

    pub fn clear(&mut self, color: Color) {
        let color = u32::from(color);
        for p in &mut self.data {
            *p = color;
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            Some(Color::from(self[(x, y)]))
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.data
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Blends a single pixel; out-of-bounds writes are dropped.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.in_bounds(x, y) {
            let dst = &mut self[(x, y)];
            *dst = color.over(Color::from(*dst)).into();
        }
    }

    /// Rows of the rectangle `[top_left, bottom_right)` clipped to the bitmap.
    pub fn clamped_view(&mut self, top_left: V2i, bottom_right: V2i) -> impl Iterator<Item = &mut [u32]> {
        let x0 = utils::clamp(top_left.x, 0, self.width) as usize;
        let y0 = utils::clamp(top_left.y, 0, self.height) as usize;
        let x1 = utils::clamp(bottom_right.x, 0, self.width) as usize;
        let y1 = utils::clamp(bottom_right.y, 0, self.height) as usize;
        let (x1, y1) = (x1.max(x0), y1.max(y0));

        self.data
            .chunks_mut(self.width as usize)
            .skip(y0)
            .take(y1 - y0)
            .map(move |row| &mut row[x0..x1])
    }

    pub fn fill_rect(&mut self, top_left: V2i, bottom_right: V2i, color: Color) {
        for row in self.clamped_view(top_left, bottom_right) {
            for pxl in row {
                *pxl = color.over(Color::from(*pxl)).into();
            }
        }
    }

    /// Integer-offset blit, the fast path of [`Surface::blit`].
    pub fn draw_bmp(&mut self, src: &Bitmap, p: V2i) {
        let src_x0 = if p.x < 0 { -p.x } else { 0 };
        let src_y0 = if p.y < 0 { -p.y } else { 0 };
        let dst_end = p + src.dim();

        let src_rows = src.data
            .chunks(src.width as usize)
            .skip(src_y0 as usize);
        for (dst_row, src_row) in self.clamped_view(p, dst_end).zip(src_rows) {
            for (dst, src) in dst_row.iter_mut().zip(src_row.iter().skip(src_x0 as usize)) {
                *dst = Color::from(*src).over(Color::from(*dst)).into();
            }
        }
    }

    fn draw_transformed(&mut self, src: &Bitmap, transform: &Affine) {
        let inverse = match transform.inverse() {
            Some(inverse) => inverse,
            None => {
                trace!("skipping blit through singular transform {:?}", transform);
                return;
            }
        };

        let (w, h) = (src.width as f32, src.height as f32);
        let corners = [
            transform.apply(V2f::new(0.0, 0.0)),
            transform.apply(V2f::new(w, 0.0)),
            transform.apply(V2f::new(0.0, h)),
            transform.apply(V2f::new(w, h)),
        ];
        let min = corners.iter().fold(V2f::diag(f32::INFINITY), |acc, c| acc.zip_map(*c, f32::min));
        let max = corners.iter().fold(V2f::diag(f32::NEG_INFINITY), |acc, c| acc.zip_map(*c, f32::max));

        let x0 = utils::clamp(min.x.floor() as i32, 0, self.width);
        let y0 = utils::clamp(min.y.floor() as i32, 0, self.height);
        let x1 = utils::clamp(max.x.ceil() as i32, 0, self.width);
        let y1 = utils::clamp(max.y.ceil() as i32, 0, self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                // sample at pixel centres, nearest neighbour
                let s = inverse.apply(V2f::new(x as f32 + 0.5, y as f32 + 0.5)).floor();
                let (sx, sy) = (s.x as i32, s.y as i32);
                if src.in_bounds(sx, sy) {
                    let color = Color::from(src[(sx, sy)]);
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn offset_of(&self, x: i32, y: i32) -> usize {
        assert!(
            self.in_bounds(x, y),
            "Bitmap index out of bounds. (width, height) = {:?}, (x, y) = {:?}",
            (self.width, self.height), (x, y),
        );
        y as usize * self.width as usize + x as usize
    }
}

impl Surface for Bitmap {
    type Font = FontBitmaps;

    fn with_dimensions(width: i32, height: i32) -> Self {
        Bitmap::with_dimensions(width, height)
    }

    fn width(&self) -> i32 { self.width }
    fn height(&self) -> i32 { self.height }

    fn fill(&mut self, color: Color) {
        self.clear(color);
    }

    fn blit(&mut self, src: &Self, transform: &Affine) {
        let offset = V2f::new(transform.tx, transform.ty);
        if transform.is_translation_only() && offset == offset.round() {
            self.draw_bmp(src, offset.into());
        } else {
            self.draw_transformed(src, transform);
        }
    }

    fn draw_line(&mut self, p0: V2f, p1: V2f, color: Color) {
        // Bresenham
        let V2i { x: mut x, y: mut y } = V2i::from(p0.floor());
        let end = V2i::from(p1.floor());
        let dx = (end.x - x).abs();
        let dy = -(end.y - y).abs();
        let step_x = if x < end.x { 1 } else { -1 };
        let step_y = if y < end.y { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend_pixel(x, y, color);
            if x == end.x && y == end.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    fn draw_rect(&mut self, top_left: V2f, size: V2f, solid: bool, color: Color) {
        let min = V2i::from(top_left.round());
        let max = V2i::from((top_left + size).round());
        if solid {
            self.fill_rect(min, max, color);
        } else if max.x > min.x && max.y > min.y {
            self.fill_rect(min, V2i::new(max.x, min.y + 1), color);
            self.fill_rect(V2i::new(min.x, max.y - 1), max, color);
            self.fill_rect(V2i::new(min.x, min.y + 1), V2i::new(min.x + 1, max.y - 1), color);
            self.fill_rect(V2i::new(max.x - 1, min.y + 1), V2i::new(max.x, max.y - 1), color);
        }
    }

    fn draw_text(&mut self, text: &str, font: &FontBitmaps, p: V2i, color: Color) {
        font.draw_string(self, p, text, color);
    }

    fn debug_print_at(&mut self, text: &str, p: V2i) {
        debug_font::draw_string(self, p, text, Color::WHITE);
    }
}

impl Load for Bitmap {
    fn load(filepath: impl AsRef<Path>) -> Result<Self, RenderError> {
        let png = lodepng::decode32_file(filepath)?;
        let data = png.buffer
            .iter()
            .map(|&px| u32::from(Color::from(px)))
            .collect();
        Ok(Self {
            data,
            width: png.width as i32,
            height: png.height as i32,
        })
    }
}

impl Save for Bitmap {
    fn save(&self, filepath: impl AsRef<Path>) -> Result<(), RenderError> {
        let pixels: Vec<rgb::RGBA8> = self.data
            .iter()
            .map(|&px| Color::from(px).into())
            .collect();
        lodepng::encode32_file(filepath, &pixels, self.width as usize, self.height as usize)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque_count(bmp: &Bitmap) -> usize {
        bmp.pixels().iter().filter(|&&p| p >> 24 != 0).count()
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut bmp = Bitmap::with_dimensions(4, 4);
        bmp.fill_rect(V2i::new(-2, -2), V2i::new(2, 2), Color::RED);
        assert_eq!(opaque_count(&bmp), 4);
        assert_eq!(bmp.pixel(1, 1), Some(Color::RED));
        assert_eq!(bmp.pixel(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn draw_bmp_handles_negative_offsets() {
        let src = Bitmap::with_dimensions(3, 3).filled(Color::BLUE);
        let mut dst = Bitmap::with_dimensions(5, 5);
        dst.draw_bmp(&src, V2i::new(-1, -1));
        assert_eq!(opaque_count(&dst), 4);
        assert_eq!(dst.pixel(0, 0), Some(Color::BLUE));
        assert_eq!(dst.pixel(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn translated_blit_matches_integer_blit() {
        let mut src = Bitmap::with_dimensions(3, 2).filled(Color::YELLOW);
        src[(0, 0)] = Color::RED.into();

        let mut fast = Bitmap::with_dimensions(8, 8);
        fast.blit(&src, &Affine::translation(2.0, 3.0));

        let mut slow = Bitmap::with_dimensions(8, 8);
        slow.draw_transformed(&src, &Affine::translation(2.0, 3.0));

        assert_eq!(fast, slow);
        assert_eq!(fast.pixel(2, 3), Some(Color::RED));
    }

    #[test]
    fn scaled_blit_covers_scaled_area() {
        let src = Bitmap::with_dimensions(2, 2).filled(Color::WHITE);
        let mut dst = Bitmap::with_dimensions(8, 8);
        dst.blit(&src, &Affine::scaling(2.0, 3.0));
        assert_eq!(opaque_count(&dst), 4 * 6);
    }

    #[test]
    fn singular_blit_draws_nothing() {
        let src = Bitmap::with_dimensions(2, 2).filled(Color::WHITE);
        let mut dst = Bitmap::with_dimensions(4, 4);
        dst.blit(&src, &Affine::scaling(0.0, 1.0));
        assert_eq!(opaque_count(&dst), 0);
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut bmp = Bitmap::with_dimensions(10, 10);
        bmp.draw_line(V2f::new(1.0, 1.0), V2f::new(8.0, 4.0), Color::WHITE);
        assert_eq!(bmp.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(bmp.pixel(8, 4), Some(Color::WHITE));
        assert_eq!(opaque_count(&bmp), 8);
    }

    #[test]
    fn outline_rect_leaves_interior_empty() {
        let mut bmp = Bitmap::with_dimensions(10, 10);
        bmp.draw_rect(V2f::new(2.0, 2.0), V2f::new(4.0, 4.0), false, Color::WHITE);
        assert_eq!(bmp.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(bmp.pixel(5, 5), Some(Color::WHITE));
        assert_eq!(bmp.pixel(3, 3), Some(Color::TRANSPARENT));
        assert_eq!(opaque_count(&bmp), 12);
    }

    #[test]
    fn debug_print_marks_pixels() {
        let mut bmp = Bitmap::with_dimensions(40, 10);
        bmp.debug_print_at("Hi 42", V2i::new(1, 1));
        assert!(opaque_count(&bmp) > 0);
        assert_eq!(bmp.pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn png_keeps_pixels() {
        let mut bmp = Bitmap::with_dimensions(3, 2);
        bmp[(0, 0)] = Color::RED.into();
        bmp[(2, 1)] = Color::WHITE.with_alpha(100).into();
        let path = std::env::temp_dir().join(format!("render-png-{}.png", std::process::id()));

        bmp.save(&path).unwrap();
        let loaded = Bitmap::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.dim(), V2i::new(3, 2));
        assert_eq!(loaded.pixels(), bmp.pixels());
    }
}
