//! Label tiles: the number printed on each face, rendered once into a
//! square raster and packed into a single atlas.
//!
//! Glyphs come from an embedded 5x7 bitmap digit font scaled up to the tile
//! size, so no font file is loaded and nothing gates the first frame.

/// Side length (in pixels) of a single label tile.
pub const TILE_SIZE: u32 = 512;

/// Tiles per atlas row.
pub const ATLAS_COLUMNS: u32 = 5;
/// Atlas rows.
pub const ATLAS_ROWS: u32 = 4;

const GLYPH_COLUMNS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
// Cells between adjacent digits.
const GLYPH_SPACING: u32 = 1;
// Pixels per glyph cell; two digits plus spacing fill 440 of 512 pixels.
const GLYPH_SCALE: u32 = 40;

const BACKGROUND: [u8; 4] = [0xd5, 0x21, 0x0a, 0xff];
const INK_OPACITY: f32 = 0.8;

// 5x7 digit patterns, one row per bitmask, bit 4 leftmost.
const DIGITS: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

// Glyphs that still read as a digit after a 180-degree turn.
fn rotate_glyph(c: char) -> Option<char> {
    match c {
        '0' => Some('0'),
        '1' => Some('1'),
        '6' => Some('9'),
        '8' => Some('8'),
        '9' => Some('6'),
        _ => None,
    }
}

fn is_printed_label(text: &str) -> bool {
    (1..=crate::FACE_COUNT).any(|n| n.to_string() == text)
}

/// Whether a label needs the orientation mark: its upside-down reading is a
/// different, valid label ("6" and "9" in the digit alphabet).
pub fn needs_orientation_mark(text: &str) -> bool {
    let rotated: Option<String> = text.chars().rev().map(rotate_glyph).collect();
    match rotated {
        Some(reading) => reading != text && is_printed_label(&reading),
        None => false,
    }
}

/// A square RGBA8 raster holding one rendered label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelRaster {
    size: u32,
    pixels: Vec<[u8; 4]>,
}

impl LabelRaster {
    fn new(size: u32, fill: [u8; 4]) -> Self {
        Self {
            size,
            pixels: vec![fill; (size * size) as usize],
        }
    }

    /// Render the label text, adding the orientation mark where needed.
    pub fn render(text: &str) -> Self {
        Self::render_with_mark(text, needs_orientation_mark(text))
    }

    fn render_with_mark(text: &str, mark: bool) -> Self {
        let mut raster = Self::new(TILE_SIZE, BACKGROUND);
        let ink = composite(BACKGROUND, [0, 0, 0], INK_OPACITY);

        let count = text.chars().count() as u32;
        assert!(count > 0, "empty label");
        let cell = GLYPH_SCALE;
        let text_width = (count * GLYPH_COLUMNS + (count - 1) * GLYPH_SPACING) * cell;
        let text_height = GLYPH_ROWS * cell;
        assert!(text_width <= TILE_SIZE, "label {:?} does not fit", text);
        let x0 = (TILE_SIZE - text_width) / 2;
        let y0 = (TILE_SIZE - text_height) / 2;

        for (position, c) in text.chars().enumerate() {
            let digit = c.to_digit(10).unwrap_or_else(|| {
                panic!("label {:?} contains a non-digit glyph", text)
            });
            let pattern = &DIGITS[digit as usize];
            let gx = x0 + position as u32 * (GLYPH_COLUMNS + GLYPH_SPACING) * cell;
            for (row, bits) in pattern.iter().enumerate() {
                for col in 0..GLYPH_COLUMNS {
                    if bits & (1 << (GLYPH_COLUMNS - 1 - col)) != 0 {
                        raster.fill_rect(gx + col * cell, y0 + row as u32 * cell, cell, cell, ink);
                    }
                }
            }
        }

        // The mark sits to the lower right of the glyphs and never shifts
        // the digit placement itself.
        if mark {
            let mx = x0 + text_width + cell;
            let my = y0 + (GLYPH_ROWS - 1) * cell;
            raster.fill_rect(mx, my, cell, cell, ink);
        }

        raster
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: [u8; 4]) {
        assert!(x + width <= self.size && y + height <= self.size);
        for row in y..y + height {
            let start = (row * self.size + x) as usize;
            self.pixels[start..start + width as usize].fill(color);
        }
    }
}

fn composite(base: [u8; 4], over: [u8; 3], opacity: f32) -> [u8; 4] {
    let mut out = base;
    for (channel, value) in out.iter_mut().take(3).zip(over) {
        *channel =
            (value as f32 * opacity + *channel as f32 * (1.0 - opacity)).round() as u8;
    }
    out
}

/// All 20 label tiles in one raster, laid out row-major by label.
/// Built once at startup and reused for the lifetime of the program.
pub struct LabelAtlas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl LabelAtlas {
    pub fn build() -> Self {
        let width = ATLAS_COLUMNS * TILE_SIZE;
        let height = ATLAS_ROWS * TILE_SIZE;
        let mut pixels = vec![BACKGROUND; (width * height) as usize];
        for label in 1..=crate::FACE_COUNT as u8 {
            let tile = LabelRaster::render(&label.to_string());
            let slot = (label - 1) as u32;
            let tx = slot % ATLAS_COLUMNS * TILE_SIZE;
            let ty = slot / ATLAS_COLUMNS * TILE_SIZE;
            for row in 0..TILE_SIZE {
                let src = &tile.pixels()[(row * TILE_SIZE) as usize..][..TILE_SIZE as usize];
                let start = ((ty + row) * width + tx) as usize;
                pixels[start..start + TILE_SIZE as usize].copy_from_slice(src);
            }
        }
        log::debug!(
            "rendered {} label tiles into a {}x{} atlas",
            crate::FACE_COUNT,
            width,
            height
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes in row-major order, ready for upload.
    pub fn data(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// The `[min, max]` corners of a label's tile in atlas UV space.
    pub fn uv_rect(&self, label: u8) -> ([f32; 2], [f32; 2]) {
        assert!(
            (1..=crate::FACE_COUNT as u8).contains(&label),
            "label {} out of range",
            label
        );
        let slot = (label - 1) as u32;
        let col = slot % ATLAS_COLUMNS;
        let row = slot / ATLAS_COLUMNS;
        let min = [
            col as f32 / ATLAS_COLUMNS as f32,
            row as f32 / ATLAS_ROWS as f32,
        ];
        let max = [
            (col + 1) as f32 / ATLAS_COLUMNS as f32,
            (row + 1) as f32 / ATLAS_ROWS as f32,
        ];
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_six_and_nine_get_the_mark() {
        let marked: Vec<String> = (1..=crate::FACE_COUNT)
            .map(|n| n.to_string())
            .filter(|text| needs_orientation_mark(text))
            .collect();
        assert_eq!(marked, ["6", "9"]);
    }

    #[test]
    fn mark_does_not_move_the_digits() {
        let marked = LabelRaster::render("6");
        let unmarked = LabelRaster::render_with_mark("6", false);
        assert_ne!(marked, unmarked);
        let background = unmarked.pixels()[0];
        for (with, without) in marked.pixels().iter().zip(unmarked.pixels()) {
            if *without != background {
                assert_eq!(with, without);
            }
        }
    }

    #[test]
    fn unambiguous_labels_render_without_the_mark() {
        for text in ["1", "8", "16", "19", "20"] {
            assert_eq!(
                LabelRaster::render(text),
                LabelRaster::render_with_mark(text, false)
            );
        }
    }

    #[test]
    fn tiles_have_the_reference_size() {
        let raster = LabelRaster::render("20");
        assert_eq!(raster.size(), 512);
        assert_eq!(raster.pixels().len(), 512 * 512);
    }

    #[test]
    fn glyphs_are_centered_on_a_solid_background() {
        let raster = LabelRaster::render("1");
        let corner = raster.pixels()[0];
        let center = raster.pixels()[(256 * raster.size() + 256) as usize];
        assert_eq!(corner, BACKGROUND);
        assert_ne!(center, BACKGROUND);
    }

    #[test]
    fn atlas_packs_every_label() {
        let atlas = LabelAtlas::build();
        assert_eq!(atlas.width(), ATLAS_COLUMNS * TILE_SIZE);
        assert_eq!(atlas.height(), ATLAS_ROWS * TILE_SIZE);
        assert_eq!(
            atlas.data().len(),
            (atlas.width() * atlas.height() * 4) as usize
        );
        for label in 1..=crate::FACE_COUNT as u8 {
            let (min, max) = atlas.uv_rect(label);
            assert!(min[0] >= 0.0 && min[1] >= 0.0);
            assert!(max[0] <= 1.0 && max[1] <= 1.0);
            assert!(min[0] < max[0] && min[1] < max[1]);
        }
    }

    #[test]
    fn atlas_tiles_match_standalone_rasters() {
        let atlas = LabelAtlas::build();
        let tile = LabelRaster::render("7");
        let (min, _) = atlas.uv_rect(7);
        let tx = (min[0] * atlas.width() as f32) as u32;
        let ty = (min[1] * atlas.height() as f32) as u32;
        for row in [0, 255, 511] {
            for col in [0, 255, 511] {
                let from_atlas =
                    atlas.pixels[((ty + row) * atlas.width() + tx + col) as usize];
                let from_tile = tile.pixels()[(row * tile.size() + col) as usize];
                assert_eq!(from_atlas, from_tile);
            }
        }
    }
}
