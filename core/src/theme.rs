use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2, GameConfig};

/// Plain RGBA color, 8 bits per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Colors the renderer draws with. Built once and handed to the renderer
/// at construction instead of living in process-wide statics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Rgba,
    pub hidden: Rgba,
    pub revealed: Rgba,
    pub mine: Rgba,
    pub flag: Rgba,
    pub text: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        // the classic grey scheme
        Self {
            background: Rgba::opaque(192, 192, 192),
            hidden: Rgba::opaque(128, 128, 128),
            revealed: Rgba::opaque(255, 255, 255),
            mine: Rgba::opaque(255, 0, 0),
            flag: Rgba::opaque(0, 255, 0),
            text: Rgba::opaque(0, 0, 0),
        }
    }
}

/// Pixel geometry of the board on screen: square cell size and the grid's
/// offset inside the window. The strip above the grid holds status text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMetrics {
    pub cell_size: u32,
    pub grid_offset_x: u32,
    pub grid_offset_y: u32,
}

impl Default for BoardMetrics {
    fn default() -> Self {
        Self {
            cell_size: 32,
            grid_offset_x: 20,
            grid_offset_y: 60,
        }
    }
}

impl BoardMetrics {
    /// Maps a window pixel to the grid cell under it, or `None` when the
    /// pixel lies outside the grid on any side. Pixels left of or above
    /// the grid origin are outside too, never clamped onto column or row
    /// zero; the engine is simply not invoked for them.
    pub fn cell_at_pixel(&self, px: i32, py: i32, config: GameConfig) -> Option<Coord2> {
        if self.cell_size == 0 {
            return None;
        }

        let rel_x = px.checked_sub_unsigned(self.grid_offset_x)?;
        let rel_y = py.checked_sub_unsigned(self.grid_offset_y)?;
        if rel_x < 0 || rel_y < 0 {
            return None;
        }

        let x = rel_x as u32 / self.cell_size;
        let y = rel_y as u32 / self.cell_size;
        if x >= u32::from(config.width) || y >= u32::from(config.height) {
            return None;
        }

        Some((x as Coord, y as Coord))
    }

    /// Top-left pixel of a cell, for the renderer's draw loop.
    pub const fn cell_origin(&self, (x, y): Coord2) -> (u32, u32) {
        (
            self.grid_offset_x + x as u32 * self.cell_size,
            self.grid_offset_y + y as u32 * self.cell_size,
        )
    }

    /// Window size that fits the grid, its side margins, and the status
    /// strip above it. Default metrics give the classic 328x388 beginner
    /// window.
    pub const fn window_size(&self, config: GameConfig) -> (u32, u32) {
        let grid_w = config.width as u32 * self.cell_size;
        let grid_h = config.height as u32 * self.cell_size;
        (
            grid_w + 2 * self.grid_offset_x,
            grid_h + self.grid_offset_y + 2 * self.grid_offset_x,
        )
    }
}

/// Everything the renderer is configured with: one immutable value passed
/// in at construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub palette: Palette,
    pub metrics: BoardMetrics,
}
