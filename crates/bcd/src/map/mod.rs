//! Binary occupancy grid swept by the decomposition.
//!
//! Purpose
//! - Answer "is pixel `(x, y)` free?" for a `W × H` grid, with `x` the column and
//!   `y` growing downwards (image convention).
//! - Build grids from raw cells, 8-bit luma with a threshold, or ASCII art.
//!
//! References
//! - Code cross-refs: `sweep::decompose`, `rand::draw_room`.

pub mod rand;

use std::fmt;

use crate::error::{BcdError, Result};

/// Thresholding applied when converting luma pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapCfg {
    /// A pixel is free when its value is strictly above this.
    pub threshold: u8,
}

impl Default for MapCfg {
    fn default() -> Self {
        Self { threshold: 100 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyMap {
    width: usize,
    height: usize,
    /// Row-major, `free[y * width + x]`.
    free: Vec<bool>,
}

impl OccupancyMap {
    /// All-occupied grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, false)
    }

    pub fn filled(width: usize, height: usize, free: bool) -> Self {
        Self {
            width,
            height,
            free: vec![free; width * height],
        }
    }

    /// Row-major free flags.
    pub fn from_cells(width: usize, height: usize, free: Vec<bool>) -> Result<Self> {
        if free.len() != width * height {
            return Err(BcdError::MapShape {
                expected: width * height,
                actual: free.len(),
            });
        }
        Ok(Self {
            width,
            height,
            free,
        })
    }

    /// Row-major 8-bit luma, thresholded by `cfg`.
    pub fn from_luma(width: usize, height: usize, luma: &[u8], cfg: MapCfg) -> Result<Self> {
        let free = luma.iter().map(|&p| p > cfg.threshold).collect();
        Self::from_cells(width, height, free)
    }

    /// `.` is free, `#` is occupied, one line per row. Blank lines and surrounding
    /// whitespace are ignored; all rows must have the same width.
    pub fn from_ascii(art: &str) -> Result<Self> {
        let mut width = None;
        let mut free = Vec::new();
        let mut height = 0;
        for (n, line) in art.lines().enumerate() {
            let row = line.trim();
            if row.is_empty() {
                continue;
            }
            let line_no = n + 1;
            let w = *width.get_or_insert(row.chars().count());
            if row.chars().count() != w {
                return Err(BcdError::MapParse {
                    line: line_no,
                    reason: format!("row has {} cells, expected {w}", row.chars().count()),
                });
            }
            for ch in row.chars() {
                match ch {
                    '.' => free.push(true),
                    '#' => free.push(false),
                    other => {
                        return Err(BcdError::MapParse {
                            line: line_no,
                            reason: format!("unexpected character {other:?}"),
                        })
                    }
                }
            }
            height += 1;
        }
        Self::from_cells(width.unwrap_or(0), height, free)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Out-of-range pixels count as occupied.
    #[inline]
    pub fn is_free(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.free[y * self.width + x]
    }

    /// Ignored outside the grid.
    pub fn set(&mut self, x: usize, y: usize, free: bool) {
        if x < self.width && y < self.height {
            self.free[y * self.width + x] = free;
        }
    }

    /// Set the half-open rectangle `[x0, x1) × [y0, y1)`, clipped to the grid.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, free: bool) {
        let (x1, y1) = (x1.min(self.width), y1.min(self.height));
        for y in y0..y1 {
            for x in x0..x1 {
                self.free[y * self.width + x] = free;
            }
        }
    }

    pub fn free_count(&self) -> usize {
        self.free.iter().filter(|&&f| f).count()
    }
}

/// Same ASCII form `from_ascii` reads.
impl fmt::Display for OccupancyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.free.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|&c| if c { '.' } else { '#' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
