//! Rectangular grid of tile labels with the `;`-separated text format
//!
//! Serves both as the sample a model learns from and as the materialized
//! output of a generation. Cells are stored row-major.

use std::fmt;

use crate::io::configuration::FIELD_DELIMITER;
use crate::io::error::{Result, format_error, invalid_parameter};

/// Row-major grid of tile-type labels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileGrid {
    labels: Vec<String>,
    width: usize,
    height: usize,
}

impl TileGrid {
    /// Grid of size 0x0
    pub const fn empty() -> Self {
        Self {
            labels: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    /// Grid with the given shape and no labels yet, to be filled by appending
    pub fn with_dimensions(width: usize, height: usize) -> Self {
        Self {
            labels: Vec::with_capacity(width.saturating_mul(height)),
            width,
            height,
        }
    }

    /// Build a grid from row-major labels
    ///
    /// # Errors
    ///
    /// Returns an error if the label count does not equal `width * height`
    pub fn from_labels(width: usize, height: usize, labels: Vec<String>) -> Result<Self> {
        if Some(labels.len()) != width.checked_mul(height) {
            return Err(invalid_parameter(
                "labels",
                &labels.len(),
                &format!("expected {width}x{height} labels"),
            ));
        }
        Ok(Self {
            labels,
            width,
            height,
        })
    }

    /// Strictly parse the text format
    ///
    /// Rows are separated by newlines and fields by `;`. Blank lines are
    /// skipped and a single trailing delimiter on a row is tolerated.
    ///
    /// # Errors
    ///
    /// Returns a format error if a field is empty or rows differ in length
    pub fn parse(text: &str) -> Result<Self> {
        let mut labels = Vec::new();
        let mut width = 0;
        let mut height = 0;

        for (line_index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_number = line_index + 1;
            let row = line.strip_suffix(FIELD_DELIMITER).unwrap_or(line);

            let mut row_width = 0;
            for (column, field) in row.split(FIELD_DELIMITER).enumerate() {
                if field.is_empty() {
                    return Err(format_error(
                        line_number,
                        &format!("empty field in column {}", column + 1),
                    ));
                }
                labels.push(field.to_string());
                row_width += 1;
            }

            if height == 0 {
                width = row_width;
            } else if row_width != width {
                return Err(format_error(
                    line_number,
                    &format!("expected {width} fields, found {row_width}"),
                ));
            }
            height += 1;
        }

        Ok(Self {
            labels,
            width,
            height,
        })
    }

    /// Parse the text format, recovering from malformed input with an empty grid
    pub fn from_text(text: &str) -> Self {
        match Self::parse(text) {
            Ok(grid) => grid,
            Err(error) => {
                log::warn!("{error}; using an empty grid instead");
                Self::empty()
            }
        }
    }

    /// Render the grid in the text format, one row per line
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Append a label at the next row-major position
    ///
    /// # Errors
    ///
    /// Returns an error if the grid already holds `width * height` labels
    pub fn push(&mut self, label: impl Into<String>) -> Result<()> {
        if self.remaining() == 0 {
            return Err(invalid_parameter(
                "labels",
                &(self.labels.len() + 1),
                &format!("grid is {}x{}", self.width, self.height),
            ));
        }
        self.labels.push(label.into());
        Ok(())
    }

    /// Number of labels still missing from the declared shape
    pub fn remaining(&self) -> usize {
        self.width
            .saturating_mul(self.height)
            .saturating_sub(self.labels.len())
    }

    /// Label at a row-major index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Label at a row and column
    pub fn get_at(&self, row: usize, col: usize) -> Option<&str> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.get(row * self.width + col)
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of stored labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the grid holds no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether every cell of the declared shape holds a label
    pub fn is_complete(&self) -> bool {
        Some(self.labels.len()) == self.width.checked_mul(self.height)
    }

    /// All labels in row-major order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Iterate over complete rows
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.labels.chunks(self.width.max(1))
    }
}

/// Appends up to the declared shape; surplus labels are dropped with a warning
impl Extend<String> for TileGrid {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        let mut iter = iter.into_iter();
        let remaining = self.remaining();
        self.labels.extend(iter.by_ref().take(remaining));
        let dropped = iter.count();
        if dropped > 0 {
            log::warn!(
                "dropped {dropped} labels beyond the {}x{} grid shape",
                self.width,
                self.height
            );
        }
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for label in row {
                if !first {
                    write!(f, "{FIELD_DELIMITER}")?;
                }
                write!(f, "{label}")?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
