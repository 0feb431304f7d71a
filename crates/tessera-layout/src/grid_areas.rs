//! Named Grid Areas
//!
//! Registry of rectangular named regions over a fixed rows x columns
//! template. Line indices are 0-based with exclusive ends.

use crate::error::{GridAreaError, LayoutError, Result};

/// A named rectangular region of the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedArea {
    pub name: String,
    pub row_start: usize,
    pub row_end: usize,
    pub column_start: usize,
    pub column_end: usize,
}

impl NamedArea {
    pub fn row_span(&self) -> usize {
        self.row_end - self.row_start
    }

    pub fn column_span(&self) -> usize {
        self.column_end - self.column_start
    }

    /// Whether the two areas share at least one cell
    pub fn overlaps(&self, other: &NamedArea) -> bool {
        self.row_start < other.row_end
            && other.row_start < self.row_end
            && self.column_start < other.column_end
            && other.column_start < self.column_end
    }
}

/// Named area registry for a grid container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridTemplateAreas {
    rows: usize,
    columns: usize,
    areas: Vec<NamedArea>,
}

impl GridTemplateAreas {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns, areas: Vec::new() }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn areas(&self) -> &[NamedArea] {
        &self.areas
    }

    /// Register a named area.
    ///
    /// Fails when the rectangle is empty or leaves the template, or when
    /// it shares a cell with an area registered earlier.
    pub fn add_area(
        &mut self,
        name: impl Into<String>,
        row_start: usize,
        row_end: usize,
        column_start: usize,
        column_end: usize,
    ) -> std::result::Result<(), GridAreaError> {
        let area = NamedArea { name: name.into(), row_start, row_end, column_start, column_end };

        if row_start >= row_end
            || column_start >= column_end
            || row_end > self.rows
            || column_end > self.columns
        {
            return Err(GridAreaError::OutOfBounds {
                name: area.name,
                row_start,
                row_end,
                column_start,
                column_end,
                rows: self.rows,
                columns: self.columns,
            });
        }

        if let Some(existing) = self.areas.iter().find(|a| a.overlaps(&area)) {
            return Err(GridAreaError::Overlap { name: area.name, existing: existing.name.clone() });
        }

        self.areas.push(area);
        Ok(())
    }

    /// Builder form of [`GridTemplateAreas::add_area`]
    pub fn with_area(
        mut self,
        name: impl Into<String>,
        row_start: usize,
        row_end: usize,
        column_start: usize,
        column_end: usize,
    ) -> std::result::Result<Self, GridAreaError> {
        self.add_area(name, row_start, row_end, column_start, column_end)?;
        Ok(self)
    }

    /// Look up an area by name. The first registration of a name wins.
    pub fn get(&self, name: &str) -> Option<&NamedArea> {
        self.areas.iter().find(|a| a.name == name)
    }

    /// Build a template from `grid-template-areas` style rows, e.g.
    /// `["header header", "nav main"]`. `.` marks an unnamed cell.
    pub fn parse(rows: &[&str]) -> Result<Self> {
        let grid: Vec<Vec<&str>> = rows.iter().map(|row| row.split_whitespace().collect()).collect();
        let columns = grid.first().map_or(0, Vec::len);

        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != columns {
                return Err(LayoutError::RaggedTemplate { row, expected: columns, found: cells.len() });
            }
        }

        let mut template = Self::new(grid.len(), columns);
        let mut seen: Vec<&str> = Vec::new();

        for (row, cells) in grid.iter().enumerate() {
            for (column, &name) in cells.iter().enumerate() {
                if name == "." || seen.contains(&name) {
                    continue;
                }
                seen.push(name);

                let column_end = column + cells[column..].iter().take_while(|&&c| c == name).count();
                let row_end = row + grid[row..].iter().take_while(|r| r[column] == name).count();

                // Every cell of the bounding box must carry the name and no
                // cell outside it may
                let rectangular = grid.iter().enumerate().all(|(r, cells)| {
                    cells.iter().enumerate().all(|(c, &cell)| {
                        let inside = (row..row_end).contains(&r) && (column..column_end).contains(&c);
                        inside == (cell == name)
                    })
                });
                if !rectangular {
                    return Err(LayoutError::NonRectangularArea { name: name.to_string() });
                }

                template.add_area(name, row, row_end, column, column_end)?;
            }
        }

        Ok(template)
    }
}
