use std::fmt;

use crate::raster::Raster;

/// Read-only table of pixel intensities with a configurable number of columns.
#[derive(Debug)]
pub struct PixelTable<'raster> {
    values: &'raster [u8],
    columns: usize,
}

impl<'raster> PixelTable<'raster> {
    /// Lays out the raster's pixels `columns` per row. A zero column count is treated as one.
    pub fn new(raster: &'raster Raster, columns: usize) -> Self {
        Self {
            values: raster.as_bytes(),
            columns: columns.max(1),
        }
    }

    /// Number of columns per table row
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of table rows. The last row may be shorter than the others.
    pub fn row_count(&self) -> usize {
        self.values.len().div_ceil(self.columns)
    }

    /// Iterates over the table rows.
    pub fn rows(&self) -> impl Iterator<Item = &'raster [u8]> {
        self.values.chunks(self.columns)
    }
}

impl fmt::Display for PixelTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self.row_count().saturating_sub(1).to_string().len();

        write!(f, "{:label_width$} |", "")?;
        for column in 0..self.columns {
            write!(f, " {column:>3}")?;
        }
        writeln!(f)?;

        for (index, row) in self.rows().enumerate() {
            write!(f, "{index:>label_width$} |")?;
            for value in row {
                write!(f, " {value:>3}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[test]
fn wraps_pixels_into_rows() {
    let raster = Raster::new(5, 1, vec![1, 2, 3, 4, 5]).unwrap();
    let table = PixelTable::new(&raster, 2);
    assert_eq!(table.row_count(), 3);
    let rows: Vec<&[u8]> = table.rows().collect();
    assert_eq!(rows, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
}

#[test]
fn zero_columns_means_one() {
    let raster = Raster::new(2, 1, vec![1, 2]).unwrap();
    let table = PixelTable::new(&raster, 0);
    assert_eq!(table.columns(), 1);
    assert_eq!(table.row_count(), 2);
}

#[test]
fn formats_aligned_cells() {
    let raster = Raster::new(3, 1, vec![0, 128, 255]).unwrap();
    let text = PixelTable::new(&raster, 2).to_string();
    assert_eq!(text, "  |   0   1\n0 |   0 128\n1 | 255\n");
}
