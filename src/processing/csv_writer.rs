use crate::flow::{Quantity, Scan};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write equally long columns to a CSV file with a header row.
pub fn write_columns<P: AsRef<Path>>(
    path: P,
    headers: &[&str],
    columns: &[Vec<f64>],
) -> io::Result<()> {
    if headers.len() != columns.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Headers count ({}) doesn't match data columns ({})",
                headers.len(),
                columns.len()
            ),
        ));
    }
    let n_rows = columns.first().map_or(0, Vec::len);
    if let Some(col) = columns.iter().position(|c| c.len() != n_rows) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Column '{}' has {} rows, expected {n_rows}", headers[col], columns[col].len()),
        ));
    }

    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "{}", headers.join(","))?;
    for i in 0..n_rows {
        let row: Vec<String> = columns.iter().map(|col| format!("{:.15e}", col[i])).collect();
        writeln!(file, "{}", row.join(","))?;
    }
    file.flush()
}

/// One row per cell, one column per requested quantity.
pub fn write_scan_quantities<P: AsRef<Path>>(
    path: P,
    scan: &Scan,
    quantities: &[Quantity],
) -> io::Result<()> {
    let headers: Vec<&str> = quantities.iter().map(|q| q.name()).collect();
    let columns: Vec<Vec<f64>> = quantities.iter().map(|&q| scan.quantity_values(q)).collect();
    write_columns(path, &headers, &columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretization::generator::create_uniform_grid;
    use std::fs;
    use std::sync::Arc;

    #[test]
    fn scan_columns_are_written_per_cell() {
        let path = std::env::temp_dir().join("relpress_scan_columns.csv");
        let grid = Arc::new(create_uniform_grid([2, 1, 1], [0.0; 3], [2.0, 1.0, 1.0]).unwrap());
        let scan = Scan::new(grid, 0.0);

        write_scan_quantities(&path, &scan, &[Quantity::PositionX, Quantity::RelativePressure])
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "position_x,relative_pressure");
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("1.5"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let path = std::env::temp_dir().join("relpress_ragged.csv");
        let err = write_columns(&path, &["a", "b"], &[vec![1.0], vec![]]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
