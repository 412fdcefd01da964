use crate::taylor::expansion_table::ExpansionTable;
use csv::Writer;
use nalgebra::{DMatrix, DVector};
use std::fs::File;
use std::io::{self, Write};

/// columns: x, exact values, one column per expansion order
pub fn save_expansion_table_to_csv(table: &ExpansionTable, filename: &str) -> io::Result<()> {
    save_matrix_to_csv(&table.values, &table.headers, filename, &table.x_mesh, "x")
}

/// tab separated variant for quick inspection
pub fn save_expansion_table_to_file(table: &ExpansionTable, filename: &str) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "x\t{}", table.headers.join("\t"))?;
    for (i, row) in table.values.row_iter().enumerate() {
        let mut row_data = vec![table.x_mesh[i].to_string()];
        row_data.extend(row.iter().map(|&val| val.to_string()));
        writeln!(file, "{}", row_data.join("\t"))?;
    }
    Ok(())
}

pub fn save_matrix_to_csv(
    matrix: &DMatrix<f64>,
    headers: &[String],
    filename: &str,
    x_mesh: &DVector<f64>,
    arg: &str,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    let mut headers_with_x = vec![arg.to_string()];
    headers_with_x.extend(headers.iter().cloned());
    writer.write_record(&headers_with_x)?;

    for (i, row) in matrix.row_iter().enumerate() {
        let mut row_data = vec![x_mesh[i].to_string()];
        row_data.extend(row.iter().map(|&val| val.to_string()));
        writer.write_record(&row_data)?;
    }

    writer.flush()?;
    Ok(())
}
