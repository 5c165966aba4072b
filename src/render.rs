use crate::registry::Registry;
use crate::schema::Table;
// render.rs

/// Formats the sidebar list of tables, or the loading marker while a fetch is in flight.
pub fn table_list(registry: &Registry) -> String {
    if registry.is_loading() {
        return "Loading...\n".to_string();
    }
    let width = registry
        .tables()
        .iter()
        .map(|t| t.table_name.len())
        .max()
        .unwrap_or(0)
        .max("Tables".len());

    let mut out = String::new();
    out.push_str(&format!("{:<width$} |\n", "Tables", width = width));
    out.push_str(&format!("{:-<width$}-\n", "", width = width));
    for table in registry.tables() {
        let marker = match registry.selected() {
            Some(selected) if selected.table_name == table.table_name => " <",
            _ => "",
        };
        out.push_str(&format!(
            "{:<width$} |{}\n",
            table.table_name,
            marker,
            width = width
        ));
    }
    out
}

/// Formats one table as a column / type / attributes grid.
pub fn table_detail(table: &Table) -> String {
    let header = ["Column Name", "Type", "Attributes"];
    let rows: Vec<[String; 3]> = table
        .columns
        .iter()
        .map(|c| {
            [
                c.name.clone(),
                c.data_type.to_string(),
                c.attributes.joined(),
            ]
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            let max_val = rows.iter().map(|r| r[i].len()).max().unwrap_or(0);
            std::cmp::max(header[i].len(), max_val)
        })
        .collect();

    let mut out = format!("Table: {}\n", table.table_name);
    for (h, w) in header.iter().zip(&widths) {
        out.push_str(&format!("{:<width$} ", h, width = w));
    }
    out.push('\n');
    for w in &widths {
        out.push_str(&format!("{:-<width$}-", "", width = *w));
    }
    out.push('\n');
    for row in &rows {
        for (val, w) in row.iter().zip(&widths) {
            out.push_str(&format!("{:<width$} ", val, width = w));
        }
        out.push('\n');
    }
    out
}
