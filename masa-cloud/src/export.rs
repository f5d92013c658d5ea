//! CSV export formatting
//!
//! Panel exports are small enough to build in memory; rows are formatted
//! by hand with RFC 4180 quoting.

/// Quote a field if it contains a comma, quote, or newline.
pub fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// One CSV line (with trailing newline) from already-stringified fields.
pub fn csv_row(fields: &[&str]) -> String {
    let mut line = fields
        .iter()
        .map(|f| csv_escape(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Response headers for a CSV attachment download.
pub fn csv_headers(filename: &str) -> [(http::HeaderName, String); 2] {
    [
        (
            http::header::CONTENT_TYPE,
            "text/csv; charset=utf-8".to_string(),
        ),
        (
            http::header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields_unquoted() {
        assert_eq!(csv_escape("2024-03-15"), "2024-03-15");
        assert_eq!(csv_row(&["a", "b", "c"]), "a,b,c\n");
    }

    #[test]
    fn test_comma_and_quote_escaping() {
        assert_eq!(csv_escape("Kebap, Acılı"), "\"Kebap, Acılı\"");
        assert_eq!(csv_escape("\"Özel\" Menü"), "\"\"\"Özel\"\" Menü\"");
    }

    #[test]
    fn test_newline_quoted() {
        assert_eq!(csv_escape("satır\nsonu"), "\"satır\nsonu\"");
    }

    #[test]
    fn test_row_with_mixed_fields() {
        let row = csv_row(&["o-1", "Masa 4, Bahçe", "120.50"]);
        assert_eq!(row, "o-1,\"Masa 4, Bahçe\",120.50\n");
    }
}
