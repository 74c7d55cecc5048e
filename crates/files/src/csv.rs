//! Delimited-text writing.
//!
//! A field is quoted only when it has to be: when it contains a comma, a double quote,
//! or a line break. Inside a quoted field every double quote is doubled. Everything
//! else is emitted verbatim, so simple identifiers stay readable in a text editor.
//! Every record ends with a bare `\n`.

use crate::FilesError;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

fn writer<W: Write>(out: W) -> ::csv::Writer<W> {
    ::csv::WriterBuilder::new()
        .quote_style(::csv::QuoteStyle::Necessary)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(out)
}

fn csv_error(path: &Path, source: ::csv::Error) -> FilesError {
    FilesError::Csv {
        file: path.display().to_string(),
        source,
    }
}

/// Renders one row, escaping each field and terminating the line with `\n`.
pub fn render_row<S: AsRef<str>>(fields: &[S]) -> Result<String, FilesError> {
    let in_memory = |source| FilesError::Csv {
        file: "<memory>".to_owned(),
        source,
    };

    let mut wtr = writer(Vec::new());
    wtr.write_record(fields.iter().map(AsRef::<str>::as_ref))
        .map_err(in_memory)?;
    let rendered = wtr
        .into_inner()
        .map_err(|e| in_memory(::csv::Error::from(e.into_error())))?;

    String::from_utf8(rendered).map_err(|e| {
        FilesError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Rendered row is not UTF-8: {}", e),
        ))
    })
}

/// Replaces `path` with a CSV table: header line, then one line per row.
///
/// Header names are fixed identifiers and never need quoting.
pub fn write_table<R>(path: &Path, header: &[&str], rows: R) -> Result<(), FilesError>
where
    R: IntoIterator<Item = Vec<String>>,
{
    let file = File::create(path).map_err(|e| {
        FilesError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to create table {}: {}", path.display(), e),
        ))
    })?;

    let mut wtr = writer(file);
    wtr.write_record(header)
        .map_err(|source| csv_error(path, source))?;
    for row in rows {
        wtr.write_record(&row)
            .map_err(|source| csv_error(path, source))?;
    }
    wtr.flush().map_err(|e| {
        FilesError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to write table {}: {}", path.display(), e),
        ))
    })
}

/// Appends one row to `path`, writing `header` first if the file does not exist yet.
///
/// Returns `true` when this call created the file (and therefore wrote the header).
pub fn append_row(path: &Path, header: &[&str], row: &[String]) -> Result<bool, FilesError> {
    let write_header = !path.exists();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to open log {}: {}", path.display(), e),
            ))
        })?;

    let mut wtr = writer(file);
    if write_header {
        wtr.write_record(header)
            .map_err(|source| csv_error(path, source))?;
    }
    wtr.write_record(row)
        .map_err(|source| csv_error(path, source))?;
    wtr.flush().map_err(|e| {
        FilesError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to append to log {}: {}", path.display(), e),
        ))
    })?;

    Ok(write_header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn field(value: &str) -> String {
        let row = render_row(&[value, "x"]).unwrap();
        row.strip_suffix(",x\n").unwrap().to_string()
    }

    #[test]
    fn plain_field_is_unquoted() {
        assert_eq!(field("P001"), "P001");
        assert_eq!(field("Mon-Fri 09:00-15:00"), "Mon-Fri 09:00-15:00");
        assert_eq!(field(""), "");
    }

    #[test]
    fn comma_and_quote_are_escaped() {
        assert_eq!(field(r#"Doe, John "MD""#), r#""Doe, John ""MD""""#);
    }

    #[test]
    fn lone_quote_is_escaped() {
        assert_eq!(field(r#"6" bandage"#), r#""6"" bandage""#);
    }

    #[test]
    fn newline_forces_quoting() {
        assert_eq!(field("line one\nline two"), "\"line one\nline two\"");
        assert_eq!(field("a\r\nb"), "\"a\r\nb\"");
    }

    #[test]
    fn row_joins_escaped_fields() {
        let row = render_row(&["P001", "Doe, Jane", "", "30"]).unwrap();
        assert_eq!(row, "P001,\"Doe, Jane\",,30\n");
    }

    #[test]
    fn table_starts_with_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doctors.txt");

        write_table(
            &path,
            &["id", "name"],
            vec![
                vec!["D1".to_string(), "House".to_string()],
                vec!["D2".to_string(), "Grey, M".to_string()],
            ],
        )
        .unwrap();

        let table = fs::read_to_string(&path).unwrap();
        assert_eq!(table, "id,name\nD1,House\nD2,\"Grey, M\"\n");
    }

    #[test]
    fn empty_table_is_header_only() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("users.txt");

        write_table(&path, &["username", "role", "passwordHash"], Vec::new()).unwrap();

        let table = fs::read_to_string(&path).unwrap();
        assert_eq!(table, "username,role,passwordHash\n");
    }

    #[test]
    fn table_rewrite_replaces_previous_rows() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("staff.txt");

        write_table(&path, &["id"], vec![vec!["S1".to_string()], vec!["S2".to_string()]])
            .unwrap();
        write_table(&path, &["id"], vec![vec!["S3".to_string()]]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "id\nS3\n");
    }
}
