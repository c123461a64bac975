use crate::record::{HEADER, RecordSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Dialect {
    MySql,
    Postgres,
}

impl Dialect {
    fn quote_identifier(self, name: &str) -> String {
        match self {
            Dialect::MySql => format!("`{}`", name.replace('`', "``")),
            Dialect::Postgres => format!("\"{}\"", name.replace('"', "\"\"")),
        }
    }

    fn quote_literal(self, value: &str) -> String {
        let escaped = match self {
            Dialect::MySql => value.replace('\\', "\\\\").replace('\'', "''"),
            Dialect::Postgres => value.replace('\'', "''"),
        };
        format!("'{escaped}'")
    }
}

/// One `INSERT` statement per record targeting `table`. Nothing is executed.
pub(super) fn render(records: &RecordSet, table: &str, dialect: Dialect) -> String {
    let table = dialect.quote_identifier(table);
    let columns = HEADER
        .iter()
        .map(|column| dialect.quote_identifier(column))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    for record in records {
        let values = record
            .values()
            .iter()
            .map(|value| dialect.quote_literal(value))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("INSERT INTO {table} ({columns}) VALUES ({values});\n"));
    }
    out
}
