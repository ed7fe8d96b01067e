use serde_json::{Map, Value};
use std::io;

use super::cell;

/// Write a fee envelope as `field,value` pairs, or schedule rows with a header.
pub fn print_csv(value: &Value) {
    let mut wtr = csv::Writer::from_writer(io::stdout().lock());

    let written = match value {
        Value::Object(envelope) => {
            let result = envelope
                .get("result")
                .and_then(Value::as_object)
                .unwrap_or(envelope);
            write_fields(&mut wtr, result)
        }
        Value::Array(rows) => write_rows(&mut wtr, rows),
        other => wtr.write_record([cell(other)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {e}");
    }
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, fields: &Map<String, Value>) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in fields {
        wtr.write_record([key.clone(), cell(val)])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        return Ok(());
    };

    let headers: Vec<&String> = first.keys().collect();
    wtr.write_record(&headers)?;
    for row in rows.iter().filter_map(Value::as_object) {
        wtr.write_record(headers.iter().map(|h| row.get(*h).map(cell).unwrap_or_default()))?;
    }
    Ok(())
}
