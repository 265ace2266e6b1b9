//! JSON output for CLI commands
//!
//! - One JSON object per command on stdout
//! - `{"status":"ok","data":...}` or `{"status":"error","code":..,"message":..}`

use std::io::{self, Write};

use serde::Serialize;
use serde_json::{json, Value};

use super::errors::CliResult;

fn write_value<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Build a success envelope
pub fn ok_envelope<T: Serialize>(data: &T) -> CliResult<Value> {
    Ok(json!({
        "status": "ok",
        "data": serde_json::to_value(data)?
    }))
}

/// Build an error envelope
pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    write_value(&mut io::stdout().lock(), &ok_envelope(data)?)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_value(&mut io::stdout().lock(), &error_envelope(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let v = ok_envelope(&json!({"rows": 3})).unwrap();
        assert_eq!(v["status"], "ok");
        assert_eq!(v["data"]["rows"], 3);
    }

    #[test]
    fn test_error_envelope() {
        let v = error_envelope("CRIT_MISSING_DATA", "aggregates unavailable");
        assert_eq!(v["status"], "error");
        assert_eq!(v["code"], "CRIT_MISSING_DATA");
    }

    #[test]
    fn test_write_value_single_line() {
        let mut buf = Vec::new();
        write_value(&mut buf, &error_envelope("X", "y")).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.matches('\n').count(), 1);
    }
}
