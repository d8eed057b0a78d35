//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use pkgweb_ops::{OperationResult, PackagePayload, Response};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool) -> Self {
        Self { json_output }
    }

    /// Render operation result
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.json_output {
            Self::render_json(result)
        } else {
            Self::render_table(result);
            Ok(())
        }
    }

    /// Render as one JSON document per line
    fn render_json(result: &OperationResult) -> io::Result<()> {
        let json = result.to_json().map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    fn render_table(result: &OperationResult) {
        match result {
            OperationResult::PackageState(payload) => {
                println!("{}", package_table(std::slice::from_ref(payload)));
            }
            OperationResult::PackageList(payloads) => {
                if payloads.is_empty() {
                    println!("No packages match.");
                } else {
                    println!("{}", package_table(payloads));
                }
            }
            OperationResult::Response(response) => println!("{}", format_response(response)),
            OperationResult::Success(message) => println!("{message}"),
        }
    }
}

fn package_table(payloads: &[PackagePayload]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Name", "Version", "Type", "Status", "Change", "Progress"]);

    for payload in payloads {
        table.add_row(vec![
            payload.name.clone(),
            payload.version.clone(),
            payload.package_type.to_string(),
            payload.state.status.to_string(),
            payload.state.change_id.clone(),
            format_progress(payload),
        ]);
    }
    table
}

fn format_progress(payload: &PackagePayload) -> String {
    match (&payload.state.progress_summary, payload.state.progress_size) {
        (Some(summary), Some(size)) => format!("{summary} ({size})"),
        (Some(summary), None) => summary.clone(),
        (None, Some(size)) => size.to_string(),
        (None, None) => String::new(),
    }
}

fn format_response(response: &Response) -> String {
    format!(
        "{} {}: {}",
        response.status, response.message, response.package
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgweb_types::{Operation, RawSnapshot, RawStatus, SnapState};

    #[test]
    fn progress_column() {
        let mut state = SnapState::pending(Operation::Install, "3");
        state.progress_size = Some(40);
        state.progress_summary = Some("Download package \"hello\"".to_string());
        let payload = PackagePayload::new(RawSnapshot::new("hello", RawStatus::Available), state);
        assert_eq!(format_progress(&payload), "Download package \"hello\" (40)");

        let table = package_table(&[payload]).to_string();
        assert!(table.contains("installing"));
    }

    #[test]
    fn response_line() {
        let response = Response {
            message: "Accepted".to_string(),
            package: "hello".to_string(),
            status: 202,
        };
        assert_eq!(format_response(&response), "202 Accepted: hello");
    }
}
