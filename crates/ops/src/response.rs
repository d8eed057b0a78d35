//! Translation of operation outcomes into client responses

use pkgweb_errors::{ClientError, Error};
use serde::Serialize;

/// What a request handler sends back for a state-changing call
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Response {
    pub message: String,
    pub package: String,
    /// HTTP-style status code, carried out of band
    #[serde(skip)]
    pub status: u16,
}

/// Map the outcome of an operation on `package` to a response
#[must_use]
pub fn respond<T>(package: &str, result: &Result<T, Error>) -> Response {
    let (status, message) = match result {
        Ok(_) => (202, "Accepted"),
        Err(err) => match err.as_client() {
            Some(ClientError::AlreadyInstalled { .. }) => (200, "Installed"),
            Some(ClientError::OperationInProgress { .. }) => (400, "Operation in progress"),
            Some(ClientError::PackageNotFound { .. }) => (404, "Package not found"),
            _ => (500, "Processing error"),
        },
    };
    Response {
        message: message.to_string(),
        package: package.to_string(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgweb_errors::OpsError;

    fn client_err(err: ClientError) -> Result<String, Error> {
        Err(err.into())
    }

    #[test]
    fn response_table() {
        let name = || "hello".to_string();
        let cases = [
            (Ok("1".to_string()), 202, "Accepted"),
            (client_err(ClientError::AlreadyInstalled { name: name() }), 200, "Installed"),
            (
                client_err(ClientError::OperationInProgress {
                    name: name(),
                    change_id: "1".to_string(),
                }),
                400,
                "Operation in progress",
            ),
            (client_err(ClientError::PackageNotFound { name: name() }), 404, "Package not found"),
            (client_err(ClientError::NotActive { name: name() }), 500, "Processing error"),
            (Err(OpsError::NoPackageSpecified.into()), 500, "Processing error"),
        ];
        for (result, status, message) in cases {
            let response = respond("hello", &result);
            assert_eq!(response.status, status);
            assert_eq!(response.message, message);
        }
    }

    #[test]
    fn status_is_not_serialized() {
        let response = respond::<()>("hello", &Ok(()));
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"message":"Accepted","package":"hello"}"#);
    }
}
