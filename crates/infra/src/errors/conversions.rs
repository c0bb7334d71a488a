//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use convene_domain::ConveneError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ConveneError);

impl From<InfraError> for ConveneError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ConveneError> for InfraError {
    fn from(value: ConveneError) -> Self {
        InfraError(value)
    }
}

impl std::fmt::Display for InfraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoConveneError {
    fn into_convene(self) -> ConveneError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → ConveneError */
/* -------------------------------------------------------------------------- */

impl IntoConveneError for KeyringError {
    fn into_convene(self) -> ConveneError {
        use KeyringError::*;

        let description = self.to_string();

        match self {
            NoEntry => ConveneError::NotFound("keychain entry not found".into()),
            BadEncoding(_) => {
                ConveneError::Storage("credential in keychain is not valid UTF-8".into())
            }
            TooLong(name, limit) => ConveneError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            Invalid(attr, reason) => {
                ConveneError::Storage(format!("keychain attribute '{attr}' is invalid: {reason}"))
            }
            PlatformFailure(err) => ConveneError::Storage(format!("keychain platform error: {err}")),
            NoStorageAccess(err) => {
                ConveneError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => ConveneError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_convene())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ConveneError */
/* -------------------------------------------------------------------------- */

impl IntoConveneError for HttpError {
    fn into_convene(self) -> ConveneError {
        if self.is_timeout() {
            return ConveneError::Transient("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ConveneError::Transient("HTTP connection failure".into());
        }

        if self.is_builder() {
            return ConveneError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 => ConveneError::Authentication(message),
                403 => ConveneError::Forbidden(message),
                404 => ConveneError::NotFound(message),
                400..=499 => ConveneError::Validation(message),
                _ => ConveneError::Transient(message),
            };
        }

        ConveneError::Transient(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_convene())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error / serde_json::Error → ConveneError */
/* -------------------------------------------------------------------------- */

impl IntoConveneError for IoError {
    fn into_convene(self) -> ConveneError {
        match self.kind() {
            ErrorKind::NotFound => ConveneError::NotFound(self.to_string()),
            ErrorKind::PermissionDenied => {
                ConveneError::Storage(format!("permission denied: {self}"))
            }
            _ => ConveneError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_convene())
    }
}

impl IntoConveneError for JsonError {
    fn into_convene(self) -> ConveneError {
        ConveneError::Storage(format!("malformed JSON at line {}: {self}", self.line()))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_convene())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn keyring_no_entry_maps_to_not_found() {
        let mapped: ConveneError = InfraError::from(KeyringError::NoEntry).into();
        match mapped {
            ConveneError::NotFound(msg) => assert!(msg.contains("keychain")),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn io_errors_map_to_storage() {
        let denied = IoError::new(ErrorKind::PermissionDenied, "nope");
        let mapped: ConveneError = InfraError::from(denied).into();
        assert!(matches!(mapped, ConveneError::Storage(msg) if msg.contains("permission")));

        let missing = IoError::new(ErrorKind::NotFound, "gone");
        let mapped: ConveneError = InfraError::from(missing).into();
        assert!(matches!(mapped, ConveneError::NotFound(_)));
    }

    #[test]
    fn json_errors_map_to_storage() {
        let err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let mapped: ConveneError = InfraError::from(err).into();
        assert!(matches!(mapped, ConveneError::Storage(msg) if msg.contains("line 1")));
    }

    #[tokio::test]
    async fn http_status_403_maps_to_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::FORBIDDEN))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: ConveneError = InfraError::from(error).into();
        match mapped {
            ConveneError::Forbidden(msg) => assert!(msg.contains("403")),
            other => panic!("expected forbidden, got {:?}", other),
        }
    }
}
