//! Response envelopes.
//!
//! Every body the API writes is either a [`SuccessResponse`] or an [`ErrorResponse`], both
//! stamped with the id this process drew at start-up.

use std::sync::LazyLock;

use salvo::{
    http::ResBody,
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static SERVICE_ID: LazyLock<Uuid> = LazyLock::new(Uuid::new_v4);

/// Identifies this server process in every response.
pub(crate) fn service_id() -> Uuid {
    *SERVICE_ID
}

/// Successful response envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SuccessResponse<T> {
    pub service_id: Uuid,
    pub code: u16,
    pub status: String,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub(crate) fn ok(data: T) -> Json<Self> {
        Json(Self {
            service_id: service_id(),
            code: StatusCode::OK.as_u16(),
            status: "OK".to_string(),
            data,
        })
    }
}

/// Failed response envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    pub service_id: Uuid,
    pub code: u16,
    pub status: String,
    pub errors: Vec<String>,
}

/// An error rendered as an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    status: StatusCode,
    errors: Vec<String>,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, errors: Vec<String>) -> Self {
        Self { status, errors }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, vec![message.into()])
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, vec![message.into()])
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, vec![message.into()])
    }

    pub(crate) fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            vec!["internal server error".to_string()],
        )
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }
}

/// Machine-readable status label for an error code.
pub(crate) fn error_status(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "ERR_BAD_REQUEST",
        StatusCode::NOT_FOUND => "ERR_NOT_FOUND",
        StatusCode::CONFLICT => "ERR_CONFLICT",
        StatusCode::METHOD_NOT_ALLOWED => "ERR_METHOD_NOT_ALLOWED",
        status if status.is_client_error() => "ERR_CLIENT",
        _ => "ERR_INTERNAL_SERVER",
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorResponse {
            service_id: service_id(),
            code: self.status.as_u16(),
            status: error_status(self.status).to_string(),
            errors: self.errors,
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::CONFLICT, "Conflict"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description).add_content(
                    "application/json",
                    oapi::Content::new(ErrorResponse::to_schema(components)),
                ),
            );
        }
    }
}

/// Catcher hoop wrapping bare status errors (unknown routes, unparsable bodies) in the envelope.
#[handler]
pub(crate) async fn envelope_status_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res.status_code.unwrap_or(StatusCode::NOT_FOUND);

    if !status.is_client_error() && !status.is_server_error() {
        return;
    }

    let message = match &res.body {
        ResBody::Error(error) => error.brief.clone(),
        ResBody::None => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        _ => {
            ctrl.skip_rest();

            return;
        }
    };

    ApiError::new(status, vec![message]).render(res);

    ctrl.skip_rest();
}
