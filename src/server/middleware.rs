// HTTP middleware
// Author: kelexine (https://github.com/kelexine)

use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Settings forms are small; anything larger is not a form submission.
const MAX_FORM_BYTES: usize = 64 * 1024;

/// Create request ID layers for the application
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestUuid),
        PropagateRequestIdLayer::x_request_id(),
    )
}

/// Caps the size of submitted settings forms.
pub fn form_body_limit() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_FORM_BYTES)
}
