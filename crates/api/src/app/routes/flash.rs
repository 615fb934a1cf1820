//! Form submissions and flash-message redirects shared by the booking pages.

use axum::{
    Form,
    extract::rejection::FormRejection,
    response::{IntoResponse, Redirect, Response},
};

use triad_fyyur::FormFields;

/// `303 See Other` to `path`, carrying `message` as `?flash=`.
pub fn redirect_with_flash(path: &str, message: &str) -> Response {
    let location = match serde_urlencoded::to_string([("flash", message)]) {
        Ok(query) => format!("{path}?{query}"),
        Err(e) => {
            tracing::warn!(cause = %e, "flash message not encodable");
            path.to_string()
        }
    };
    Redirect::to(&location).into_response()
}

/// Decoded form pairs; an unreadable body counts as an empty form so the
/// draft validation reports it.
pub fn form_fields(form: Result<Form<Vec<(String, String)>>, FormRejection>) -> FormFields {
    match form {
        Ok(Form(pairs)) => FormFields::new(pairs),
        Err(e) => {
            tracing::warn!(cause = %e, "unreadable form submission");
            FormFields::default()
        }
    }
}
