//! Form-based login
//!
//! The login page is fetched, its form defaults (hidden tokens included) are
//! kept, the credentials are filled in, and the form is posted back. The
//! session's cookie jar carries the result into every later request.

use crate::crawler::document::Document;
use crate::crawler::fetcher::PageFetcher;
use crate::model::Credentials;
use crate::Result;

/// Form field receiving the username
pub const USERNAME_FIELD: &str = "username";

/// Form field receiving the password
pub const PASSWORD_FIELD: &str = "password";

/// URL of a forum's login page
pub fn login_url(fetcher: &PageFetcher<'_>, forum_id: &str) -> String {
    fetcher.site_url(&format!("/forum/{}/login", forum_id))
}

/// Logs into a forum
///
/// # Returns
///
/// * `Ok(true)` - The login form was accepted
/// * `Ok(false)` - The forum answered with an error status, or the login
///   page had no form
/// * `Err(ForumError)` - Network failure
pub async fn login(
    fetcher: &PageFetcher<'_>,
    forum_id: &str,
    credentials: &Credentials,
) -> Result<bool> {
    let url = login_url(fetcher, forum_id);
    let page = fetcher.fetch(&url).await?;

    let Some(action) = page.form_action() else {
        tracing::warn!("No login form found on {}", url);
        return Ok(false);
    };

    let fields = login_fields(&page, credentials);
    let accepted = fetcher.submit_form(&action, &fields).await?;

    if accepted {
        tracing::info!("Logged into forum {} as {}", forum_id, credentials.username);
    } else {
        tracing::warn!(
            "Login to forum {} as {} was rejected",
            forum_id,
            credentials.username
        );
    }

    Ok(accepted)
}

/// Form fields to submit: page defaults with the credentials filled in
///
/// A name occurring twice keeps its first position and its last value.
pub fn login_fields(page: &Document, credentials: &Credentials) -> Vec<(String, String)> {
    let mut fields = Vec::new();

    for (name, value) in page.input_defaults() {
        set_field(&mut fields, &name, &value);
    }

    set_field(&mut fields, USERNAME_FIELD, &credentials.username);
    set_field(&mut fields, PASSWORD_FIELD, &credentials.password);

    fields
}

fn set_field(fields: &mut Vec<(String, String)>, name: &str, value: &str) {
    match fields.iter_mut().find(|(existing, _)| existing == name) {
        Some((_, existing)) => *existing = value.to_string(),
        None => fields.push((name.to_string(), value.to_string())),
    }
}
