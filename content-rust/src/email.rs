use crate::{client_utils, ContentError, ContentResult, RelayConfig};
use reqwest::{header::HeaderMap, Client};
use serde::Serialize;

/// One submission of the contact form.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A validation failure on a single form field, suitable for inline display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl ContactForm {
    /// Field-level validation performed before any network call. Returns
    /// every failing field so the caller can render inline messages.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                errors.push(FieldError {
                    field,
                    message: "This field is required".to_string(),
                });
            }
        }
        if !self.email.trim().is_empty() && !is_valid_email(self.email.trim()) {
            errors.push(FieldError {
                field: "email",
                message: "Enter a valid email address".to_string(),
            });
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Structural check: one `@`, non-empty local part, dot-separated domain.
fn is_valid_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || raw.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

#[derive(Debug, Clone, Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactForm,
}

/// Client for an EmailJS-compatible transactional email relay.
pub struct EmailRelay {
    service_id: String,
    template_id: String,
    public_key: String,
    base_url: String,
    client: Client,
}

#[derive(Clone, Default)]
pub struct EmailRelayOptions {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub base_url: Option<String>,
    pub client: Option<Client>,
}

impl EmailRelay {
    #[must_use]
    pub fn new(options: EmailRelayOptions) -> Self {
        let EmailRelayOptions {
            service_id,
            template_id,
            public_key,
            base_url,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://api.emailjs.com".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);

        Self {
            service_id,
            template_id,
            public_key,
            base_url,
            client,
        }
    }

    #[must_use]
    pub fn from_config(config: RelayConfig) -> Self {
        Self::new(EmailRelayOptions {
            service_id: config.service_id,
            template_id: config.template_id,
            public_key: config.public_key,
            ..Default::default()
        })
    }

    /// Validate and submit the form. Success reduces to `Ok(())`; the caller
    /// turns either outcome into a user-facing notice.
    pub async fn send(&self, form: &ContactForm) -> ContentResult<()> {
        if let Err(errors) = form.validate() {
            let fields: Vec<&str> = errors.iter().map(|error| error.field).collect();
            return Err(ContentError::InvalidInput(format!(
                "Contact form has invalid fields: {}",
                fields.join(", ")
            )));
        }
        let request = SendEmailRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: form,
        };
        client_utils::post_json_ok(
            &self.client,
            &format!("{}/api/v1.0/email/send", self.base_url),
            &request,
            HeaderMap::new(),
        )
        .await
    }
}
