use std::env;

/// Credentials for the content delivery API, sourced from the environment.
///
/// `CONTENTFUL_SPACE_ID`, `CONTENTFUL_ACCESS_TOKEN`, and the optional
/// `CONTENTFUL_ENVIRONMENT` (defaults to `master`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    pub space_id: String,
    pub access_token: String,
    pub environment: String,
}

impl DeliveryConfig {
    /// Read the delivery credentials. Missing credentials are a diagnosed
    /// degradation, not a crash: the caller disables content features.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let space_id = non_empty_var("CONTENTFUL_SPACE_ID");
        let access_token = non_empty_var("CONTENTFUL_ACCESS_TOKEN");
        let environment =
            non_empty_var("CONTENTFUL_ENVIRONMENT").unwrap_or_else(|| "master".to_string());

        match (space_id, access_token) {
            (Some(space_id), Some(access_token)) => Some(Self {
                space_id,
                access_token,
                environment,
            }),
            (space_id, _) => {
                let missing = if space_id.is_none() {
                    "CONTENTFUL_SPACE_ID"
                } else {
                    "CONTENTFUL_ACCESS_TOKEN"
                };
                tracing::warn!(missing, "content delivery credentials absent; content features disabled");
                None
            }
        }
    }
}

/// Identifiers for the transactional email relay, sourced from the
/// environment: `EMAILJS_SERVICE_ID`, `EMAILJS_TEMPLATE_ID`,
/// `EMAILJS_PUBLIC_KEY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl RelayConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let service_id = non_empty_var("EMAILJS_SERVICE_ID");
        let template_id = non_empty_var("EMAILJS_TEMPLATE_ID");
        let public_key = non_empty_var("EMAILJS_PUBLIC_KEY");

        match (service_id, template_id, public_key) {
            (Some(service_id), Some(template_id), Some(public_key)) => Some(Self {
                service_id,
                template_id,
                public_key,
            }),
            _ => {
                tracing::warn!("email relay identifiers absent; contact form disabled");
                None
            }
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
