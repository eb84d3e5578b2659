#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Development,
    Staging,
    Production,
}

impl Profile {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "staging" | "stage" => Some(Self::Staging),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileDefaults {
    pub server_port: u16,
    pub stripe_api_base: String,
    pub account_link_refresh_url: String,
    pub account_link_return_url: String,
    pub cors_allowed_origins: Option<String>,
}

impl ProfileDefaults {
    pub fn for_profile(profile: Profile) -> Self {
        let stripe_api_base = "https://api.stripe.com".to_string();
        match profile {
            Profile::Development => Self {
                server_port: 3000,
                stripe_api_base,
                account_link_refresh_url: "http://localhost:3000/reauth".to_string(),
                account_link_return_url: "http://localhost:3000/return".to_string(),
                cors_allowed_origins: None,
            },
            Profile::Staging => Self {
                server_port: 8080,
                stripe_api_base,
                account_link_refresh_url: "https://staging.example.com/reauth".to_string(),
                account_link_return_url: "https://staging.example.com/return".to_string(),
                cors_allowed_origins: None,
            },
            Profile::Production => Self {
                server_port: 8080,
                stripe_api_base,
                account_link_refresh_url: "https://app.example.com/reauth".to_string(),
                account_link_return_url: "https://app.example.com/return".to_string(),
                cors_allowed_origins: None,
            },
        }
    }
}
