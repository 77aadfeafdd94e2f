// * Environment configuration with warn-and-default parsing.

use std::{borrow::Cow, collections::HashMap};
// * anyhow for convenient error handling
use anyhow::{Context, Result};
use tracing::warn;

// ! Default values for environment variables (used if variables aren't set):
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_MAX_BODY_SIZE: usize = 2_097_152; // 2MB
// Local Supabase stack, so a bare `cargo run` talks to `supabase start`
const DEFAULT_SUPABASE_URL: &str = "http://localhost:54321";

// * A struct containing all environment variables used by the app
#[derive(Clone, Debug)]
pub struct EnvironmentVariables {
    pub environment: Cow<'static, str>,
    pub host: Cow<'static, str>,
    pub port: u16,
    pub static_dir: Cow<'static, str>,
    pub max_request_body_size: usize,
    pub supabase_url: Cow<'static, str>,
    pub supabase_key: Cow<'static, str>,
}

impl EnvironmentVariables {
    // * Loads environment variables once.
    // * Only reads .env if ENVIRONMENT != "production".
    pub fn load() -> Result<Self> {
        // ? In non-production environments, attempt to load .env
        if std::env::var("ENVIRONMENT").unwrap_or_default() != "production" {
            dotenv::dotenv().ok();
        }

        // * Collect all environment vars from the system and .env
        let vars: HashMap<String, String> = std::env::vars()
            .chain(dotenv::vars())
            .collect();

        // * A small helper closure to fetch a variable by key
        let get_var = |key: &str| vars.get(key).map(String::as_str);

        // * Build our EnvironmentVariables, providing defaults if missing
        Ok(Self {
            environment: get_var("ENVIRONMENT")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or_else(|| {
                    warn!("Missing ENVIRONMENT, defaulting to '{DEFAULT_ENVIRONMENT}'");
                    Cow::Borrowed(DEFAULT_ENVIRONMENT)
                }),

            host: get_var("HOST")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_HOST)),

            port: get_var("PORT")
                .map(|s| s.parse().context("Invalid PORT value"))
                .transpose()?
                .unwrap_or(DEFAULT_PORT),

            static_dir: get_var("STATIC_DIR")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_STATIC_DIR)),

            max_request_body_size: get_var("MAX_REQUEST_BODY_SIZE")
                .map(|s| s.parse().context("Invalid MAX_REQUEST_BODY_SIZE"))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_BODY_SIZE),

            supabase_url: get_var("SUPABASE_URL")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or_else(|| {
                    warn!("Missing SUPABASE_URL, defaulting to '{DEFAULT_SUPABASE_URL}'");
                    Cow::Borrowed(DEFAULT_SUPABASE_URL)
                }),

            supabase_key: get_var("SUPABASE_KEY")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or_else(|| {
                    warn!("Missing SUPABASE_KEY, store requests will be anonymous");
                    Cow::Borrowed("")
                }),
        })
    }
}
