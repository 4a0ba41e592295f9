//! Env-driven configuration for the service and library.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Defaults are provided for convenience during development.
//! `OPENAI_API_KEY` is the one required secret and has no default.
use dotenv;
use std::env;

pub struct Config {
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub api_host: String,
    pub api_port: String,
    pub proxy_url: String,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }
    pub fn new() -> Result<Self, env::VarError> {
        Ok(Config {
            openai_api_key: env::var("OPENAI_API_KEY")?,
            openai_api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/images/edits".to_string()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            api_port: env::var("API_PORT").unwrap_or_else(|_| "3000".to_string()),
            proxy_url: env::var("PROXY_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string()),
        })
    }
    pub fn print_env_vars() {
        // Never echo the secret itself.
        println!(
            "OPENAI_API_KEY: {}",
            if env::var("OPENAI_API_KEY").is_ok() { "<set>" } else { "<unset>" }
        );
        println!("OPENAI_API_URL: {}", env::var("OPENAI_API_URL").unwrap_or_else(|_| "<unset>".to_string()));
        println!("API_HOST: {}", env::var("API_HOST").unwrap_or_else(|_| "<unset>".to_string()));
        println!("API_PORT: {}", env::var("API_PORT").unwrap_or_else(|_| "<unset>".to_string()));
        println!("PROXY_URL: {}", env::var("PROXY_URL").unwrap_or_else(|_| "<unset>".to_string()));
    }
}
