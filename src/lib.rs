//! Account service - user registration, password login and session tokens.
//!
//! The core is [`CredentialService`]: salted Argon2id password hashing,
//! constant-time verification and stateless HS256 session tokens over an
//! injected [`UserStore`]. The `web` module exposes it over HTTP.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    decode_secret, generate_salt, CredentialCodec, CredentialError, CredentialService,
    EnvSecretProvider, SecretProvider, SessionClaims, StaticSecretProvider, TokenError,
    TokenIssuer,
};
pub use config::Config;
pub use db::{Database, InMemoryUserStore, StoreError, UserRecord, UserRepository, UserStore};
pub use error::{AccountError, Result};
pub use web::WebServer;
