pub mod apisix;
mod common;
pub mod configuration;
pub mod httproutes;
pub mod resolver;
pub mod translation;

pub use common::ResourceKey;
pub use translation::{HTTPRouteTranslator, TranslationContext, TranslationError, TranslationWarning};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
