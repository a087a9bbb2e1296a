//! Translation provider adapters implementing `TranslationService`.

mod dto;
mod http_translation_service;
mod unconfigured;

pub use http_translation_service::{HttpTranslationBuildError, HttpTranslationService};
pub use unconfigured::UnconfiguredTranslationService;
