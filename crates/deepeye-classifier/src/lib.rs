//! Streaming security-risk classifier client for Deepeye.
//!
//! This crate wraps the remote classification provider behind the
//! [`Classifier`] trait:
//! - `ClassificationRequest` - the prompt built per growth event
//! - `OpenRouterClassifier` - streaming OpenRouter chat-completions client
//! - `ClassifierConfig` - injected endpoint/model/credential configuration
//!
//! The monitor engine depends only on "submit request, receive a lazy
//! sequence of text chunks, obtain the final accumulated text or a failure".

pub mod client;
pub mod config;
pub mod error;
pub mod request;

pub use client::{Classifier, OpenRouterClassifier};
pub use config::{ClassifierConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL, OPENROUTER_API_KEY_ENV};
pub use error::{ClassifierError, Result};
pub use request::ClassificationRequest;
