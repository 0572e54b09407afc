//! Service traits for the remote backend
//!
//! The application talks to the backend only through these traits, so the
//! whole workflow can run against [`crate::ApiClient`] or a stub.

use phishguard_core::prelude::*;
use phishguard_core::{AuthMode, ScanOutcome};

use crate::protocol::AuthSuccess;

/// Remote URL classifier
#[trait_variant::make(Classifier: Send)]
pub trait LocalClassifier {
    /// Submit one URL for classification. Exactly one attempt is made.
    async fn classify(&self, url: &str) -> Result<ScanOutcome>;
}

/// Account endpoints: login, registration, profile update
#[trait_variant::make(AccountService: Send)]
pub trait LocalAccountService {
    async fn authenticate(&self, mode: AuthMode, email: &str, password: &str)
        -> Result<AuthSuccess>;

    /// Only the HTTP status is checked; the body is ignored.
    async fn update_profile(&self, email: &str, name: &str, photo: &str) -> Result<()>;
}

/// Everything the application needs from the backend
pub trait Backend: Classifier + AccountService + Send + Sync + 'static {}

impl<T> Backend for T where T: Classifier + AccountService + Send + Sync + 'static {}
