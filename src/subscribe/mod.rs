//! Newsletter subscription: the HTTP collaborator and the form's status
//! lifecycle.

pub mod api;
pub mod controller;
pub mod error;

pub use api::{HttpSubscribeApi, SubscribeApi, SubscribeRequest};
pub use controller::{SubmissionController, SubmitOutcome, SubmitStatus};
pub use error::SubmitError;
