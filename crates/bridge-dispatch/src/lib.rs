//! Request dispatching for the Alexa HA bridge.
//!
//! The dispatcher validates an incoming Alexa Smart Home directive envelope,
//! resolves the bearer credential from the recognized scope locations, and
//! forwards the envelope unchanged to Home Assistant's
//! `/api/alexa/smart_home` endpoint over the client supplied by the
//! transport layer. The backend owns the directive semantics; this crate is
//! a transparent pass-through with an explicit error taxonomy.

mod dispatcher;
mod error;
mod scope;

pub use dispatcher::{message_id, DirectiveDispatcher, SMART_HOME_PATH};
pub use error::{DispatchError, DispatchResult};
