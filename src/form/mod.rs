//! Client side of the contact form.
//!
//! [`ContactForm`] holds the three inputs and the submission state, using the
//! same validators as the server. It talks to the server through a
//! [`SubmitGateway`]; [`HttpGateway`] is the HTTP implementation.

mod controller;
mod field;
mod gateway;

pub use controller::{
    ContactForm, FormStatus, INVALID_FORM_NOTICE, SUCCESS_DISPLAY, SUCCESS_NOTICE,
};
pub use field::{Field, FieldState};
pub use gateway::{
    GatewayError, HEALTH_PATH, HttpGateway, SEND_EMAIL_PATH, SubmitGateway, SubmitOutcome,
    interpret_response,
};

#[cfg(test)]
pub use gateway::MockSubmitGateway;
