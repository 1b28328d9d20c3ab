//! # UrbanRoot Auth Crate
//!
//! Client-side signup and login flow for the UrbanRoot app: credential
//! validation, the `Details -> AwaitingCode -> Completed` session state
//! machine, role resolution against the demo accounts, and the notifications
//! the Shell shows as toasts.
//!
//! ## Architecture
//!
//! - **credentials / validation**: form fields and the pure validator
//! - **session**: synchronous state machine with begin/complete submissions
//! - **transport**: the simulated round trip between begin and complete
//! - **flow**: async driver tying a session to a transport
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use urbanroot_auth::{EnrollmentFlow, Field, FlowMode, SimulatedTransport};
//!
//! # async fn run() -> Result<(), urbanroot_auth::FlowError> {
//! let mut flow = EnrollmentFlow::start(FlowMode::Login, Arc::new(SimulatedTransport::default()));
//! flow.set_field(Field::Email, "user@urbanroot.com")?;
//! flow.set_field(Field::Password, "password123")?;
//! let notification = flow.submit_details().await?;
//! println!("{}", notification.message());
//! # Ok(())
//! # }
//! ```

pub mod code;
pub mod credentials;
pub mod error;
pub mod flow;
pub mod notification;
pub mod role;
pub mod session;
pub mod transport;
pub mod validation;

pub use code::{VerificationCode, CODE_LENGTH};
pub use credentials::{Credentials, Field, FlowMode};
pub use error::{FlowError, FlowResult, TransportError};
pub use flow::EnrollmentFlow;
pub use notification::{Notification, Severity};
pub use role::{resolve_role, DemoAccount, Identity, Role, DEMO_ACCOUNTS, DEMO_ADMIN, DEMO_USER};
pub use session::{EnrollmentSession, PendingCall, Step, Submission};
pub use transport::{Request, SimulatedTransport, Transport, DEFAULT_LATENCY};
pub use validation::{is_valid_email, phone_digits, validate, FieldErrors};
