//! [`Command`] definition.

pub mod add;
pub mod authenticate;
pub mod edit;
pub mod pay_invoice;
pub mod refresh;
pub mod reload;
pub mod remove;
pub mod submit_complaint;
pub mod submit_payment;
pub mod update_complaint_status;
pub mod verify_payment;

/// [`Command`] of the [`Store`].
///
/// [`Store`]: crate::Store
pub use common::Handler as Command;

pub use self::{
    add::Add, authenticate::Authenticate, edit::Edit, pay_invoice::PayInvoice,
    refresh::Refresh, reload::Reload, remove::Remove,
    submit_complaint::SubmitComplaint, submit_payment::SubmitPayment,
    update_complaint_status::UpdateComplaintStatus,
    verify_payment::VerifyPayment,
};
