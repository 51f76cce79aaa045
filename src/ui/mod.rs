//! Form and UI feedback: input validation, the in-memory page the handlers render into,
//! toasts, navigation, and the mapping from request failures to user-facing messages.
//! Nothing here persists state; every operation is a single render or check.

mod feedback;
mod format;
mod navigation;
mod page;
mod toast;
mod validation;

pub use feedback::{
    Feedback, FeedbackAction, UnauthorizedPolicy, ACCESS_DENIED_MESSAGE, GENERIC_ERROR_MESSAGE,
    NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE, UNAUTHORIZED_MESSAGE, UNAUTHORIZED_REDIRECT_DELAY,
};
pub use format::{format_date, format_time};
pub use navigation::{History, Navigator};
pub use page::{Alert, AlertKind, Field, Form, Page, SubmitButton, ALERT_LIFETIME};
pub use toast::{
    Notifier, Toast, ToastContainer, ToastPhase, DEFAULT_TOAST_DURATION, TOAST_EXIT_ANIMATION,
};
pub use validation::{
    is_valid_email, is_valid_phone, validate_password, PasswordCheck, MIN_PASSWORD_LENGTH,
    MIN_PHONE_DIGITS,
};
