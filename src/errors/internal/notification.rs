use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Failed to send email: {message}")]
    DispatchFailed { recipient: String, message: String },
}
