use thiserror::Error;

/// Input rejected on the client before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Message cannot be empty!")]
    EmptyMessage,

    #[error("Message cannot exceed {max} characters")]
    MessageTooLong { max: usize },

    #[error("Post cannot be empty!")]
    EmptyPost,

    #[error("You can only upload up to {max} images")]
    TooManyImages { max: usize },

    #[error("Comment cannot be empty!")]
    EmptyComment,

    #[error("Report message cannot be empty!")]
    EmptyReport,

    #[error("{0} is required")]
    MissingField(&'static str),
}
