use thiserror::Error;

/// Shown when a fetch failure carries no message of its own.
pub const GENERIC_FETCH_MESSAGE: &str =
    "Something went wrong while fetching suggestions. Please check your answers and try again.";

#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("request failed: {0}")] Http(#[from] reqwest::Error),
    #[error("{message}")] Provider { status: u16, message: String },
    #[error("the model returned an empty response")] EmptyResponse,
    #[error("could not decode suggestions: {0}")] Decode(String),
    #[error("The AI response came back in an unexpected format.")] UnexpectedFormat { detail: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field: {0}")] UnknownField(String),
    #[error("'{value}' is not a valid choice for {field}")] NotInCatalog { field: &'static str, value: String },
    #[error("budget must be a whole number, got '{0}'")] InvalidBudget(String),
}

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("cannot read image {path}: {source}")] Read { path: String, source: std::io::Error },
    #[error("{0} does not look like an image file")] NotAnImage(String),
}
