pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// A `(heading, name)` pair that does not spell an object or object-array descriptor.
    #[error("invalid descriptor heading {heading:?} for class name {name:?}")]
    InvalidHeading { heading: String, name: String },
}
