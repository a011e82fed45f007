use xmlparser::TextPos;

/// An error reported by the event source while reading the input.
///
/// These are passed through the tree builder unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The tokenizer rejected the input.
    #[error(transparent)]
    Xml(#[from] xmlparser::Error),
    /// An entity reference without a closing `;`.
    #[error("unclosed entity `&{entity}` at {position}")]
    UnclosedEntity {
        /// The entity text seen so far
        entity: String,
        /// Where the text or attribute value containing it starts
        position: TextPos,
    },
    /// An entity reference that is neither predefined nor a character
    /// reference.
    #[error("invalid entity `&{entity};` at {position}")]
    InvalidEntity {
        /// The entity name
        entity: String,
        /// Where the text or attribute value containing it starts
        position: TextPos,
    },
    /// The input ended while this element was still open.
    #[error("element `{name}` opened at {position} is never closed")]
    UnclosedElement {
        /// Name of the element as written
        name: String,
        /// Position of the start tag
        position: TextPos,
    },
    /// An end tag that does not match the innermost open element.
    #[error("closing tag `</{found}>` at {position} does not match `<{expected}>`")]
    InvalidCloseTag {
        /// Name of the innermost open element
        expected: String,
        /// Name in the end tag
        found: String,
        /// Position of the end tag
        position: TextPos,
    },
    /// The input bytes are not valid in the detected encoding.
    #[error("input is not valid {encoding}")]
    MalformedEncoding {
        /// Name of the detected encoding
        encoding: &'static str,
    },
}

impl ParseError {
    /// The position in the input the error refers to, if known.
    pub fn position(&self) -> Option<TextPos> {
        match self {
            ParseError::Xml(e) => Some(e.pos()),
            ParseError::UnclosedEntity { position, .. }
            | ParseError::InvalidEntity { position, .. }
            | ParseError::UnclosedElement { position, .. }
            | ParseError::InvalidCloseTag { position, .. } => Some(*position),
            ParseError::MalformedEncoding { .. } => None,
        }
    }
}

/// The terminal failure of a parse.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input buffer was empty; nothing was parsed.
    #[error("no input data to parse")]
    EmptyInput,
    /// The document ended without any element.
    #[error("document has no root element")]
    NoRootElement,
    /// An element end arrived while no element was open.
    #[error("element end without matching element start")]
    UnbalancedEnd,
    /// A second top-level element started after the root element closed.
    #[error("second root element `{0}`")]
    MultipleRootElements(String),
    /// The event source reported an error.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// The underlying parse error, if this is one.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<xmlparser::Error> for Error {
    #[inline]
    fn from(e: xmlparser::Error) -> Self {
        Error::Parse(ParseError::Xml(e))
    }
}

/// Why a CDATA block was dropped. Never returned to callers; the builder
/// logs it and moves on.
#[derive(Debug, thiserror::Error)]
#[error("CDATA block is not valid UTF-8: {0}")]
pub(crate) struct InvalidCDataEncoding(#[from] pub(crate) std::str::Utf8Error);
