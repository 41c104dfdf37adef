#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl ParseError {
    pub(crate) fn no_track() -> Self {
        ParseError::MalformedInput("no track found".to_string())
    }

    pub(crate) fn too_few_points(found: usize) -> Self {
        ParseError::MalformedInput(format!(
            "at least 2 track points required (found {})",
            found
        ))
    }

    pub(crate) fn invalid_xml(err: impl std::fmt::Display) -> Self {
        ParseError::MalformedInput(format!("invalid XML: {}", err))
    }
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        ParseError::invalid_xml(err)
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ParseError::invalid_xml(err)
    }
}
