//! HTTP verbs and where each one carries input fields.

use strum::{Display, EnumIter, EnumString};

/// Where the non-path input fields of a request travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPlacement {
    /// Encoded into the URL query string.
    Query,
    /// Sent as a JSON object body.
    Body,
}

/// The verb an operation is routed with.
///
/// ```rust
/// use opkit::{FieldPlacement, RestMethod};
///
/// assert_eq!(RestMethod::Get.field_placement(), FieldPlacement::Query);
/// assert_eq!(RestMethod::Delete.field_placement(), FieldPlacement::Body);
/// assert_eq!("PATCH".parse::<RestMethod>().unwrap(), RestMethod::Patch);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RestMethod {
    /// Returns where remaining input fields are placed.
    pub fn field_placement(self) -> FieldPlacement {
        match self {
            Self::Get => FieldPlacement::Query,
            Self::Post | Self::Put | Self::Patch | Self::Delete => FieldPlacement::Body,
        }
    }

    /// Returns the matching `reqwest` method.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
