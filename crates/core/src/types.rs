/// Kind of title the provider is asked about; also the first path segment
/// of the provider's per-title endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaType {
    type Err = UnknownMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            other => Err(UnknownMediaType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown media type: {0}")]
pub struct UnknownMediaType(pub String);

/// A single lookup request. The id is passed to the provider verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TitleQuery {
    pub media_type: MediaType,
    pub id: String,
}

impl TitleQuery {
    pub fn new(media_type: MediaType, id: impl Into<String>) -> Self {
        Self {
            media_type,
            id: id.into(),
        }
    }

    /// Build a query from raw path segments.
    pub fn parse(media_type: &str, id: &str) -> Result<Self, UnknownMediaType> {
        Ok(Self::new(media_type.parse()?, id))
    }
}

impl std::fmt::Display for TitleQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.media_type, self.id)
    }
}

/// Poster size segment understood by the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W185,
    W342,
    W500,
    W780,
    Original,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::W185 => "w185",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w185" => Ok(Self::W185),
            "w342" => Ok(Self::W342),
            "w500" => Ok(Self::W500),
            "w780" => Ok(Self::W780),
            "original" => Ok(Self::Original),
            other => Err(format!("unknown image size: {other}")),
        }
    }
}
