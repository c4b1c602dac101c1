use serde::Deserialize;

/// Kind of catalog entry, as reported by the catalog's `category` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    MainGame,
    Dlc,
    Expansion,
    Bundle,
    StandaloneExpansion,
}

impl Category {
    /// Map a wire code to a category. Unknown codes yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::MainGame),
            1 => Some(Self::Dlc),
            2 => Some(Self::Expansion),
            3 => Some(Self::Bundle),
            4 => Some(Self::StandaloneExpansion),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::MainGame => 0,
            Self::Dlc => 1,
            Self::Expansion => 2,
            Self::Bundle => 3,
            Self::StandaloneExpansion => 4,
        }
    }

    /// Add-on content that never belongs in a game listing.
    pub fn is_add_on(&self) -> bool {
        matches!(self, Self::Dlc | Self::Bundle)
    }
}

/// One game entry as returned by the catalog API.
///
/// Every field except `id` may be missing from a payload. A payload that
/// carries an `error` (or `status`) member instead of game data is kept so
/// the classifier can drop it as malformed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<u8>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u64>,
    #[serde(default)]
    pub genres: Option<Vec<u32>>,
    #[serde(default)]
    pub platforms: Option<Vec<u32>>,
    /// Milliseconds since the Unix epoch.
    #[serde(default, rename = "first_release_date")]
    pub release_date: Option<i64>,
    #[serde(default)]
    pub error: Option<serde::de::IgnoredAny>,
    #[serde(default)]
    pub status: Option<serde::de::IgnoredAny>,
}

impl CatalogRecord {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category.code());
        self
    }

    pub fn with_rating(mut self, rating: f64, count: u64) -> Self {
        self.rating = Some(rating);
        self.rating_count = Some(count);
        self
    }

    pub fn with_genres(mut self, genres: &[u32]) -> Self {
        self.genres = Some(genres.to_vec());
        self
    }

    pub fn with_platforms(mut self, platforms: &[u32]) -> Self {
        self.platforms = Some(platforms.to_vec());
        self
    }

    pub fn with_release_date(mut self, millis: i64) -> Self {
        self.release_date = Some(millis);
        self
    }

    /// Decoded category, if present and known.
    pub fn kind(&self) -> Option<Category> {
        self.category.and_then(Category::from_code)
    }

    /// True when the payload is an API error object rather than a game.
    pub fn is_malformed(&self) -> bool {
        self.error.is_some() || self.status.is_some()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
