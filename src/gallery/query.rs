use std::fmt;

/// Sort order understood by the list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Random,
    Newest,
    Oldest,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Random, SortMode::Newest, SortMode::Oldest];

    /// Value of the `sort_by` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            SortMode::Random => "random",
            SortMode::Newest => "desc",
            SortMode::Oldest => "asc",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_param() == value)
    }

    pub fn next(self) -> Self {
        match self {
            SortMode::Random => SortMode::Newest,
            SortMode::Newest => SortMode::Oldest,
            SortMode::Oldest => SortMode::Random,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortMode::Random => "Random",
            SortMode::Newest => "Newest",
            SortMode::Oldest => "Oldest",
        };
        f.write_str(label)
    }
}

/// Platform filter understood by the list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlatformFilter {
    #[default]
    All,
    NovelAi,
    StableDiffusion,
    /// Images without a recognised platform
    Untagged,
}

impl PlatformFilter {
    pub const ALL: [PlatformFilter; 4] = [
        PlatformFilter::All,
        PlatformFilter::NovelAi,
        PlatformFilter::StableDiffusion,
        PlatformFilter::Untagged,
    ];

    /// Value of the `platform_filter` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            PlatformFilter::All => "all",
            PlatformFilter::NovelAi => "NovelAI",
            PlatformFilter::StableDiffusion => "StableDiffusion",
            PlatformFilter::Untagged => "none",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_param().eq_ignore_ascii_case(value))
    }

    pub fn next(self) -> Self {
        match self {
            PlatformFilter::All => PlatformFilter::NovelAi,
            PlatformFilter::NovelAi => PlatformFilter::StableDiffusion,
            PlatformFilter::StableDiffusion => PlatformFilter::Untagged,
            PlatformFilter::Untagged => PlatformFilter::All,
        }
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlatformFilter::All => "All platforms",
            PlatformFilter::NovelAi => "NovelAI",
            PlatformFilter::StableDiffusion => "StableDiffusion",
            PlatformFilter::Untagged => "Untagged",
        };
        f.write_str(label)
    }
}

/// Search criteria for a list request. Changing any field restarts from page 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub sort: SortMode,
    pub platform: PlatformFilter,
}

impl Query {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_platform(mut self, platform: PlatformFilter) -> Self {
        self.platform = platform;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_server_defaults() {
        let q = Query::default();
        assert_eq!(q.sort.as_param(), "random");
        assert_eq!(q.platform.as_param(), "all");
        assert!(q.text.is_empty());
    }

    #[test]
    fn sort_cycles_through_all_modes() {
        let mut mode = SortMode::Random;
        for _ in 0..SortMode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, SortMode::Random);
    }

    #[test]
    fn params_round_trip() {
        for mode in SortMode::ALL {
            assert_eq!(SortMode::from_param(mode.as_param()), Some(mode));
        }
        assert_eq!(PlatformFilter::from_param("novelai"), Some(PlatformFilter::NovelAi));
        assert_eq!(PlatformFilter::from_param("none"), Some(PlatformFilter::Untagged));
        assert_eq!(PlatformFilter::from_param("midjourney"), None);
    }
}
