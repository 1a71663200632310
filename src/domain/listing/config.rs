use super::filtering::FilterDefinition;
use super::paging::{DEFAULT_LIMIT, DEFAULT_MAX_ALLOWED_LIMIT, DEFAULT_OFFSET};
use super::sorting::SortOption;

/// Per-route listing configuration
///
/// Built once when the route is registered and shared read-only across
/// every request to that route. No semantic validation happens here;
/// the resolvers validate each request against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    pub default_limit: usize,
    pub default_offset: usize,
    pub max_allowed_limit: usize,
    pub declared_sorts: Vec<SortOption>,
    pub declared_filters: Vec<FilterDefinition>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            default_offset: DEFAULT_OFFSET,
            max_allowed_limit: DEFAULT_MAX_ALLOWED_LIMIT,
            declared_sorts: Vec::new(),
            declared_filters: Vec::new(),
        }
    }
}

impl ListingConfig {
    /// Starts a builder from the default configuration.
    ///
    /// # Example
    /// ```
    /// use bastion_api::domain::listing::{ListingConfig, SortOption};
    ///
    /// let cfg = ListingConfig::builder()
    ///     .limit(50)
    ///     .sort([SortOption::new("created_at_desc", "Created date descending")])
    ///     .sort([SortOption::new("created_at_asc", "Created date ascendant")])
    ///     .build();
    ///
    /// assert_eq!(cfg.default_limit, 50);
    /// assert_eq!(cfg.declared_sorts[0].id, "created_at_desc");
    /// ```
    pub fn builder() -> ListingConfigBuilder {
        ListingConfigBuilder::default()
    }
}

/// Applies configuration options in call order
///
/// Scalar options overwrite earlier calls. `sort` and `filter` append, so
/// the first sort ever declared stays the default selection.
#[derive(Debug, Clone, Default)]
pub struct ListingConfigBuilder {
    config: ListingConfig,
}

impl ListingConfigBuilder {
    /// Overrides the limit used when the request has none.
    pub fn limit(mut self, limit: usize) -> Self {
        self.config.default_limit = limit;
        self
    }

    /// Overrides the offset used when the request has none.
    pub fn offset(mut self, offset: usize) -> Self {
        self.config.default_offset = offset;
        self
    }

    /// Overrides the ceiling requested limits may reach.
    pub fn max_allowed_limit(mut self, max: usize) -> Self {
        self.config.max_allowed_limit = max;
        self
    }

    pub fn sort(mut self, options: impl IntoIterator<Item = SortOption>) -> Self {
        self.config.declared_sorts.extend(options);
        self
    }

    pub fn filter(mut self, filters: impl IntoIterator<Item = FilterDefinition>) -> Self {
        self.config.declared_filters.extend(filters);
        self
    }

    pub fn build(self) -> ListingConfig {
        self.config
    }
}
