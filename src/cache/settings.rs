/// Settings for the cache.
///
/// The `cache_*` toggles are read once, when the [`Cache`] is created. Disabled maps never store
/// anything and every lookup into them misses.
///
/// # Examples
///
/// Create new settings, specifying the maximum number of messages:
///
/// ```rust
/// use accord::cache::Settings as CacheSettings;
///
/// let mut settings = CacheSettings::default();
/// settings.max_messages = 10;
/// ```
///
/// [`Cache`]: super::Cache
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Settings {
    /// The maximum number of messages to store in a channel's message cache. Once the limit is
    /// reached, the oldest message of the channel is evicted.
    ///
    /// Defaults to 0.
    pub max_messages: usize,
    /// Whether to cache guild data received from gateway.
    ///
    /// Defaults to true.
    pub cache_guilds: bool,
    /// Whether to cache channel data received from gateway.
    ///
    /// Defaults to true.
    pub cache_channels: bool,
    /// Whether to cache user data received from gateway.
    ///
    /// Defaults to true.
    pub cache_users: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_messages: 0,
            cache_guilds: true,
            cache_channels: true,
            cache_users: true,
        }
    }
}
