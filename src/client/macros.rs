/// Serves a query from the `QueryCache` or runs it and caches the result.
///
/// # Arguments
/// * `$cache`: a `QueryCache` (anything with `get`, `generation` and `set_if_fresh`).
/// * `$key`: the `QueryKey` to read and fill.
/// * `$block`: a future producing `Result<T, E>`, only awaited on a cache miss.
///
/// The result is returned either way, but it is cached only if `$key` was not
/// invalidated while the future ran.
///
/// # Example
/// ```rust,ignore
/// let favorites: Vec<Favorite> = cached_query!(cache, QueryKey::Favorites, async move {
///     backend.get_favorites().await
/// })?;
/// ```
#[macro_export]
macro_rules! cached_query {
    ($cache:expr, $key:expr, $block:expr) => {{
        if let Some(cached) = $cache.get(&$key) {
            Ok(cached)
        } else {
            let since = $cache.generation();
            let value = $block.await?;
            $cache.set_if_fresh(&$key, &value, since);
            Ok(value)
        }
    }};
}
