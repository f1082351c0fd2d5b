//! Environment isolation for tests through `figment::Jail`.

use anyhow::{Result, anyhow};

/// Run `f` inside a [`figment::Jail`] and hand back its output.
///
/// Variables set through the jail are restored when `f` returns, whether it
/// succeeds or not. `f` reports failures with `anyhow` so test bodies can use
/// `ensure!` and `?` directly.
///
/// # Errors
///
/// Returns the error raised by `f`, or a jail setup failure.
///
/// # Examples
///
/// ```
/// use entity_tree_test_helpers::figment::with_jail;
///
/// let home = with_jail(|jail| {
///     jail.set_env("HELPER_DOC_HOME", "/tmp/home");
///     Ok(std::env::var("HELPER_DOC_HOME")?)
/// })?;
/// assert_eq!(home, "/tmp/home");
/// assert!(std::env::var("HELPER_DOC_HOME").is_err());
/// # Ok::<_, anyhow::Error>(())
/// ```
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        let value = f(jail).map_err(|err| figment::Error::from(format!("{err:#}")))?;
        output = Some(value);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure produced no value"))
}
