#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "sqlite")]
pub mod sqlite;

/// SQL dialect details needed to render a statement.
pub trait Database: std::fmt::Debug + Sync + Send + Clone + 'static {
    const NAME: &'static str;

    /// Write the placeholder of the `index`th parameter (1-based).
    fn write_placeholder(buf: &mut String, index: usize);
}
