use diesel::SqliteConnection;
use diesel::expression::functions::define_sql_function;
use diesel::result::QueryResult;
use diesel::sql_types::Text;

define_sql_function! {
    /// `lower()` folding every letter, where SQLite's own only folds ASCII ones.
    fn unicode_lower(text: Text) -> Text;
}

/// Functions are registered per connection.
pub fn register_functions(connection: &mut SqliteConnection) -> QueryResult<()> {
    unicode_lower_utils::register_impl(connection, |text: String| text.to_lowercase())
}
