//! Built-in action families.
//!
//! Each family is a set of actions with their parsers and executors:
//!
//! - `preference`: `preference/<key>/set/<value>` and `preference/<key>/delete`.
//! - `app`: `app/control/terminate`.

pub mod app;
pub mod preference;

use crate::{ErasedAction, OneOf, ParserExt, StringAction};

/// The built-in rule set, most specific first.
///
/// A value that parses as an integer is stored as one, then booleans, and any
/// other value falls through to a string.
pub fn default_parsers() -> OneOf<StringAction, Box<dyn ErasedAction>> {
    one_of!(
        preference::DeletePreferenceParser.erase(),
        app::AppControlParser.erase(),
        preference::ChangePreferenceParser::<i64>::new().erase(),
        preference::ChangePreferenceParser::<bool>::new().erase(),
        preference::ChangePreferenceParser::<String>::new().erase(),
    )
}
