mod loader;
mod model;

pub use loader::{load_rules, parse_rules};
pub use model::{Criteria, DayRange, FolderEntry, Mode, NameFragments, RuleSet, SizeRange};
