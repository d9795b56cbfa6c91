// Course recommendation: two static CSV catalogs and a first-match suggester.
// Catalogs are loaded once in main; load failures abort startup.

pub mod catalog;
pub mod suggester;

pub use catalog::CourseCatalog;
pub use suggester::{suggest_courses, Suggestion};
