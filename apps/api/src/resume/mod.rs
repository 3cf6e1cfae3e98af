pub mod extract;
pub mod parser;

pub use extract::extract_resume_text;
pub use parser::parse_resume_text;
