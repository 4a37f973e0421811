pub mod sections;
pub mod system;

pub use sections::{section_get, sections_index};
pub use system::healthz;
