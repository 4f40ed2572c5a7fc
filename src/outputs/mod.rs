//! Output generation: Markdown archive files, HTML pages and JSON reports.
//!
//! # Submodules
//!
//! - [`html`]: typed HTML builder with mandatory escaping
//! - [`page`]: per-day brief page
//! - [`index`]: site index listing every day page
//! - [`archive`]: preview/archive Markdown files and site rendering
//! - [`json`]: JSON dedup report
//!
//! # Output Structure
//!
//! ```text
//! preview/
//! └── 2025-05-06.md
//! output/archive/
//! ├── 2025-05-05.md
//! └── 2025-05-06.md
//! site/
//! ├── 2025-05-05.html
//! ├── 2025-05-06.html
//! └── index.html
//! ```

pub mod archive;
pub mod html;
pub mod index;
pub mod json;
pub mod page;
