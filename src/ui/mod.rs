//! Presentation layer: render-ready projections and a plain-text renderer.
//!
//! ```text
//! ListSnapshot → ListViewModel → render_list → text
//! Country      → CountryDetails → render_details → text
//! ```
//!
//! - [`viewmodel`]: list screen, sort dialog and filter dialog state
//! - [`details`]: the detail screen of one country
//! - [`diff`]: row identity and change summaries between two lists
//! - [`renderer`]: plain-text output of the above

pub mod details;
pub mod diff;
pub mod renderer;
pub mod viewmodel;

pub use details::CountryDetails;
pub use diff::{CountryListDiff, ListChanges};
pub use renderer::{render_details, render_dialogs, render_list};
pub use viewmodel::{
    CountryRow, EmptyState, FilterDialogState, HeaderInfo, ListViewModel, SearchBarInfo, SortDialogState,
    SubregionOption,
};
