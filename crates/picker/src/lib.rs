//! `bundlepick-picker`
//!
//! **Responsibility:** the single place the presentation layer talks to.
//!
//! [`PickerSession`] owns one [`SelectionStore`](bundlepick_catalog::SelectionStore),
//! one [`BundleList`](bundlepick_bundle::BundleList) and the search bookkeeping,
//! and exposes the user actions of the bundle editor and its picker modal.

pub mod pipeline;
pub mod session;

pub use pipeline::{PipelineEvent, SearchPipeline};
pub use session::PickerSession;
