//! A live-updating donut chart over a document-collection change feed.
//!
//! Wire a [`LiveDonut`] to anything implementing [`Collection`]: change
//! batches reduce into a record list, the chart reconciles its slices with
//! animated transitions, and pointer traffic drives hover highlights, a
//! tooltip and click-to-delete.

pub mod chart;
pub mod color;
pub mod draw;
pub mod store;

pub use chart::{ChartStyle, Dimensions, DonutChart, LiveDonut, DEFAULT_STYLE};
pub use color::{Color, ColorPalette, OrdinalScale, Set3Palette};
pub use store::{
    reduce, Change, ChangeBatch, ChangeKind, Collection, MemoryCollection, Record, StoreError,
};
