//! Domain entities - Content documents with identity

mod attraction;
mod guide;
mod region;

pub use attraction::{
    Accessibility, Approach, Attraction, AttractionSummary, Faq, MapSnippetConfig, Parking,
    PracticalInfo, RegionRef, Safety,
};
pub use guide::{BlockStyle, BodyNode, Guide, GuideSummary, ListKind, Span, TextBlock};
pub use region::Region;
