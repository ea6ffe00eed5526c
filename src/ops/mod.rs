pub mod collate;
pub mod highlight;
pub mod pipeline;
