pub mod a001_collection_point;
pub mod a002_recycling_item;
