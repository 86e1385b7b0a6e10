pub mod a001_collection_point;
