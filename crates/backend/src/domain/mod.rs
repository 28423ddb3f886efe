pub mod c001_content_type;
pub mod c002_entry;
pub mod c003_destination;
