pub mod date_range;
pub mod post_id;
