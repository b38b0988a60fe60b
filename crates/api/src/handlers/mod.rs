pub mod attachments;
pub mod extraction;
pub mod seed;
pub mod shows;
