mod embed_panel;
mod page;

pub use page::QueryViewPage;
