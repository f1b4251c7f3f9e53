mod footer;
mod header;
mod page;
mod visualization;

pub use page::VisualizationEmbedPage;
