pub mod d500_visualization_embed;
pub mod d501_query_view;

pub use d500_visualization_embed::ui::VisualizationEmbedPage;
pub use d501_query_view::ui::QueryViewPage;
