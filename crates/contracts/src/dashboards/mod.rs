pub mod d500_visualization_embed;
