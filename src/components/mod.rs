pub mod catalog_view;
pub mod detail_modal;
pub mod entity_card;
pub mod theme;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use catalog_view::{CatalogView, CatalogViewProps};
pub use detail_modal::{DetailModal, DetailModalProps};
pub use entity_card::{EntityCard, EntityCardProps};
