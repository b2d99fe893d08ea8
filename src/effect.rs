//! Effects - side effects declared by the reducer

use crate::config::CatalogConfig;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Run one acquisition cycle and report back with `epoch`
    LoadCatalog { epoch: u64, config: CatalogConfig },
}
