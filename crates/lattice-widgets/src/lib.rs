//! Lattice widget set
//!
//! Visual widgets expressed as [`ComponentConfig`]s over the component
//! runtime. Each module owns one widget: tag name, slot schema, style text,
//! render function, and the observation behaviors it composes. No business
//! logic lives here; feed data and other page state arrive as ordinary
//! light-DOM content and attributes.

pub mod behaviors;
pub mod card;
pub mod carousel;
pub mod feed;
pub mod hero;
pub mod nav;

mod items;

pub use items::collect_items;

use lattice_components::{ComponentConfig, ComponentRuntime, ConfigError};

/// Define every widget in this set on a runtime. Safe to call more than
/// once; tags already in the ledger are skipped. Returns how many tags were
/// newly defined.
pub fn define_all(runtime: &mut ComponentRuntime) -> Result<usize, ConfigError> {
    let configs: Vec<ComponentConfig> = vec![
        card::config(),
        carousel::config(),
        feed::config(),
        hero::config(),
        nav::config(),
    ];

    let mut defined = 0;
    for config in configs {
        if runtime.define(config)? {
            defined += 1;
        }
    }
    Ok(defined)
}
