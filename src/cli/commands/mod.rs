pub mod config;
pub mod entry;
pub mod system;

use super::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in entry::definitions()
        .into_iter()
        .chain(config::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}
