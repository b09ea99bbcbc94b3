use std::rc::Rc;

use crate::error::BootstrapResult;
use crate::identity::Identity;
use crate::memo::ResourceMemoizer;
use crate::module::RuntimeModule;

/// Alternate construction route: runtimes created straight from the module, without a
/// builder, one per module instance.
pub struct RuntimeFactory<M: RuntimeModule> {
    runtimes: ResourceMemoizer<M, Rc<M::Runtime>>,
}

impl<M> RuntimeFactory<M>
where
    M: RuntimeModule + Identity + Clone,
{
    pub fn new() -> Self {
        Self {
            runtimes: ResourceMemoizer::new(),
        }
    }

    /// Returns the runtime of `module`, creating it on first use.
    pub fn get(&mut self, module: Option<&M>) -> BootstrapResult<Option<Rc<M::Runtime>>> {
        let Some(module) = module else {
            return Ok(None);
        };

        self.runtimes
            .get_or_derive(module, |module| {
                debug!("Creating runtime without builder");
                module
                    .runtime()
                    .map(Rc::new)
                    .map_err(|e| construction_err!("create runtime from module", e))
            })
            .map(Some)
    }
}

impl<M> Default for RuntimeFactory<M>
where
    M: RuntimeModule + Identity + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
