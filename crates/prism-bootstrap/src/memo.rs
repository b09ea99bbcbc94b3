use crate::identity::Identity;

/// Caches a single resource derived from a source input.
///
/// The cached resource is handed out again as long as the source passed in is the same
/// instance as the one it was derived from. A different source drops the previous resource
/// before deriving a new one, so at most one derived resource is alive at any time.
#[derive(Debug)]
pub struct ResourceMemoizer<S, R> {
    entry: Option<(S, R)>,
}

impl<S, R> Default for ResourceMemoizer<S, R> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<S, R> ResourceMemoizer<S, R>
where
    S: Identity + Clone,
    R: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the resource cached for `source`, deriving it first when needed.
    ///
    /// Errors returned by `derive` are propagated as is, and leave the memoizer empty.
    pub fn get_or_derive<E, F>(&mut self, source: &S, derive: F) -> Result<R, E>
    where
        F: FnOnce(&S) -> Result<R, E>,
    {
        if let Some((cached_source, resource)) = &self.entry {
            if cached_source.is_same(source) {
                trace!("Reusing memoized resource");
                return Ok(resource.clone());
            }
        }

        // The stale resource is released before the new one exists.
        if self.entry.take().is_some() {
            debug!("Source changed, discarding memoized resource");
        }

        let resource = derive(source)?;
        self.entry = Some((source.clone(), resource.clone()));

        Ok(resource)
    }

    pub fn is_cached_for(&self, source: &S) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|(cached_source, _)| cached_source.is_same(source))
    }

    pub fn cached(&self) -> Option<&R> {
        self.entry.as_ref().map(|(_, resource)| resource)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
