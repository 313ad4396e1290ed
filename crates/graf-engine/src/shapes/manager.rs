use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{GrafError, Result};
use crate::render::{ResourceState, VertexArray};
use crate::render::backend::RenderBackend;

use super::{ShapeConfig, ShapeFactory, ShapeKind};

/// Builds each shape at most once and hands out shared drawables.
///
/// Owned by the application and passed by reference; drawables handed out
/// stay owned by the cache and are released through [`release_all`](Self::release_all).
#[derive(Debug)]
pub struct ShapeFactoryManager {
    factories: HashMap<ShapeKind, ShapeFactory>,
    cache: HashMap<ShapeKind, Rc<VertexArray>>,
}

impl ShapeFactoryManager {
    /// Registers one factory per [`ShapeKind`].
    pub fn new(config: &ShapeConfig) -> Result<Self> {
        let mut factories = HashMap::with_capacity(ShapeKind::ALL.len());
        for kind in ShapeKind::ALL {
            factories.insert(kind, ShapeFactory::for_kind(kind, config)?);
        }

        Ok(Self {
            factories,
            cache: HashMap::new(),
        })
    }

    /// Returns the cached drawable for `kind`, creating it on first request.
    ///
    /// An entry released behind the cache's back is dropped and rebuilt.
    pub fn create_shape<B: RenderBackend + ?Sized>(
        &mut self,
        kind: ShapeKind,
        backend: &mut B,
    ) -> Result<Rc<VertexArray>> {
        let stale = match self.cache.get(&kind) {
            Some(shape) if shape.state() != ResourceState::Released => {
                return Ok(Rc::clone(shape));
            }
            Some(_) => true,
            None => false,
        };
        if stale {
            log::debug!("cached {kind} was released; rebuilding");
            self.cache.remove(&kind);
        }

        let factory = self
            .factories
            .get(&kind)
            .ok_or_else(|| GrafError::config(format!("unknown shape type: {kind}")))?;

        log::debug!("shape cache miss: {kind}");
        let shape = Rc::new(factory.create_shape(backend)?);
        self.cache.insert(kind, Rc::clone(&shape));
        Ok(shape)
    }

    /// Live cached drawable for `kind`, without creating one.
    pub fn cached(&self, kind: ShapeKind) -> Option<Rc<VertexArray>> {
        self.cache
            .get(&kind)
            .filter(|shape| shape.state() != ResourceState::Released)
            .cloned()
    }

    pub fn factory(&self, kind: ShapeKind) -> Option<&ShapeFactory> {
        self.factories.get(&kind)
    }

    /// Number of cached drawables.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Empties the cache and releases every drawable it held.
    pub fn release_all<B: RenderBackend + ?Sized>(&mut self, backend: &mut B) {
        for (kind, shape) in self.cache.drain() {
            shape.release(backend);
            log::debug!("released {kind}");
        }
    }
}
