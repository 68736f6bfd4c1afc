use std::sync::Arc;

use crate::cache::SearchCacheHandle;
use crate::recommend::Recommender;
use crate::store::RecipeStore;

pub struct HandlerState<S: RecipeStore + 'static> {
    pub recommender: Arc<Recommender<S>>,

    pub search_cache: SearchCacheHandle,
}

impl<S: RecipeStore + 'static> HandlerState<S> {
    pub fn new(recommender: Arc<Recommender<S>>, search_cache: SearchCacheHandle) -> Self {
        Self {
            recommender,
            search_cache,
        }
    }
}

// Manual impl: the store itself need not be `Clone`.
impl<S: RecipeStore + 'static> Clone for HandlerState<S> {
    fn clone(&self) -> Self {
        Self {
            recommender: Arc::clone(&self.recommender),
            search_cache: self.search_cache.clone(),
        }
    }
}
