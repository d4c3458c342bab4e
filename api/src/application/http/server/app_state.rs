use std::sync::Arc;

use cookwise_core::application::CookwiseService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: CookwiseService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: CookwiseService) -> Self {
        Self { args, service }
    }
}
