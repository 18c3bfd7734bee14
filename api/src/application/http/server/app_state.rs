use std::sync::Arc;

use dawa_core::application::DawaService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: DawaService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: DawaService) -> Self {
        Self { args, service }
    }
}
