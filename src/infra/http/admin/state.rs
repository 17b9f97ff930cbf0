use std::sync::Arc;

use crate::application::access::AccessService;
use crate::application::admin::{flags::AdminFlagService, settings::AdminShowcaseSettingsService};
use crate::application::nonce::NonceService;
use crate::application::repos::PostsRepo;

#[derive(Clone)]
pub struct AdminState {
    pub posts: Arc<dyn PostsRepo>,
    pub flags: Arc<AdminFlagService>,
    pub settings: Arc<AdminShowcaseSettingsService>,
    pub access: Arc<AccessService>,
    pub nonce: Arc<NonceService>,
    /// How many rows the post list shows.
    pub post_list_limit: u32,
}
