use super::explicit_position;
use crate::cli::parser::ActionArgs;
use crate::config::Config;
use crate::core::action::{ActionLogic, ActionOptions};
use crate::core::journal_page::JournalPage;
use crate::errors::AppResult;
use crate::models::action_target::ActionTarget;
use std::sync::Arc;

/// Handle `checkin` and `checkout`.
pub async fn handle(args: &ActionArgs, target: ActionTarget, cfg: &Config) -> AppResult<()> {
    let opts = ActionOptions {
        locate: args.locate,
        position: explicit_position(args.lat, args.lng)?,
        location: args.location.clone(),
        photo: args.photo.clone(),
        fields: args.fields.clone(),
        retry: args.retry,
    };

    let page = Arc::new(JournalPage::new(&cfg.database));
    let controller = ActionLogic::controller(cfg, opts.position, page)?;

    ActionLogic::run(&controller, target, &opts).await
}
