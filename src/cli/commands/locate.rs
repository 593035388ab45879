use super::explicit_position;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::action::ActionLogic;
use crate::errors::{AppError, AppResult};
use crate::models::action_target::ActionTarget;
use crate::services::page::StaticPage;
use std::sync::Arc;

/// Handle `locate`: run the enrichment step alone and discard the form.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Locate { lat, lng } = cmd {
        let position = explicit_position(*lat, *lng)?;
        let controller = ActionLogic::controller(cfg, position, Arc::new(StaticPage))?;

        controller.activate(ActionTarget::CheckIn);
        let location = ActionLogic::locate(&controller).await;
        controller.close();

        if location.is_none() {
            return Err(AppError::Other("no location available".into()));
        }
    }

    Ok(())
}
