use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::action_target::ActionTarget;
use crate::models::position::Position;
use crate::models::submission::SubmissionResult;
use crate::services::backend::HttpBackend;
use crate::services::geocoder::NominatimClient;
use crate::services::notifier::ConsoleNotifier;
use crate::services::page::Page;
use crate::services::{geolocation, http_client};
use crate::ui::messages;
use crate::workflow::{ActionController, Enrichment, Services};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// What the user filled into the action form from the command line.
#[derive(Debug, Clone, Default)]
pub struct ActionOptions {
    pub locate: bool,
    pub position: Option<Position>,
    pub location: Option<String>,
    pub photo: Option<PathBuf>,
    pub fields: Vec<String>,
    pub retry: bool,
}

/// High-level logic for the `checkin` / `checkout` / `locate` commands.
pub struct ActionLogic;

impl ActionLogic {
    /// Wire a controller to the real backend, geocoder and geolocation
    /// source described by `cfg`.
    pub fn controller(
        cfg: &Config,
        position: Option<Position>,
        page: Arc<dyn Page>,
    ) -> AppResult<ActionController> {
        let client = http_client(&cfg.user_agent, cfg.request_timeout_secs)?;

        Ok(ActionController::new(Services {
            geolocator: geolocation::from_config(&cfg.geolocation, position),
            geocoder: Arc::new(NominatimClient::new(
                client.clone(),
                cfg.geocoder_url.clone(),
            )),
            backend: Arc::new(HttpBackend::new(
                client,
                &cfg.server_url,
                cfg.session_cookie.clone(),
            )),
            notifier: Arc::new(ConsoleNotifier),
            page,
        }))
    }

    /// One full workflow cycle: open, fill, optionally locate, submit.
    pub async fn run(
        controller: &ActionController,
        target: ActionTarget,
        opts: &ActionOptions,
    ) -> AppResult<()> {
        controller.activate(target);
        messages::header(controller.title());

        for pair in &opts.fields {
            controller.edit_draft(|d| d.set_field_pair(pair))?;
        }

        if opts.locate || opts.position.is_some() {
            Self::locate(controller).await;
        }

        // typed text wins over the looked-up address
        if let Some(text) = &opts.location {
            controller.edit_draft(|d| d.set_location(text.clone()));
        }

        if let Some(path) = &opts.photo
            && !controller.select_photo(path.clone()).await
        {
            messages::warning(format!(
                "Photo {} could not be read; submitting anyway.",
                path.display()
            ));
        }

        loop {
            let failure = match controller.submit().await {
                Ok(SubmissionResult::Success) => return Ok(()),
                Ok(SubmissionResult::Failure(msg)) => AppError::SubmissionRejected(msg),
                Err(e) => e,
            };

            if opts.retry && confirm("Retry with the same data? (N/y) ") {
                continue;
            }

            controller.close();
            return Err(failure);
        }
    }

    /// Run the enrichment step and echo what it wrote. Failures were
    /// already reported to the user and never abort the cycle.
    pub async fn locate(controller: &ActionController) -> Option<String> {
        match controller.enrich_location().await {
            Ok(Enrichment::Applied {
                position, location, ..
            }) => {
                messages::info(format!("📍 {} ({})", location, position));
                Some(location)
            }
            Ok(Enrichment::Discarded) => None,
            Err(e) => {
                debug!(error = %e, "continuing without location");
                None
            }
        }
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{}", prompt);
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    input.trim().eq_ignore_ascii_case("y")
}
