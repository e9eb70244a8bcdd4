//! `reconview fetch` — pull a remote session and project it locally.

use std::path::Path;

use reconview_client::ServiceClient;

use crate::render;
use crate::CliError;

pub fn cmd_fetch(
    session_id: &str,
    api_base: &str,
    config: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let config = crate::project::load_config(config)?;

    let client = ServiceClient::new(api_base);
    let snapshot = client.get_session(session_id).map_err(CliError::service)?;
    let session = snapshot.into_session();
    let projection = session.project(&config);

    if json {
        let out = serde_json::to_string_pretty(&projection)
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", out);
    } else {
        print!("{}", render::render(&projection));
    }

    if !session.agent_state.is_empty() {
        eprintln!("agent state: {}", session.agent_state);
    }
    eprintln!("{}", render::summary_line(&projection.summary));
    Ok(())
}
