use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::warn;
use unisync_core::body::{render_plan, today_in};
use unisync_core::diff::{WritePlan, reconcile};
use unisync_core::remote::decode_snapshot;

use super::{Settings, read_input};
use crate::render::PlanRender;

pub fn run(
    html: &Path,
    remote: &Path,
    institution: Option<&str>,
    timezone: Option<&str>,
    json: bool,
) -> Result<()> {
    let settings = Settings::load(institution, timezone)?;
    let markup = read_input(html)?;
    let snapshot = read_input(remote)?;

    let events = settings.parse_timetable(&markup);
    let remote_events = decode_snapshot(&snapshot)
        .with_context(|| format!("Failed to decode remote snapshot {}", remote.display()))?;

    // An empty timetable is "nothing to sync", never "delete everything".
    let plan = if events.is_empty() {
        warn!(
            "No classes found for {}, leaving {} remote events untouched",
            settings.institution.name(),
            remote_events.len()
        );
        WritePlan::default()
    } else {
        reconcile(&events, &remote_events)
    };

    if json {
        let time_zone = &settings.config.timezone;
        let operations = render_plan(&plan, time_zone, today_in(time_zone));
        println!("{}", serde_json::to_string_pretty(&operations)?);
        return Ok(());
    }

    println!(
        "{} {}",
        settings.config.calendar_name.bold(),
        format!("({})", settings.institution.name()).dimmed()
    );
    println!("{}", plan.render(&remote_events));

    Ok(())
}
