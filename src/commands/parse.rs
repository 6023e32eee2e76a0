use std::path::Path;

use anyhow::Result;

use super::{Settings, read_input};
use crate::render::{Render, render_event_count};

pub fn run(html: &Path, institution: Option<&str>, json: bool) -> Result<()> {
    let settings = Settings::load(institution, None)?;
    let markup = read_input(html)?;
    let events = settings.parse_timetable(&markup);

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    for event in &events {
        println!("   {}", event.render());
    }
    println!("{}", render_event_count(events.len()));

    Ok(())
}
