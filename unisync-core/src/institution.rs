//! Institution strategy selection.
//!
//! Each supported institution is a variant of a closed enum carrying its own
//! grid configuration. Adding an institution means adding a variant and its
//! strategy, never a runtime lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::event::NormalizedEvent;
use crate::grid::{GridConfig, TableLocator, parse_grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Institution {
    /// Zambia Centre for Accountancy Studies (default).
    #[default]
    Zcas,
    /// University of Zambia.
    Unza,
    /// Copperbelt University.
    Cbu,
    /// University of Lusaka.
    Unilus,
}

/// How an institution's timetable page is turned into events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Grid(GridConfig),
    /// No parser yet; parsing yields no events.
    Unimplemented,
}

impl Institution {
    pub const ALL: [Institution; 4] = [
        Institution::Zcas,
        Institution::Unza,
        Institution::Cbu,
        Institution::Unilus,
    ];

    /// Resolve a caller-supplied identifier, falling back to the default
    /// institution for unknown or missing values.
    pub fn resolve(identifier: Option<&str>) -> Self {
        match identifier {
            None => Institution::default(),
            Some(id) => id.parse().unwrap_or_else(|_| {
                warn!(
                    "Unknown institution '{}', using '{}'",
                    id,
                    Institution::default()
                );
                Institution::default()
            }),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Institution::Zcas => "zcas",
            Institution::Unza => "unza",
            Institution::Cbu => "cbu",
            Institution::Unilus => "unilus",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Institution::Zcas => "Zambia Centre for Accountancy Studies",
            Institution::Unza => "University of Zambia",
            Institution::Cbu => "Copperbelt University",
            Institution::Unilus => "University of Lusaka",
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Institution::Zcas => Strategy::Grid(GridConfig {
                locator: TableLocator::Attribute {
                    name: "bgcolor",
                    value: "#ffff80",
                },
                ..GridConfig::default()
            }),
            Institution::Unza => Strategy::Grid(GridConfig::default()),
            Institution::Cbu | Institution::Unilus => Strategy::Unimplemented,
        }
    }

    /// Parse a timetable page with this institution's strategy.
    pub fn parse(&self, html: &str) -> Vec<NormalizedEvent> {
        match self.strategy() {
            Strategy::Grid(config) => parse_grid(html, &config),
            Strategy::Unimplemented => {
                warn!(
                    "No timetable parser for {} ({}) yet, nothing to sync",
                    self.name(),
                    self.id()
                );
                Vec::new()
            }
        }
    }
}

impl fmt::Display for Institution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Institution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Institution::ALL
            .into_iter()
            .find(|i| i.id() == wanted)
            .ok_or_else(|| format!("Unknown institution '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZCAS_PAGE: &str = r##"
        <table bgcolor="#ffff80">
          <tr><td colspan="8">ZCAS Timetable</td></tr>
          <tr><td>Time</td><td>Monday</td><td>Tuesday</td><td>Wednesday</td><td>Thursday</td>
              <td>Friday</td><td>Saturday</td><td>Sunday</td></tr>
          <tr><td>08:00-09:00</td><td><b><a href="/u/1">CIT3381 - Security</a></b><br>Lab 210<br>C. Mulenga</td>
              <td>&nbsp;</td><td>&nbsp;</td><td>&nbsp;</td><td>&nbsp;</td><td>&nbsp;</td><td>&nbsp;</td></tr>
        </table>"##;

    #[test]
    fn test_resolve_known_and_case_insensitive() {
        assert_eq!(Institution::resolve(Some("UNZA")), Institution::Unza);
        assert_eq!(Institution::resolve(Some(" cbu ")), Institution::Cbu);
        assert_eq!(Institution::resolve(Some("unilus")), Institution::Unilus);
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_default() {
        assert_eq!(Institution::resolve(Some("mit")), Institution::Zcas);
        assert_eq!(Institution::resolve(None), Institution::Zcas);
        assert!("mit".parse::<Institution>().is_err());
    }

    #[test]
    fn test_unimplemented_institutions_return_empty() {
        assert!(Institution::Cbu.parse(ZCAS_PAGE).is_empty());
        assert!(Institution::Unilus.parse(ZCAS_PAGE).is_empty());
    }

    #[test]
    fn test_zcas_and_unza_parse_grid() {
        let zcas = Institution::Zcas.parse(ZCAS_PAGE);
        let unza = Institution::Unza.parse(ZCAS_PAGE);

        assert_eq!(zcas.len(), 1);
        assert_eq!(zcas[0].subject, "CIT3381 - Security");
        assert_eq!(zcas[0].room, "Lab 210");
        assert_eq!(zcas[0].instructor, "C. Mulenga");
        assert_eq!(zcas, unza);
    }

    #[test]
    fn test_serde_uses_lowercase_ids() {
        assert_eq!(serde_json::to_string(&Institution::Unilus).unwrap(), "\"unilus\"");
    }
}
