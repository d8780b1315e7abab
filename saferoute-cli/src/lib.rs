//! Command-line driver for the SafeRoute engine.
//!
//! The `rank` subcommand stands in for the map UI: it reads an incident
//! feed file and a route response file, builds a session, applies any
//! category and date filters, and prints the ranked routes in the same
//! shape as the on-map route options panel.
#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

use saferoute_core::{
    Category, CategoryFilter, DateWindow, DateWindowError, ProximityScorer, RankOutcome,
    RouteSession, ScoredRoute,
};
use saferoute_feed::{FeedError, parse_incident_feed, parse_route_response, parse_timestamp};

/// Run the SafeRoute CLI with the current process arguments.
///
/// # Errors
/// Returns [`CliError`] for argument, file, decode, or no-result failures.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => {
            for line in run_rank(&args)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "saferoute",
    about = "Rank alternative routes by proximity-weighted incident danger",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score and rank candidate routes against an incident feed.
    Rank(RankArgs),
}

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser)]
struct RankArgs {
    /// Path to an incident feed JSON file ({"points": [...]}).
    #[arg(long, value_name = "path")]
    incidents: PathBuf,
    /// Path to an OSRM route response JSON file.
    #[arg(long, value_name = "path")]
    routes: PathBuf,
    /// Comma-separated category names to enable (default: all).
    #[arg(long, value_name = "names", value_delimiter = ',')]
    categories: Option<Vec<String>>,
    /// Start of the date window, e.g. 2021-01-05 (inclusive).
    #[arg(long, value_name = "date")]
    from: Option<String>,
    /// End of the date window, e.g. 2021-03-01 (inclusive).
    #[arg(long, value_name = "date")]
    to: Option<String>,
    /// Danger radius in coordinate degrees.
    #[arg(long, value_name = "degrees")]
    radius: Option<f64>,
}

/// Errors surfaced to the terminal user.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command-line arguments.
    #[error(transparent)]
    ArgumentParsing(clap::Error),
    /// A source file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadInput {
        /// File the CLI attempted to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A payload failed to decode.
    #[error(transparent)]
    Feed(#[from] FeedError),
    /// A `--from`/`--to` value was not a recognisable date.
    #[error("unrecognised date '{value}'; try a form like 2021-01-05")]
    InvalidDate {
        /// The rejected argument value.
        value: String,
    },
    /// The date window arguments were inverted.
    #[error(transparent)]
    Window(#[from] DateWindowError),
    /// The routing source supplied no usable routes.
    #[error("no routes to rank; try different endpoints or a different routing source")]
    NoRoutes,
}

fn read_input(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_date_arg(value: &str) -> Result<chrono::NaiveDateTime, CliError> {
    parse_timestamp(value).ok_or_else(|| CliError::InvalidDate {
        value: value.to_owned(),
    })
}

fn build_session(args: &RankArgs) -> Result<RouteSession, CliError> {
    let scorer = args
        .radius
        .map_or_else(ProximityScorer::new, ProximityScorer::with_radius);
    let mut session = RouteSession::with_scorer(scorer);

    let feed = read_input(&args.incidents)?;
    session.load_incidents(parse_incident_feed(&feed)?);
    log::info!("loaded {} incident records", session.incident_count());
    if session.incident_count() == 0 {
        eprintln!("warning: no usable incident data; routes are ranked without danger context");
    }

    if let Some(categories) = &args.categories {
        session.set_filter(
            categories
                .iter()
                .map(|name| Category::parse(name))
                .collect::<CategoryFilter>(),
        );
    }

    match (&args.from, &args.to) {
        (None, None) => {}
        (from, to) => {
            let available = session.available_window();
            let fallback_start = available.map(|w| w.start());
            let fallback_end = available.map(|w| w.end());
            let start = match from {
                Some(value) => parse_date_arg(value)?,
                None => fallback_start.ok_or_else(|| CliError::InvalidDate {
                    value: String::from("--from (no dated incidents to default to)"),
                })?,
            };
            let end = match to {
                Some(value) => parse_date_arg(value)?,
                None => fallback_end.ok_or_else(|| CliError::InvalidDate {
                    value: String::from("--to (no dated incidents to default to)"),
                })?,
            };
            session.apply_window(DateWindow::new(start, end)?);
        }
    }

    Ok(session)
}

fn run_rank(args: &RankArgs) -> Result<Vec<String>, CliError> {
    let mut session = build_session(args)?;
    let candidates = parse_route_response(&read_input(&args.routes)?)?;
    match session.rank_routes(candidates) {
        RankOutcome::NoRoutes => Err(CliError::NoRoutes),
        RankOutcome::Ranked(_) => Ok(render_ranked(session.ranked())),
    }
}

/// Format ranked routes the way the route options panel presents them.
fn render_ranked(ranked: &[ScoredRoute]) -> Vec<String> {
    ranked
        .iter()
        .enumerate()
        .map(|(display_index, scored)| {
            let badge = if display_index == 0 { "SAFEST" } else { "ALT" };
            format!(
                "{rank}. {badge:<6} route {source} | {km:.1}km ({mi:.1}mi) | {min}min | danger {score:.2} | {severity}",
                rank = display_index + 1,
                source = scored.source_index + 1,
                km = scored.route.distance_km(),
                mi = scored.route.distance_miles(),
                min = scored.route.duration_minutes(),
                score = scored.score,
                severity = scored.severity(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FEED: &str = r#"{
        "points": [
            {"type": "HATE_CRIME", "lat": 41.88, "lng": -87.63, "rawDate": "2021-02-10T00:00:00"},
            {"type": "THEFT", "lat": 41.90, "lng": -87.65, "rawDate": "2020-12-31T00:00:00"}
        ]
    }"#;

    const ROUTES: &str = r#"{
        "code": "Ok",
        "routes": [
            {
                "geometry": {"coordinates": [[-87.63, 41.88]]},
                "distance": 2000.0,
                "duration": 600.0
            },
            {
                "geometry": {"coordinates": [[-87.70, 41.95]]},
                "distance": 3218.68,
                "duration": 900.0
            }
        ]
    }"#;

    fn temp_json(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write payload");
        file
    }

    fn args_for(incidents: &NamedTempFile, routes: &NamedTempFile) -> RankArgs {
        RankArgs {
            incidents: incidents.path().to_path_buf(),
            routes: routes.path().to_path_buf(),
            categories: None,
            from: None,
            to: None,
            radius: None,
        }
    }

    #[test]
    fn rank_prints_safest_first() {
        let incidents = temp_json(FEED);
        let routes = temp_json(ROUTES);

        let lines = run_rank(&args_for(&incidents, &routes)).expect("ranking succeeds");
        assert_eq!(lines.len(), 2);
        // The route away from the hate crime ranks first.
        assert!(lines[0].starts_with("1. SAFEST route 2"));
        assert!(lines[1].contains("route 1"));
        assert!(lines[1].contains("ALT"));
    }

    #[test]
    fn category_filter_narrows_scoring() {
        let incidents = temp_json(FEED);
        let routes = temp_json(ROUTES);

        let mut args = args_for(&incidents, &routes);
        args.categories = Some(vec![String::from("THEFT")]);
        let lines = run_rank(&args).expect("ranking succeeds");
        // With only theft enabled both routes score zero, so source order holds.
        assert!(lines[0].starts_with("1. SAFEST route 1"));
    }

    #[test]
    fn date_window_excludes_older_incidents() {
        let incidents = temp_json(FEED);
        let routes = temp_json(ROUTES);

        let mut args = args_for(&incidents, &routes);
        args.from = Some(String::from("2021-01-01"));
        args.to = Some(String::from("2021-12-31"));
        let lines = run_rank(&args).expect("ranking succeeds");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn empty_route_response_is_an_explicit_no_result() {
        let incidents = temp_json(FEED);
        let routes = temp_json(r#"{"code": "Ok", "routes": []}"#);

        let err = run_rank(&args_for(&incidents, &routes)).expect_err("no routes");
        assert!(matches!(err, CliError::NoRoutes));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let routes = temp_json(ROUTES);
        let args = RankArgs {
            incidents: PathBuf::from("/nonexistent/feed.json"),
            routes: routes.path().to_path_buf(),
            categories: None,
            from: None,
            to: None,
            radius: None,
        };
        let err = run_rank(&args).expect_err("missing feed file");
        assert!(matches!(err, CliError::ReadInput { .. }));
    }

    #[rstest]
    #[case("2021-01-05", true)]
    #[case("yesterday", false)]
    fn date_arguments_are_validated(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(parse_date_arg(value).is_ok(), ok);
    }

    #[test]
    fn cli_parses_a_full_command_line() {
        let cli = Cli::try_parse_from([
            "saferoute",
            "rank",
            "--incidents",
            "feed.json",
            "--routes",
            "routes.json",
            "--categories",
            "THEFT,ROBBERY",
            "--from",
            "2021-01-05",
            "--to",
            "2021-03-01",
            "--radius",
            "0.005",
        ])
        .expect("valid arguments");
        let Command::Rank(args) = cli.command;
        assert_eq!(args.categories.as_ref().map(Vec::len), Some(2));
        assert_eq!(args.radius, Some(0.005));
    }
}
