//! Terminal rendering of transcript entries and plan results

use colored::Colorize;

use crate::domain::{DATE_FORMAT, TripInfo};
use crate::llm::{LlmError, Message, Role};
use crate::planner::{ArtifactKind, PlanOutcome};
use crate::session::{Session, SessionError};

/// Shown after a reply that hit the token limit
pub const TRUNCATED_NOTICE: &str = "[Response truncated - max tokens reached]";

/// Indent every line of a message body
fn indent(text: &str) -> String {
    text.lines().map(|line| format!("    {line}")).collect::<Vec<_>>().join("\n")
}

/// Print one transcript entry as a labelled block
pub fn print_message(message: &Message) {
    let label = match message.role {
        Role::User => "You".bright_green().bold(),
        Role::Assistant => "Assistant".bright_blue().bold(),
    };
    println!();
    println!("{label}");
    println!("{}", indent(&message.content));
}

/// Print failures and skipped artifacts of a plan run
pub fn print_outcome_problems(outcome: &PlanOutcome) {
    for failure in &outcome.failures {
        eprintln!("{} {}", "Error:".red(), failure);
    }
    for kind in outcome.truncated() {
        println!("{}", format!("[{kind} truncated - max tokens reached]").yellow());
    }
    for kind in &outcome.skipped {
        println!("{}", format!("Skipped {kind}: it needs a packing list first.").dimmed());
    }
}

/// Progress line naming the artifacts about to be generated
pub fn planning_line(kinds: &[ArtifactKind]) -> String {
    let titles: Vec<&str> = kinds.iter().map(|k| k.title()).collect();
    let listed = match titles.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {}", rest.join(", "), last),
        Some((last, _)) => last.to_string(),
        None => "your plan".to_string(),
    };
    format!("Fetching weather data and generating your {listed}...")
}

/// Session id and start time
pub fn session_line(session: &Session) -> String {
    format!(
        "Session {} started {}",
        session.short_id(),
        session.started_at().format("%Y-%m-%d %H:%M UTC")
    )
}

/// Follow-up advice for an error, if there is something the user can do
pub fn error_hint(err: &SessionError) -> Option<&'static str> {
    match err {
        SessionError::Weather(e) if e.is_network() => {
            Some("Could not reach the weather service. Check your network connection.")
        }
        SessionError::Weather(e) => match e.status() {
            Some(400) => Some("The weather service did not recognise the destination. Try 'City, Country'."),
            Some(401 | 403) => Some("Check that your weather API key is valid."),
            _ => None,
        },
        SessionError::Llm(e) if e.is_malformed() => Some("The model replied without any text. Try rephrasing."),
        SessionError::Llm(e @ LlmError::Network(_)) if e.status().is_none() => {
            Some("Could not reach the model endpoint. Check your network connection.")
        }
        SessionError::Llm(e) => match e.status() {
            Some(401 | 403) => Some("Please make sure your API credentials are set."),
            Some(429 | 529) => Some("The model endpoint is busy. Try again in a moment."),
            Some(s) if s >= 500 => Some("The model endpoint is busy. Try again in a moment."),
            _ => None,
        },
        _ => None,
    }
}


/// One-line preview used by /history
pub fn preview(message: &Message, width: usize) -> String {
    let first_line = message.content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let preview: String = first_line.chars().take(width).collect();
    if first_line.chars().count() > width {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Multi-line trip summary used by /trip and `tp plan`
pub fn trip_summary(trip: &TripInfo) -> String {
    format!(
        "Destination: {}\nDates:       {} to {} ({} days)\nActivities:  {}",
        trip.destination(),
        trip.start_date().format(DATE_FORMAT),
        trip.end_date().format(DATE_FORMAT),
        trip.stay_days(),
        trip.activities().replace('\n', ", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TripConfig;
    use crate::domain::TripForm;

    #[test]
    fn test_indent() {
        assert_eq!(indent("a\nb"), "    a\n    b");
    }

    #[test]
    fn test_preview_truncates() {
        let msg = Message::assistant("\nHere's your personalized packing list based on the weather");
        assert_eq!(preview(&msg, 10), "Here's you...");

        let short = Message::user("hi");
        assert_eq!(preview(&short, 10), "hi");
    }

    #[test]
    fn test_preview_multi_line_with_short_first_line() {
        let msg = Message::assistant("Packing list:\n- boots\n- rain jacket");
        assert_eq!(preview(&msg, 20), "Packing list:");
    }

    #[test]
    fn test_planning_line() {
        assert_eq!(
            planning_line(&ArtifactKind::ALL),
            "Fetching weather data and generating your packing list, daily routine and recommended spots..."
        );
        assert_eq!(
            planning_line(&[ArtifactKind::PackingList]),
            "Fetching weather data and generating your packing list..."
        );
    }

    #[test]
    fn test_session_line() {
        let session = Session::new();
        let line = session_line(&session);
        assert!(line.starts_with(&format!("Session {} started ", session.short_id())));
        assert!(line.ends_with(" UTC"));
    }

    #[test]
    fn test_error_hints() {
        let weather = |status| {
            SessionError::Weather(crate::weather::WeatherError::Api {
                status,
                body: "{}".to_string(),
            })
        };
        let llm = |status| {
            SessionError::Llm(LlmError::ApiError {
                status,
                message: "err".to_string(),
            })
        };

        assert!(error_hint(&weather(400)).unwrap().contains("destination"));
        assert!(error_hint(&weather(401)).unwrap().contains("weather API key"));
        assert_eq!(error_hint(&weather(502)), None);
        assert!(error_hint(&llm(401)).unwrap().contains("credentials"));
        assert!(error_hint(&llm(529)).unwrap().contains("busy"));
        assert!(error_hint(&llm(503)).unwrap().contains("busy"));
        assert_eq!(error_hint(&llm(400)), None);
        assert!(
            error_hint(&SessionError::Llm(LlmError::InvalidResponse("no text".to_string())))
                .unwrap()
                .contains("without any text")
        );
        assert_eq!(error_hint(&SessionError::EmptyQuestion), None);
    }

    #[test]
    fn test_trip_summary() {
        let trip = TripForm::new("Oslo", "2024-01-10", "2024-01-12", "skiing\nsauna")
            .validate(&TripConfig::default())
            .unwrap();
        let summary = trip_summary(&trip);
        assert!(summary.contains("Oslo"));
        assert!(summary.contains("2024-01-10 to 2024-01-12 (3 days)"));
        assert!(summary.contains("skiing, sauna"));
    }
}
