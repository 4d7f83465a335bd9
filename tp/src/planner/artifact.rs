//! Artifact kinds produced for a trip

use serde::{Deserialize, Serialize};

/// A generated piece of trip advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    PackingList,
    DailyRoutine,
    RecommendedSpots,
}

impl ArtifactKind {
    /// Every kind, packing list first
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::PackingList,
        ArtifactKind::DailyRoutine,
        ArtifactKind::RecommendedSpots,
    ];

    /// Prompt template name
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::PackingList => "packing-list",
            Self::DailyRoutine => "daily-routine",
            Self::RecommendedSpots => "recommended-spots",
        }
    }

    /// Human-readable name
    pub fn title(&self) -> &'static str {
        match self {
            Self::PackingList => "packing list",
            Self::DailyRoutine => "daily routine",
            Self::RecommendedSpots => "recommended spots",
        }
    }

    /// Kind this one cannot be generated without
    pub fn depends_on(&self) -> Option<ArtifactKind> {
        match self {
            Self::PackingList => None,
            Self::DailyRoutine | Self::RecommendedSpots => Some(Self::PackingList),
        }
    }

    /// Transcript entry for a generated artifact
    pub fn transcript_entry(&self, text: &str) -> String {
        let intro = match self {
            Self::PackingList => {
                "Here's your personalized packing list based on the weather forecast and your activities:"
            }
            Self::DailyRoutine => "Here's a day-by-day routine for your trip:",
            Self::RecommendedSpots => "Here are some spots worth visiting on your trip:",
        };
        format!("{intro}\n\n{text}")
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// A successfully generated artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub text: String,
    /// Cut off at the token limit
    pub truncated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependencies() {
        assert_eq!(ArtifactKind::PackingList.depends_on(), None);
        assert_eq!(
            ArtifactKind::DailyRoutine.depends_on(),
            Some(ArtifactKind::PackingList)
        );
        assert_eq!(
            ArtifactKind::RecommendedSpots.depends_on(),
            Some(ArtifactKind::PackingList)
        );
    }

    #[test]
    fn test_serde_kebab_case() {
        let kinds: Vec<ArtifactKind> = serde_yaml::from_str("[packing-list, recommended-spots]").unwrap();
        assert_eq!(kinds, vec![ArtifactKind::PackingList, ArtifactKind::RecommendedSpots]);
    }

    #[test]
    fn test_transcript_entry() {
        let entry = ArtifactKind::PackingList.transcript_entry("- socks");
        assert!(entry.starts_with("Here's your personalized packing list"));
        assert!(entry.ends_with("\n\n- socks"));
    }
}
